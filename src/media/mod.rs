pub mod classify;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod warn;
pub mod writer;
