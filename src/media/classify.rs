use serde::Serialize;
use serde_json::{Map, Value};

const ARTWORK_TYPES: &[&str] = &["painting", "photography", "art installation", "art and poems"];
const MUSIC_TYPES: &[&str] = &["audio", "music"];
const OUTCOME_TYPES: &[&str] = &["video", "podcast", "article"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub title: Value,
    pub description: Value,
    pub image_url: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Poem {
    pub title: Value,
    pub text: Value,
    pub author: Value,
    pub english_translation: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicItem {
    pub title: Value,
    pub description: Value,
    pub media_url: Value,
    pub embedded_content: Value,
}

/// Where a single media object ends up.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Outcome(Value),
    Artwork(Artwork),
    Poem(Poem),
    Music(MusicItem),
    Unrecognized,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedMedia {
    pub artworks: Vec<Artwork>,
    pub music: Vec<MusicItem>,
    pub poems: Vec<Poem>,
    pub outcomes: Vec<Value>,
    pub unrecognized: usize,
}

fn field_or_empty(obj: &Map<String, Value>, key: &str) -> Value {
    obj.get(key).cloned().unwrap_or_else(|| Value::from(""))
}

fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

fn media_type(obj: &Map<String, Value>) -> String {
    obj.get("mediaType")
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .unwrap_or_default()
}

fn poem_from(obj: &Map<String, Value>) -> Poem {
    let text = match obj.get("poemSpanish") {
        spanish if is_filled(spanish) => field_or_empty(obj, "poemSpanish"),
        _ => field_or_empty(obj, "mediaSummary"),
    };
    Poem {
        title: field_or_empty(obj, "mediaTitle"),
        text,
        author: field_or_empty(obj, "author"),
        english_translation: field_or_empty(obj, "poem Eng"),
    }
}

pub fn classify(media: &Value) -> Classified {
    let Some(obj) = media.as_object() else {
        return Classified::Unrecognized;
    };

    if is_filled(obj.get("outcomeType")) {
        return Classified::Outcome(media.clone());
    }

    match media_type(obj).as_str() {
        kind if ARTWORK_TYPES.contains(&kind) => Classified::Artwork(Artwork {
            title: field_or_empty(obj, "mediaTitle"),
            description: field_or_empty(obj, "mediaSummary"),
            image_url: field_or_empty(obj, "mediaUrl"),
        }),
        "poem" => Classified::Poem(poem_from(obj)),
        kind if MUSIC_TYPES.contains(&kind) => Classified::Music(MusicItem {
            title: field_or_empty(obj, "mediaTitle"),
            description: field_or_empty(obj, "mediaSummary"),
            media_url: field_or_empty(obj, "mediaUrl"),
            embedded_content: field_or_empty(obj, "embededContent"),
        }),
        kind if OUTCOME_TYPES.contains(&kind) => Classified::Outcome(media.clone()),
        _ => Classified::Unrecognized,
    }
}

pub fn classify_all(media: &[Value]) -> ClassifiedMedia {
    let mut out = ClassifiedMedia::default();
    for item in media {
        match classify(item) {
            Classified::Outcome(value) => out.outcomes.push(value),
            Classified::Artwork(artwork) => out.artworks.push(artwork),
            Classified::Poem(poem) => out.poems.push(poem),
            Classified::Music(music) => out.music.push(music),
            Classified::Unrecognized => out.unrecognized += 1,
        }
    }
    out
}
