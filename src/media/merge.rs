use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::MergeError;
use crate::media::classify::ClassifiedMedia;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMerge {
    pub project: String,
    pub artworks: usize,
    pub music: usize,
    pub poems: usize,
    pub outcomes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MergeSummary {
    pub total: usize,
    pub matched: usize,
    pub merged: Vec<ProjectMerge>,
}

fn append_to(
    record: &mut Map<String, Value>,
    project: &str,
    field: &'static str,
    items: Vec<Value>,
) -> Result<(), MergeError> {
    let Some(Value::Array(existing)) = record.get_mut(field) else {
        return Err(MergeError::MissingSequence {
            project: project.to_string(),
            field,
        });
    };
    existing.extend(items);
    Ok(())
}

fn to_values<T: Serialize>(items: &[T]) -> Result<Vec<Value>> {
    items
        .iter()
        .map(|item| serde_json::to_value(item).map_err(Into::into))
        .collect()
}

fn merge_record(
    record: &mut Map<String, Value>,
    project: &str,
    media: &ClassifiedMedia,
) -> Result<ProjectMerge> {
    if !media.artworks.is_empty() {
        append_to(record, project, "Artworks", to_values(&media.artworks)?)?;
        record.insert("HasArtwork".to_string(), Value::Bool(true));
    }
    if !media.music.is_empty() {
        append_to(record, project, "Music", to_values(&media.music)?)?;
        record.insert("HasMusic".to_string(), Value::Bool(true));
    }
    if !media.poems.is_empty() {
        record.insert("Poems".to_string(), Value::Array(to_values(&media.poems)?));
        record.insert("HasPoems".to_string(), Value::Bool(true));
    }
    // outcomes carry no Has* flag
    if !media.outcomes.is_empty() {
        append_to(record, project, "Outcomes", media.outcomes.clone())?;
    }

    Ok(ProjectMerge {
        project: project.to_string(),
        artworks: media.artworks.len(),
        music: media.music.len(),
        poems: media.poems.len(),
        outcomes: media.outcomes.len(),
    })
}

/// Splice classified media into every project whose `ProjectName` matches a
/// key exactly. Unmatched records are not touched. Artworks, music and
/// outcomes are appended, so merging twice duplicates them; poems are
/// replaced.
pub fn merge_projects(
    projects: &mut [Value],
    media: &BTreeMap<String, ClassifiedMedia>,
) -> Result<MergeSummary> {
    let mut summary = MergeSummary {
        total: projects.len(),
        ..MergeSummary::default()
    };

    for project in projects.iter_mut() {
        let Some(record) = project.as_object_mut() else {
            continue;
        };
        let name = record
            .get("ProjectName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let Some(classified) = media.get(&name) else {
            continue;
        };

        summary.matched += 1;
        summary.merged.push(merge_record(record, &name, classified)?);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::classify::classify_all;
    use serde_json::json;

    fn media_for(name: &str, items: Value) -> BTreeMap<String, ClassifiedMedia> {
        let items = items.as_array().cloned().unwrap_or_default();
        BTreeMap::from([(name.to_string(), classify_all(&items))])
    }

    fn empty_record(name: &str) -> Value {
        json!({
            "ProjectName": name,
            "Artworks": [],
            "Music": [],
            "Poems": [],
            "Outcomes": [],
            "HasArtwork": false
        })
    }

    #[test]
    fn painting_lands_in_artworks_and_sets_flag() {
        let mut projects = vec![empty_record("Alpha")];
        let media = media_for(
            "Alpha",
            json!([{"mediaType": "Painting", "mediaTitle": "T", "mediaSummary": "D", "mediaUrl": "U"}]),
        );

        let summary = merge_projects(&mut projects, &media).expect("merge");

        assert_eq!(summary.matched, 1);
        assert_eq!(summary.total, 1);
        assert_eq!(
            projects[0]["Artworks"],
            json!([{"title": "T", "description": "D", "imageUrl": "U"}])
        );
        assert_eq!(projects[0]["HasArtwork"], json!(true));
    }

    #[test]
    fn unmatched_record_is_untouched() {
        let original = empty_record("Gamma");
        let mut projects = vec![original.clone()];
        let media = media_for("Alpha", json!([{"mediaType": "Painting"}]));

        let summary = merge_projects(&mut projects, &media).expect("merge");

        assert_eq!(summary.matched, 0);
        assert_eq!(
            serde_json::to_string(&projects[0]).expect("serialize"),
            serde_json::to_string(&original).expect("serialize")
        );
    }

    #[test]
    fn poems_replace_while_others_append() {
        let mut projects = vec![json!({
            "ProjectName": "Alpha",
            "Artworks": [{"title": "old"}],
            "Music": [],
            "Poems": [{"title": "old poem"}],
            "Outcomes": [{"outcomeType": "old"}]
        })];
        let media = media_for(
            "Alpha",
            json!([
                {"mediaType": "Poem", "mediaTitle": "new poem"},
                {"mediaType": "Photography", "mediaTitle": "new"},
                {"mediaType": "Video"}
            ]),
        );

        merge_projects(&mut projects, &media).expect("merge");

        let record = &projects[0];
        assert_eq!(record["Poems"].as_array().map(Vec::len), Some(1));
        assert_eq!(record["Poems"][0]["title"], json!("new poem"));
        assert_eq!(record["HasPoems"], json!(true));
        assert_eq!(record["Artworks"].as_array().map(Vec::len), Some(2));
        assert_eq!(record["Outcomes"].as_array().map(Vec::len), Some(2));
        assert!(record.get("HasOutcomes").is_none());
        assert!(record.get("HasMusic").is_none());
    }

    #[test]
    fn merging_twice_duplicates_appended_buckets() {
        let mut projects = vec![empty_record("Alpha")];
        let media = media_for(
            "Alpha",
            json!([
                {"mediaType": "Painting"},
                {"mediaType": "Audio"},
                {"mediaType": "Poem"},
                {"outcomeType": "Workshop"}
            ]),
        );

        merge_projects(&mut projects, &media).expect("first merge");
        merge_projects(&mut projects, &media).expect("second merge");

        let record = &projects[0];
        assert_eq!(record["Artworks"].as_array().map(Vec::len), Some(2));
        assert_eq!(record["Music"].as_array().map(Vec::len), Some(2));
        assert_eq!(record["Outcomes"].as_array().map(Vec::len), Some(2));
        assert_eq!(record["Poems"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn missing_sequence_on_matched_record_is_fatal() {
        let mut projects = vec![json!({"ProjectName": "Alpha"})];
        let media = media_for("Alpha", json!([{"mediaType": "Music"}]));

        let err = merge_projects(&mut projects, &media).expect_err("must fail");
        let merge_err = err.downcast_ref::<MergeError>().expect("merge error");
        assert!(matches!(
            merge_err,
            MergeError::MissingSequence { field: "Music", .. }
        ));
    }

    #[test]
    fn missing_sequence_is_fine_when_bucket_is_empty() {
        let mut projects = vec![json!({"ProjectName": "Alpha", "Poems": []})];
        let media = media_for("Alpha", json!([{"mediaType": "Poem", "poemSpanish": "Hola"}]));

        let summary = merge_projects(&mut projects, &media).expect("merge");
        assert_eq!(summary.merged[0].poems, 1);
        assert_eq!(projects[0]["Poems"][0]["text"], json!("Hola"));
    }

    #[test]
    fn name_match_is_exact() {
        let mut projects = vec![empty_record("alpha"), empty_record("Alpha "), json!("stray")];
        let media = media_for("Alpha", json!([{"mediaType": "Painting"}]));

        let summary = merge_projects(&mut projects, &media).expect("merge");
        assert_eq!(summary.matched, 0);
        assert_eq!(summary.total, 3);
    }
}
