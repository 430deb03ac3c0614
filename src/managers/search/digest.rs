use serde::{Deserialize, Deserializer};

use crate::constants::digest::SEPARATOR;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default, deserialize_with = "nullable_items")]
    results: Vec<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResult {
    #[serde(default, deserialize_with = "nullable")]
    document: Document,
}

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default, rename = "derivedStructData", deserialize_with = "nullable")]
    derived: DerivedData,
}

/// Backends emit `null` for absent fields as often as they omit them.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A `null` element decodes to the zero value and keeps its slot, so a list of
/// nulls still counts as present.
fn nullable_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items = Option::<Vec<Option<T>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

/// Per-document metadata computed by the backend at index time.
#[derive(Debug, Default, Deserialize)]
pub struct DerivedData {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub link: String,
    #[serde(default, deserialize_with = "nullable_items")]
    pub snippets: Vec<Snippet>,
    #[serde(default, rename = "extractive_segments", deserialize_with = "nullable_items")]
    pub extractive_segments: Vec<ExtractiveSegment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Snippet {
    #[serde(default, deserialize_with = "nullable")]
    pub snippet: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtractiveSegment {
    #[serde(default, deserialize_with = "nullable")]
    pub content: String,
}

/// Text contributed by one result. Extractive segments beat snippets, which
/// beat title/link; a present source suppresses lower ones even when all of
/// its entries are blank.
pub fn result_fragments(derived: &DerivedData) -> Vec<String> {
    if !derived.extractive_segments.is_empty() {
        return non_blank(derived.extractive_segments.iter().map(|s| s.content.as_str()));
    }
    if !derived.snippets.is_empty() {
        return non_blank(derived.snippets.iter().map(|s| s.snippet.as_str()));
    }
    if !derived.title.is_empty() || !derived.link.is_empty() {
        let line = format!("{} - {}", derived.title.trim(), derived.link.trim());
        return vec![line.trim().to_string()];
    }
    Vec::new()
}

fn non_blank<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flattens a raw search reply into the digest. Unparsable input yields "".
pub fn extract_text(raw: &[u8]) -> String {
    let Ok(response) = serde_json::from_slice::<SearchResponse>(raw) else {
        return String::new();
    };
    response
        .results
        .iter()
        .flat_map(|result| result_fragments(&result.document.derived))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
