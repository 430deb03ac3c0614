use serde::Serialize;
use serde_json::Value;

use crate::constants::limits::DEFAULT_EXTRACTIVE_SEGMENT_COUNT;
use crate::errors::SearchError;

const MISSING_QUERY: &str = "missing required argument: query";

/// Validated arguments of one `search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    query: String,
    max_extractive_segment_count: i64,
}

impl ToolCall {
    pub fn from_args(args: &Value) -> Result<Self, SearchError> {
        let query = args
            .get("query")
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| SearchError::validation(MISSING_QUERY))?;

        let requested = args
            .get("maxExtractiveSegmentCount")
            .and_then(read_count)
            .unwrap_or(DEFAULT_EXTRACTIVE_SEGMENT_COUNT);

        Ok(Self {
            query: query.to_string(),
            max_extractive_segment_count: requested.max(1),
        })
    }

    /// Exactly as received; trimming only applies to the blank check.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn max_extractive_segment_count(&self) -> i64 {
        self.max_extractive_segment_count
    }
}

/// Integers are taken as-is, fractional numbers are truncated, anything else is ignored.
fn read_count(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|number| number.trunc() as i64))
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    #[serde(rename = "contentSearchSpec", skip_serializing_if = "Option::is_none")]
    pub content_search_spec: Option<ContentSearchSpec>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContentSearchSpec {
    #[serde(rename = "snippetSpec", skip_serializing_if = "Option::is_none")]
    pub snippet_spec: Option<SnippetSpec>,
    #[serde(
        rename = "extractiveContentSpec",
        skip_serializing_if = "Option::is_none"
    )]
    pub extractive_content_spec: Option<ExtractiveContentSpec>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SnippetSpec {
    #[serde(rename = "returnSnippet")]
    pub return_snippet: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtractiveContentSpec {
    #[serde(rename = "maxExtractiveSegmentCount")]
    pub max_extractive_segment_count: i64,
}

/// Snippets are always requested so results without extractive segments still
/// have text to fall back on.
pub fn build_request(call: &ToolCall) -> SearchRequest {
    SearchRequest {
        query: call.query().to_string(),
        content_search_spec: Some(ContentSearchSpec {
            snippet_spec: Some(SnippetSpec {
                return_snippet: true,
            }),
            extractive_content_spec: Some(ExtractiveContentSpec {
                max_extractive_segment_count: call.max_extractive_segment_count(),
            }),
        }),
    }
}
