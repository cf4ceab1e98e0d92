use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::insights::ArticleSummary;
use crate::search::engine::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SearchRequest};
use crate::search::filters::FilterSpec;

/// `POST /api/search` body. `query` is kept loose so a non-string value
/// reports the same validation error as a missing one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub query: Option<Value>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub filters: Option<FilterSpec>,
}

impl SearchBody {
    /// Normalized request, or `None` when `query` is missing, blank, or not a string.
    pub fn into_request(self) -> Option<SearchRequest> {
        let query = match self.query {
            Some(Value::String(q)) if !q.trim().is_empty() => q,
            _ => return None,
        };
        Some(SearchRequest {
            query,
            page: clamp_u32(self.page.unwrap_or(1), 1, u32::MAX),
            page_size: clamp_u32(
                self.page_size.unwrap_or(i64::from(DEFAULT_PAGE_SIZE)),
                1,
                MAX_PAGE_SIZE,
            ),
            filters: self.filters.unwrap_or_default(),
        })
    }
}

fn clamp_u32(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(i64::from(min), i64::from(max)) as u32
}

/// `POST /api/summary` body.
#[derive(Debug, Deserialize)]
pub struct SummaryBody {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    /// Echoed back unchanged; callers send it as a string or a number.
    #[serde(default)]
    pub pmid: Value,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub success: bool,
    pub pmid: Value,
    #[serde(flatten)]
    pub summary: ArticleSummary,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
