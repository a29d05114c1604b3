//! Query-string deserialization shared by the listing endpoints.

use crate::error::ApiError;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub user_id: Option<i64>,
    pub post_id: Option<String>,
    pub article_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Parse an optional `YYYY-MM-DD` parameter; a malformed value is a 400,
/// not a silently ignored filter.
pub fn parse_date(name: &str, value: &Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ApiError::Validation(format!("Invalid {}; expected YYYY-MM-DD.", name))
            }),
        None => Ok(None),
    }
}
