use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
    pub alias: Option<String>,
    /// Only honoured together with `alias`.
    #[serde(default)]
    pub overwrite: bool,
    pub expire_at: Option<Timestamp>,
    pub expires_in_secs: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlResponse {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub expire_at: Option<Timestamp>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlStatsResponse {
    pub code: String,
    pub original_url: String,
    pub created_at: Timestamp,
    pub expire_at: Option<Timestamp>,
    pub expired: bool,
    pub clicks: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
