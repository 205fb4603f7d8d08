//! HTTP surface: shared request/response types and the axum front door.

pub mod axum;

use serde::{Deserialize, Serialize};

use crate::GuardError;

/// JSON body for listing and prefix-search responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub content: Vec<String>,
}

/// JSON body for a single-article fetch.
///
/// `content` is empty when the title does not resolve to a stored
/// article; a rejected path and an absent article answer identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub content: String,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<GuardError> for ErrorResponse {
    fn from(err: GuardError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
