//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// `201 Created` body of `POST /accounts/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponseDto {
    pub message: String,
    pub credential: String,
}

/// Error body shared by HTTP endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub detail: String,
}

impl ErrorResponseDto {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
