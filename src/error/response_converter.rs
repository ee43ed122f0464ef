use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::AppError;

/// Error body shape returned by the marketplace backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Utility for converting HTTP-level failures into structured AppError variants.
///
/// The backend wraps every error as `{ "success": false, "message": "..." }`,
/// but proxies in front of it may answer with plain text or an empty body, so
/// message extraction is best-effort.
pub struct ResponseErrorConverter;

impl ResponseErrorConverter {
    /// Converts a non-success status and its raw body to an AppError.
    ///
    /// # Arguments
    /// * `status` - HTTP status returned by the backend
    /// * `body` - Raw response body (may be empty or non-JSON)
    pub fn convert_status(status: StatusCode, body: &str) -> AppError {
        let fallback = status.canonical_reason().unwrap_or("Unknown error");
        Self::convert_status_or(status, body, fallback)
    }

    /// Same as [`convert_status`](Self::convert_status) but with a caller-chosen
    /// message when the body carries none.
    pub fn convert_status_or(status: StatusCode, body: &str, fallback: &str) -> AppError {
        let message = Self::extract_message(body).unwrap_or_else(|| fallback.to_string());

        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized { message },
            StatusCode::FORBIDDEN => AppError::Forbidden { message },
            _ => AppError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Converts a reqwest error raised while sending or reading a request.
    pub fn convert_transport(error: reqwest::Error, operation: &str) -> AppError {
        if error.is_decode() {
            return AppError::Decode {
                operation: operation.to_string(),
                source: error.into(),
            };
        }
        AppError::Transport {
            operation: operation.to_string(),
            source: error.into(),
        }
    }

    /// Converts a JSON decoding failure of an otherwise successful response.
    pub fn convert_decode(error: serde_json::Error, operation: &str) -> AppError {
        AppError::Decode {
            operation: operation.to_string(),
            source: error.into(),
        }
    }

    fn extract_message(body: &str) -> Option<String> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<ErrorBody>(trimmed) {
            Ok(parsed) => parsed
                .message
                .or(parsed.error)
                .filter(|m| !m.trim().is_empty()),
            // Plain-text bodies are only trusted when short enough to be a message
            Err(_) if trimmed.len() <= 200 && !trimmed.starts_with('<') => {
                Some(trimmed.to_string())
            }
            Err(_) => None,
        }
    }
}
