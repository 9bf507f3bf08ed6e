use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Network failure or non-2xx status from the metadata API
    #[error("Transport error{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {})", code),
        None => String::new(),
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return AppError::ExternalApi(format!("Failed to parse response: {}", err));
        }

        AppError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) | AppError::EmptyInput(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Transport { .. } | AppError::ExternalApi(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display_with_status() {
        let err = AppError::Transport {
            status: Some(401),
            message: "Invalid API key".to_string(),
        };
        assert_eq!(err.to_string(), "Transport error (status 401): Invalid API key");
    }

    #[test]
    fn test_transport_display_without_status() {
        let err = AppError::Transport {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_status_mapping() {
        let not_found = AppError::NotFound("movie 42".to_string()).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = AppError::InvalidInput("bad page".to_string()).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let transport = AppError::Transport {
            status: Some(503),
            message: "down".to_string(),
        }
        .into_response();
        assert_eq!(transport.status(), StatusCode::BAD_GATEWAY);
    }
}
