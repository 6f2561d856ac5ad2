use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::logging::LoggedJson;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("upstream unavailable: {message}")]
    BadGateway { message: String },
    #[error("internal error")]
    Internal { message: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::BadGateway {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadGateway { message } => {
                tracing::warn!(error = %message, "asset upstream request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "bad_gateway",
                    "asset dev server unavailable".to_string(),
                )
            }
            Self::Internal { message } => {
                tracing::error!(error = %message, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };

        // LoggedJson keeps error payloads visible to the access log
        (
            status,
            LoggedJson(ErrorResponse {
                code: code.to_string(),
                message,
            }),
        )
            .into_response()
    }
}
