use std::backtrace::{Backtrace, BacktraceStatus};

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_derive::Serialize;

#[derive(Debug)]
pub enum ServerError {
    NotFound(String),
    InvalidParameter(String),
    Internal(String),
    /// An internal error that also reports where it came from.
    InternalWithTrace { error: String, traceback: String },
}

#[derive(Serialize)]
struct JsonErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    traceback: Option<String>,
}

impl ServerError {
    /// Report the error together with its chain of causes and a stack backtrace.
    pub fn with_traceback(err: impl Into<anyhow::Error>) -> Self {
        let err = err.into();
        let mut traceback = format!("{err:?}");
        if err.backtrace().status() != BacktraceStatus::Captured {
            traceback.push_str("\n\nStack backtrace:\n");
            traceback.push_str(&Backtrace::force_capture().to_string());
        }
        ServerError::InternalWithTrace {
            error: err.to_string(),
            traceback,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error, traceback) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ServerError::InvalidParameter(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            ServerError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ServerError::InternalWithTrace { error, traceback } => {
                (StatusCode::INTERNAL_SERVER_ERROR, error, Some(traceback))
            }
        };

        tracing::error!(
            status = status.as_u16(),
            body = %error,
            error = true,
            "returning error response"
        );
        (status, Json(JsonErrorResponse { error, traceback })).into_response()
    }
}

impl From<query_engine_execution::Error> for ServerError {
    fn from(value: query_engine_execution::Error) -> Self {
        ServerError::Internal(value.to_string())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        ServerError::InvalidParameter(value.body_text())
    }
}
