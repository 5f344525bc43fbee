use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Errors surfaced by the meal store and the HTTP transport.
///
/// Validation failures are not part of this taxonomy: they are caught in the
/// forms before any request is made and never cross the transport.
#[derive(Debug, thiserror::Error)]
pub enum MealError {
    #[error("Meal not found")]
    NotFound,
    #[error("{0}")]
    Store(String),
}

impl From<sqlx::Error> for MealError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => MealError::NotFound,
            other => MealError::Store(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for MealError {
    fn from(e: reqwest::Error) -> Self {
        MealError::Store(e.to_string())
    }
}

/// Wire shape of every non-2xx response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl MealError {
    pub fn status(&self) -> StatusCode {
        match self {
            MealError::NotFound => StatusCode::NOT_FOUND,
            MealError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MealError {
    fn into_response(self) -> axum::response::Response {
        if let MealError::Store(msg) = &self {
            tracing::error!(error = %msg, "store error");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
