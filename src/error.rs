use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;

use crate::auth::token::TokenError;

/// Every way an API request can fail, each with a fixed status and message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unknown email and wrong password both end up here.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid request body")]
    InvalidBody,
    #[error("{0}")]
    Validation(&'static str),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidBody | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        error!("Database error: {}", err);
        ApiError::Internal
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        error!("{}", err);
        ApiError::Internal
    }
}
