use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors a handler can return to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidBody(rejection) => {
                tracing::warn!(status = %rejection.status(), error = %rejection.body_text(), "Rejected request body");
                (rejection.status(), rejection.body_text()).into_response()
            }
        }
    }
}

/// Errors raised while building a [`crate::config::ServerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid CORS origin {0:?}")]
    InvalidOrigin(String),

    #[error("`*` cannot be combined with other CORS origins")]
    WildcardInList,
}
