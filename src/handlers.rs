use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::error::ApiError;
use crate::models::{CreateUserRequest, User};
use crate::state::AppState;

pub async fn hello() -> &'static str {
    "Hello, World!"
}

#[tracing::instrument(skip_all)]
pub async fn get_user(State(state): State<AppState>) -> impl IntoResponse {
    let user = User::new("John", "Doe");
    state.users_served_counter.add(1, &[]);
    tracing::debug!(id = %user.id, "Serving user");

    (StatusCode::OK, Json(user))
}

#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let user = User::from(body);
    state.users_created_counter.add(1, &[]);
    tracing::info!(id = %user.id, "Created user");

    Ok((StatusCode::OK, Json(user)))
}
