use axum::{
    Router,
    routing::{get, post},
};
use axum_tracing_opentelemetry::middleware::OtelAxumLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::handlers::{create_user, get_user, hello};
use crate::state::AppState;

pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/user", get(get_user))
        .route("/users", post(create_user));

    Router::new()
        .route("/", get(hello))
        .nest("/api", api)
        .with_state(state)
        .layer(config.cors.layer())
        .layer(OtelAxumLayer::default())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
