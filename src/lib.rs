pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod otel;
pub mod routes;
pub mod state;
pub mod telemetry;
