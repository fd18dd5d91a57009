use opentelemetry::{global, metrics::Counter};

/// Handles shared by every request. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub users_created_counter: Counter<u64>,
    pub users_served_counter: Counter<u64>,
}

impl AppState {
    /// Builds the instruments from the global meter provider.
    ///
    /// Without an installed provider the counters are no-ops.
    pub fn new() -> Self {
        let meter = global::meter("user-service");
        Self {
            users_created_counter: meter
                .u64_counter("users.created")
                .with_description("Users built from POST /api/users")
                .build(),
            users_served_counter: meter
                .u64_counter("users.served")
                .with_description("Users returned by GET /api/user")
                .build(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
