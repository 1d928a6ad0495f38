//! Browser form and JSON endpoints around the generator.

mod page;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::GeneratorConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GeneratorConfig>,
}

impl AppState {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// All routes, with request tracing.
pub fn app(state: AppState) -> Router {
    routes::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
