use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    db::WardrobeStore,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{
        outfit_generator::DEFAULT_MAX_ATTEMPTS,
        providers::{ColorExtractor, EmbeddingProvider},
        scoring::ScoringWeights,
    },
};

pub mod items;
pub mod outfits;
pub mod recommendations;

/// Shared handles for request handlers
pub struct AppState {
    pub store: Arc<dyn WardrobeStore>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub color_extractor: Arc<dyn ColorExtractor>,
    pub weights: ScoringWeights,
    pub max_outfit_attempts: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn WardrobeStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        color_extractor: Arc<dyn ColorExtractor>,
    ) -> Self {
        Self {
            store,
            embedder,
            color_extractor,
            weights: ScoringWeights::default(),
            max_outfit_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_max_outfit_attempts(mut self, max_outfit_attempts: usize) -> Self {
        self.max_outfit_attempts = max_outfit_attempts;
        self
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/outfits/generate", post(outfits::generate))
        .route("/items/:item_id/enrich", post(items::enrich))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
