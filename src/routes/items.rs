use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ClothingItem, EnrichRequest},
    routes::AppState,
    services::enrichment,
};

/// Handler for computing an item's embeddings and palette
pub async fn enrich(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<Uuid>,
    Json(request): Json<EnrichRequest>,
) -> AppResult<Json<ClothingItem>> {
    let item = enrichment::enrich_item(
        state.store.as_ref(),
        state.embedder.as_ref(),
        state.color_extractor.as_ref(),
        request.user_id,
        item_id,
    )
    .await?;

    Ok(Json(item))
}
