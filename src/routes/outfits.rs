use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{outfit_signature, GeneratedOutfitResponse, OutfitRequest},
    routes::AppState,
    services::outfit_generator,
};

/// Handler for generating a complete outfit that is not already saved
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<OutfitRequest>,
) -> AppResult<Json<GeneratedOutfitResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %request.user_id,
        base_item_id = %request.base_item_id,
        "Processing outfit generation request"
    );

    let items = outfit_generator::generate_complete_outfit(
        state.store.as_ref(),
        &state.weights,
        request.user_id,
        request.base_item_id,
        &request.exclude_ids,
        state.max_outfit_attempts,
    )
    .await?;

    let signature = outfit_signature(items.iter().map(|item| &item.id));

    tracing::info!(
        request_id = %request_id,
        items = items.len(),
        "Outfit generated"
    );

    Ok(Json(GeneratedOutfitResponse { items, signature }))
}
