use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{OutfitRecommendation, OutfitRequest},
    routes::AppState,
    services::recommendations,
};

/// Handler for ranked recommendations around a base item
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<OutfitRequest>,
) -> AppResult<Json<OutfitRecommendation>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %request.user_id,
        base_item_id = %request.base_item_id,
        exclude_count = request.exclude_ids.len(),
        "Processing recommendation request"
    );

    let recommendation = recommendations::build_outfit_from_base(
        state.store.as_ref(),
        &state.weights,
        request.user_id,
        request.base_item_id,
        &request.exclude_ids,
    )
    .await?;

    Ok(Json(recommendation))
}
