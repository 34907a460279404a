use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    db::WardrobeStore,
    error::{AppError, AppResult},
    models::{CategoryRecommendation, ClothingItem, OutfitRecommendation},
    services::{
        complements::complementary_categories,
        scoring::{calculate_outfit_score, ScoringWeights},
    },
};

/// Maximum number of ranked items returned per category
pub const RECOMMENDATIONS_PER_CATEGORY: usize = 3;

/// Builds ranked recommendations around a base item
///
/// For each category that complements the base item, candidates from the
/// user's embedded items are scored against it and the best
/// `RECOMMENDATIONS_PER_CATEGORY` are kept. The base item and any id in
/// `exclude_ids` are never recommended. Categories left without candidates
/// are omitted rather than returned empty.
pub async fn build_outfit_from_base(
    store: &dyn WardrobeStore,
    weights: &ScoringWeights,
    user_id: Uuid,
    base_item_id: Uuid,
    exclude_ids: &[Uuid],
) -> AppResult<OutfitRecommendation> {
    let base_item = store
        .get_item_by_id(base_item_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("clothing item {}", base_item_id)))?;

    if !base_item.has_visual_embedding() {
        return Err(AppError::MissingEmbedding(format!(
            "clothing item {} has not been processed yet",
            base_item_id
        )));
    }

    let complements = complementary_categories(base_item.category);
    if complements.is_empty() {
        tracing::debug!(
            base_item_id = %base_item_id,
            category = %base_item.category,
            "Category has no complements"
        );
        return Ok(OutfitRecommendation {
            base_item,
            recommendations: Vec::new(),
        });
    }

    let pool = store.get_items_with_embeddings(user_id).await?;
    let excluded: HashSet<Uuid> = exclude_ids.iter().copied().collect();

    let mut recommendations = Vec::with_capacity(complements.len());

    for &category in complements {
        let candidates: Vec<ClothingItem> = pool
            .iter()
            .filter(|item| {
                item.category == category
                    && item.id != base_item.id
                    && !excluded.contains(&item.id)
            })
            .cloned()
            .collect();

        if candidates.is_empty() {
            continue;
        }

        let mut scored = calculate_outfit_score(candidates, &base_item, weights)?;
        if scored.is_empty() {
            continue;
        }

        // Stable sort keeps input order for equal scores
        scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
        scored.truncate(RECOMMENDATIONS_PER_CATEGORY);

        recommendations.push(CategoryRecommendation {
            category,
            items: scored,
        });
    }

    tracing::info!(
        user_id = %user_id,
        base_item_id = %base_item_id,
        pool_size = pool.len(),
        excluded = excluded.len(),
        categories = recommendations.len(),
        "Built outfit recommendations"
    );

    Ok(OutfitRecommendation {
        base_item,
        recommendations,
    })
}
