use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    db::WardrobeStore,
    error::AppResult,
    models::{outfit_signature, ClothingItem, OutfitSignature},
    services::{recommendations::build_outfit_from_base, scoring::ScoringWeights},
};

/// Default cap on rebuilds while searching for an unsaved outfit
pub const DEFAULT_MAX_ATTEMPTS: usize = 25;

/// Composes a complete outfit that does not duplicate a saved one
///
/// Each attempt takes the base item plus the top pick of every complementary
/// category. When the result matches a saved outfit's signature, that
/// outfit's members are added to the exclusions and the outfit is rebuilt.
///
/// The exclusion set grows on every retry. If a collision adds no new
/// exclusions, or `max_attempts` builds have been made, the last outfit built
/// is returned even though it duplicates a saved one.
pub async fn generate_complete_outfit(
    store: &dyn WardrobeStore,
    weights: &ScoringWeights,
    user_id: Uuid,
    base_item_id: Uuid,
    exclude_ids: &[Uuid],
    max_attempts: usize,
) -> AppResult<Vec<ClothingItem>> {
    let saved = store.get_outfit_signatures(user_id).await?;
    let by_signature: HashMap<&str, &OutfitSignature> = saved
        .iter()
        .map(|outfit| (outfit.signature.as_str(), outfit))
        .collect();

    let mut excluded: Vec<Uuid> = Vec::with_capacity(exclude_ids.len());
    merge_exclusions(&mut excluded, exclude_ids);

    let mut attempt = 0;
    loop {
        attempt += 1;

        let recommendation =
            build_outfit_from_base(store, weights, user_id, base_item_id, &excluded).await?;
        let outfit = recommendation.top_picks();
        let signature = outfit_signature(outfit.iter().map(|item| &item.id));

        let Some(duplicate) = by_signature.get(signature.as_str()) else {
            tracing::info!(
                user_id = %user_id,
                base_item_id = %base_item_id,
                attempts = attempt,
                items = outfit.len(),
                "Generated unique outfit"
            );
            return Ok(outfit);
        };

        if attempt >= max_attempts.max(1) {
            tracing::warn!(
                user_id = %user_id,
                base_item_id = %base_item_id,
                attempts = attempt,
                "Attempt limit reached, returning duplicate outfit"
            );
            return Ok(outfit);
        }

        let added = merge_exclusions(&mut excluded, &duplicate.member_ids);
        if added == 0 {
            tracing::warn!(
                user_id = %user_id,
                base_item_id = %base_item_id,
                attempts = attempt,
                "Candidates exhausted, returning duplicate outfit"
            );
            return Ok(outfit);
        }

        tracing::debug!(
            signature = %signature,
            added,
            excluded = excluded.len(),
            "Outfit matches a saved one, rebuilding"
        );
    }
}

/// Appends ids not yet present and returns how many were added
fn merge_exclusions(excluded: &mut Vec<Uuid>, ids: &[Uuid]) -> usize {
    let before = excluded.len();
    for id in ids {
        if !excluded.contains(id) {
            excluded.push(*id);
        }
    }
    excluded.len() - before
}
