use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ClothingItem, ItemEnrichment, OutfitSignature},
};

/// Persistence layer the recommendation engine reads from
///
/// Item and outfit mutation is owned by the CRUD layer; the only write here
/// is the enrichment write-back of embeddings and palette.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WardrobeStore: Send + Sync {
    /// Fetch a single item owned by `user_id`
    async fn get_item_by_id(&self, item_id: Uuid, user_id: Uuid)
        -> AppResult<Option<ClothingItem>>;

    /// Fetch every item of the user that has a visual embedding
    async fn get_items_with_embeddings(&self, user_id: Uuid) -> AppResult<Vec<ClothingItem>>;

    /// Fetch the signature and members of every saved outfit of the user
    async fn get_outfit_signatures(&self, user_id: Uuid) -> AppResult<Vec<OutfitSignature>>;

    /// Write embeddings and palette back onto an item
    async fn update_item_enrichment(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        enrichment: &ItemEnrichment,
    ) -> AppResult<()>;
}
