use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod clothing_item;
pub mod outfit;
pub mod palette;

pub use clothing_item::{Category, ClothingItem, UnknownCategory};
pub use outfit::{outfit_signature, Outfit, OutfitSignature};
pub use palette::{Palette, Swatch};

/// A candidate item with its score against a base item
///
/// Only lives for a single recommendation pass.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: ClothingItem,
    /// Weighted cosine similarity of the visual embeddings
    pub cosine_similarity: f64,
    /// Weighted color harmony verdict
    pub color_cohesion: f64,
    pub final_score: f64,
}

/// Ranked candidates for one complementary category
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRecommendation {
    pub category: Category,
    pub items: Vec<ScoredItem>,
}

/// Result of building recommendations around a base item
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutfitRecommendation {
    pub base_item: ClothingItem,
    pub recommendations: Vec<CategoryRecommendation>,
}

impl OutfitRecommendation {
    /// The base item followed by the best item of every category
    pub fn top_picks(&self) -> Vec<ClothingItem> {
        std::iter::once(self.base_item.clone())
            .chain(
                self.recommendations
                    .iter()
                    .filter_map(|rec| rec.items.first())
                    .map(|scored| scored.item.clone()),
            )
            .collect()
    }
}

/// Embeddings and palette written back onto an item after enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEnrichment {
    pub v_image: Vec<f32>,
    pub v_text: Vec<f32>,
    pub palette: Palette,
}

/// Request body shared by the recommendation and outfit generation endpoints
#[derive(Debug, Deserialize)]
pub struct OutfitRequest {
    pub user_id: Uuid,
    pub base_item_id: Uuid,
    #[serde(default)]
    pub exclude_ids: Vec<Uuid>,
}

/// Response for a generated outfit
#[derive(Debug, Serialize)]
pub struct GeneratedOutfitResponse {
    pub items: Vec<ClothingItem>,
    pub signature: String,
}

#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    pub user_id: Uuid,
}
