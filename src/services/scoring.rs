use crate::{
    error::{AppError, AppResult},
    models::{ClothingItem, ScoredItem},
    services::{color::compare_colors, similarity::cosine_similarity},
};

/// Weight of the color harmony verdict in the final score
pub const COLOR_WEIGHT: f64 = 0.7;

/// Weight of the visual embedding similarity in the final score
pub const EMBEDDING_WEIGHT: f64 = 0.2;

/// Relative weights of the scoring signals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub color: f64,
    pub embedding: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            color: COLOR_WEIGHT,
            embedding: EMBEDDING_WEIGHT,
        }
    }
}

/// Scores each candidate against the base item
///
/// Candidates without a visual embedding or a palette are dropped. The
/// remaining ones keep their input order; ranking is left to the caller.
///
/// Fails with `InvalidPalette` if the base item has no palette, or if either
/// palette lacks a vibrant swatch, as soon as there is a candidate to score.
pub fn calculate_outfit_score(
    candidates: Vec<ClothingItem>,
    base_item: &ClothingItem,
    weights: &ScoringWeights,
) -> AppResult<Vec<ScoredItem>> {
    let mut scored = Vec::with_capacity(candidates.len());

    for item in candidates {
        let (Some(v_image), Some(palette)) = (item.v_image.as_deref(), item.palette.as_ref())
        else {
            continue;
        };

        let base_palette = base_item.palette.as_ref().ok_or_else(|| {
            AppError::InvalidPalette(format!("base item {} has no palette", base_item.id))
        })?;

        let similarity = cosine_similarity(base_item.v_image.as_deref(), Some(v_image));
        let comparison = compare_colors(base_palette, palette)?;

        let cosine_similarity = similarity * weights.embedding;
        let color_cohesion = comparison.verdict * weights.color;

        scored.push(ScoredItem {
            item,
            cosine_similarity,
            color_cohesion,
            final_score: cosine_similarity + color_cohesion,
        });
    }

    Ok(scored)
}
