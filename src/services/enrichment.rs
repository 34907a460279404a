use uuid::Uuid;

use crate::{
    db::WardrobeStore,
    error::{AppError, AppResult},
    models::{ClothingItem, ItemEnrichment},
    services::providers::{ColorExtractor, EmbeddingProvider},
};

/// Populates an item's embeddings and palette from its image and attributes
///
/// The image embedding, palette extraction and text embedding run
/// concurrently. Nothing is written unless all three succeed and the palette
/// carries a vibrant swatch.
pub async fn enrich_item(
    store: &dyn WardrobeStore,
    embedder: &dyn EmbeddingProvider,
    color_extractor: &dyn ColorExtractor,
    user_id: Uuid,
    item_id: Uuid,
) -> AppResult<ClothingItem> {
    let mut item = store
        .get_item_by_id(item_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("clothing item {}", item_id)))?;

    let image_url = item
        .image_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput(format!("clothing item {} has no image", item_id))
        })?;
    let description = item.description_text();

    tracing::info!(
        item_id = %item_id,
        embedder = embedder.name(),
        color_extractor = color_extractor.name(),
        "Enriching clothing item"
    );

    let (v_image, palette, v_text) = tokio::try_join!(
        embedder.embed_image(&image_url),
        color_extractor.extract_palette(&image_url),
        embedder.embed_text(&description),
    )?;

    if palette.vibrant.is_none() {
        return Err(AppError::InvalidPalette(format!(
            "no vibrant swatch extracted for clothing item {}",
            item_id
        )));
    }

    let enrichment = ItemEnrichment {
        v_image,
        v_text,
        palette,
    };
    store
        .update_item_enrichment(item_id, user_id, &enrichment)
        .await?;

    tracing::info!(
        item_id = %item_id,
        image_dimensions = enrichment.v_image.len(),
        text_dimensions = enrichment.v_text.len(),
        "Clothing item enriched"
    );

    item.v_image = Some(enrichment.v_image);
    item.v_text = Some(enrichment.v_text);
    item.palette = Some(enrichment.palette);
    Ok(item)
}
