use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    db::WardrobeStore,
    error::{AppError, AppResult},
    models::{Category, ClothingItem, ItemEnrichment, OutfitSignature, Palette},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

const ITEM_COLUMNS: &str = r#"
    id, user_id, category, name, brand, color, size, material, price,
    purchase_date, tags, notes, image_url, v_image, v_text, palette,
    is_favorite, wear_count, created_at, updated_at
"#;

/// Row shape of the `clothing_items` table
#[derive(Debug, FromRow)]
struct ClothingItemRow {
    id: Uuid,
    user_id: Uuid,
    category: String,
    name: Option<String>,
    brand: Option<String>,
    color: Option<String>,
    size: Option<String>,
    material: Option<String>,
    price: Option<f64>,
    purchase_date: Option<NaiveDate>,
    tags: Vec<String>,
    notes: Option<String>,
    image_url: Option<String>,
    v_image: Option<Vec<f32>>,
    v_text: Option<Vec<f32>>,
    palette: Option<Json<Palette>>,
    is_favorite: bool,
    wear_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClothingItemRow> for ClothingItem {
    type Error = AppError;

    fn try_from(row: ClothingItemRow) -> Result<Self, Self::Error> {
        let category: Category = row
            .category
            .parse()
            .map_err(|e: crate::models::UnknownCategory| AppError::Internal(e.to_string()))?;

        Ok(ClothingItem {
            id: row.id,
            user_id: row.user_id,
            category,
            name: row.name,
            brand: row.brand,
            color: row.color,
            size: row.size,
            material: row.material,
            price: row.price,
            purchase_date: row.purchase_date,
            tags: row.tags,
            notes: row.notes,
            image_url: row.image_url,
            v_image: row.v_image,
            v_text: row.v_text,
            palette: row.palette.map(|Json(p)| p),
            is_favorite: row.is_favorite,
            wear_count: row.wear_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct OutfitSignatureRow {
    signature: String,
    item_ids: Vec<Uuid>,
}

/// `WardrobeStore` backed by PostgreSQL
#[derive(Clone)]
pub struct PgWardrobeStore {
    pool: PgPool,
}

impl PgWardrobeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl WardrobeStore for PgWardrobeStore {
    async fn get_item_by_id(
        &self,
        item_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ClothingItem>> {
        let query = format!(
            "SELECT {} FROM clothing_items WHERE id = $1 AND user_id = $2",
            ITEM_COLUMNS
        );

        let row = sqlx::query_as::<_, ClothingItemRow>(&query)
            .bind(item_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ClothingItem::try_from).transpose()
    }

    async fn get_items_with_embeddings(&self, user_id: Uuid) -> AppResult<Vec<ClothingItem>> {
        let query = format!(
            "SELECT {} FROM clothing_items WHERE user_id = $1 AND v_image IS NOT NULL ORDER BY created_at",
            ITEM_COLUMNS
        );

        let rows = sqlx::query_as::<_, ClothingItemRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(user_id = %user_id, count = rows.len(), "Loaded embedded items");

        rows.into_iter().map(ClothingItem::try_from).collect()
    }

    async fn get_outfit_signatures(&self, user_id: Uuid) -> AppResult<Vec<OutfitSignature>> {
        let rows = sqlx::query_as::<_, OutfitSignatureRow>(
            r#"
            SELECT signature, item_ids
            FROM outfits
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OutfitSignature {
                signature: row.signature,
                member_ids: row.item_ids,
            })
            .collect())
    }

    async fn update_item_enrichment(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        enrichment: &ItemEnrichment,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE clothing_items
            SET v_image = $3, v_text = $4, palette = $5, updated_at = now()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .bind(&enrichment.v_image)
        .bind(&enrichment.v_text)
        .bind(Json(&enrichment.palette))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("clothing item {}", item_id)));
        }

        Ok(())
    }
}
