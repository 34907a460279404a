use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

use super::Palette;

/// Garment category of a clothing item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Accessories,
    Undergarments,
    Activewear,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Tops,
        Category::Bottoms,
        Category::Dresses,
        Category::Outerwear,
        Category::Shoes,
        Category::Accessories,
        Category::Undergarments,
        Category::Activewear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Dresses => "dresses",
            Category::Outerwear => "outerwear",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
            Category::Undergarments => "undergarments",
            Category::Activewear => "activewear",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown clothing category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A single garment in a user's closet
///
/// `v_image`, `v_text` and `palette` are filled in after creation by the
/// enrichment pipeline; until then the item cannot take part in scoring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClothingItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: Category,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub material: Option<String>,
    pub price: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    /// Visual embedding of the item image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_image: Option<Vec<f32>>,
    /// Text embedding of the item description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_text: Option<Vec<f32>>,
    pub palette: Option<Palette>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub wear_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClothingItem {
    /// Creates a bare item with no attributes, embeddings or palette
    pub fn new(user_id: Uuid, category: Category) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            category,
            name: None,
            brand: None,
            color: None,
            size: None,
            material: None,
            price: None,
            purchase_date: None,
            tags: Vec::new(),
            notes: None,
            image_url: None,
            v_image: None,
            v_text: None,
            palette: None,
            is_favorite: false,
            wear_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_visual_embedding(&self) -> bool {
        self.v_image.is_some()
    }

    /// Free text fed to the text embedding provider
    pub fn description_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.category.as_str()];
        for field in [&self.name, &self.brand, &self.color, &self.material] {
            if let Some(value) = field.as_deref() {
                parts.push(value);
            }
        }
        parts.extend(self.tags.iter().map(String::as_str));
        if let Some(notes) = self.notes.as_deref() {
            parts.push(notes);
        }

        parts
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = "hats".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown clothing category: hats");
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Outerwear).unwrap();
        assert_eq!(json, "\"outerwear\"");
    }

    #[test]
    fn test_new_item_has_no_embedding() {
        let item = ClothingItem::new(Uuid::new_v4(), Category::Tops);
        assert!(!item.has_visual_embedding());
        assert!(item.palette.is_none());
    }

    #[test]
    fn test_description_text_skips_missing_fields() {
        let mut item = ClothingItem::new(Uuid::new_v4(), Category::Shoes);
        item.brand = Some("Acme".to_string());
        item.color = Some("  ".to_string());
        item.tags = vec!["leather".to_string(), "formal".to_string()];

        assert_eq!(item.description_text(), "shoes Acme leather formal");
    }
}
