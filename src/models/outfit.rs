use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator between member ids in an outfit signature
pub const SIGNATURE_DELIMITER: &str = ",";

/// Builds the canonical, order-independent signature for a set of item ids
///
/// Ids are rendered as strings, sorted and joined. An empty set yields an
/// empty signature.
pub fn outfit_signature<'a, I>(item_ids: I) -> String
where
    I: IntoIterator<Item = &'a Uuid>,
{
    let mut ids: Vec<String> = item_ids.into_iter().map(Uuid::to_string).collect();
    ids.sort();
    ids.join(SIGNATURE_DELIMITER)
}

/// A saved combination of clothing items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outfit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub item_ids: Vec<Uuid>,
    /// Always derived from `item_ids`
    pub signature: String,
    pub description: Option<String>,
    pub occasion: Option<String>,
    pub season: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub wear_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Outfit {
    pub fn new(user_id: Uuid, name: String, item_ids: Vec<Uuid>) -> Self {
        let now = Utc::now();
        let signature = outfit_signature(&item_ids);
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            item_ids,
            signature,
            description: None,
            occasion: None,
            season: None,
            is_favorite: false,
            wear_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_signature(&self) -> OutfitSignature {
        OutfitSignature {
            signature: self.signature.clone(),
            member_ids: self.item_ids.clone(),
        }
    }
}

/// Projection of a stored outfit used for duplicate detection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutfitSignature {
    pub signature: String,
    pub member_ids: Vec<Uuid>,
}
