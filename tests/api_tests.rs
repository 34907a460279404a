use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use closet_api::{
    db::WardrobeStore,
    error::{AppError, AppResult},
    models::{
        outfit_signature, Category, ClothingItem, ItemEnrichment, Outfit, OutfitSignature,
        Palette,
    },
    routes::{create_router, AppState},
    services::providers::{ColorExtractor, EmbeddingProvider},
};

/// Store backed by vectors, shared with the test through `Arc`
#[derive(Default)]
struct InMemoryStore {
    items: Mutex<Vec<ClothingItem>>,
    outfits: Mutex<Vec<Outfit>>,
}

#[async_trait::async_trait]
impl WardrobeStore for InMemoryStore {
    async fn get_item_by_id(
        &self,
        item_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ClothingItem>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .find(|item| item.id == item_id && item.user_id == user_id)
            .cloned())
    }

    async fn get_items_with_embeddings(&self, user_id: Uuid) -> AppResult<Vec<ClothingItem>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|item| item.user_id == user_id && item.v_image.is_some())
            .cloned()
            .collect())
    }

    async fn get_outfit_signatures(&self, user_id: Uuid) -> AppResult<Vec<OutfitSignature>> {
        let outfits = self.outfits.lock().unwrap();
        Ok(outfits
            .iter()
            .filter(|outfit| outfit.user_id == user_id)
            .map(Outfit::to_signature)
            .collect())
    }

    async fn update_item_enrichment(
        &self,
        item_id: Uuid,
        user_id: Uuid,
        enrichment: &ItemEnrichment,
    ) -> AppResult<()> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|item| item.id == item_id && item.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("clothing item {}", item_id)))?;

        item.v_image = Some(enrichment.v_image.clone());
        item.v_text = Some(enrichment.v_text.clone());
        item.palette = Some(enrichment.palette.clone());
        Ok(())
    }
}

struct FixedEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for FixedEmbedder {
    async fn embed_image(&self, _image_url: &str) -> AppResult<Vec<f32>> {
        Ok(vec![0.6, 0.8])
    }

    async fn embed_text(&self, text: &str) -> AppResult<Vec<f32>> {
        Ok(vec![text.len() as f32])
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

struct FixedColors;

#[async_trait::async_trait]
impl ColorExtractor for FixedColors {
    async fn extract_palette(&self, _image_url: &str) -> AppResult<Palette> {
        Ok(Palette::vibrant(30, 60, 200))
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

fn embedded(
    user_id: Uuid,
    category: Category,
    v_image: Vec<f32>,
    rgb: (u8, u8, u8),
) -> ClothingItem {
    let mut item = ClothingItem::new(user_id, category);
    item.v_image = Some(v_image);
    item.palette = Some(Palette::vibrant(rgb.0, rgb.1, rgb.2));
    item
}

fn create_test_server(store: Arc<InMemoryStore>) -> TestServer {
    let state = AppState::new(store, Arc::new(FixedEmbedder), Arc::new(FixedColors));
    let app = create_router(Arc::new(state));
    TestServer::new(app).unwrap()
}

fn ids(values: &Value) -> Vec<String> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(Arc::new(InMemoryStore::default()));
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(Arc::new(InMemoryStore::default()));
    let request_id = Uuid::new_v4().to_string();

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_str(&request_id).unwrap(),
        )
        .await;

    assert_eq!(response.header("x-request-id"), request_id.as_str());
}

#[tokio::test]
async fn test_outerwear_recommendations() {
    let user_id = Uuid::new_v4();
    let store = Arc::new(InMemoryStore::default());
    let base = embedded(user_id, Category::Outerwear, vec![1.0, 0.0], (200, 30, 30));

    {
        let mut items = store.items.lock().unwrap();
        items.push(base.clone());
        for category in [
            Category::Tops,
            Category::Bottoms,
            Category::Shoes,
            Category::Accessories,
        ] {
            for i in 0..4 {
                items.push(embedded(
                    user_id,
                    category,
                    vec![1.0, i as f32],
                    (200, 30 + i * 30, 30),
                ));
            }
        }
        // Not yet enriched; never recommended
        items.push(ClothingItem::new(user_id, Category::Tops));
    }

    let server = create_test_server(store);
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "user_id": user_id, "base_item_id": base.id }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["base_item"]["id"], json!(base.id));

    let recommendations = body["recommendations"].as_array().unwrap();
    let categories: Vec<&str> = recommendations
        .iter()
        .map(|rec| rec["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["tops", "bottoms", "shoes"]);

    for rec in recommendations {
        let items = rec["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        let scores: Vec<f64> = items
            .iter()
            .map(|item| item["final_score"].as_f64().unwrap())
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}

#[tokio::test]
async fn test_undergarments_have_no_recommendations() {
    let user_id = Uuid::new_v4();
    let store = Arc::new(InMemoryStore::default());
    let base = embedded(user_id, Category::Undergarments, vec![1.0], (10, 10, 200));
    store.items.lock().unwrap().extend([
        base.clone(),
        embedded(user_id, Category::Tops, vec![1.0], (10, 10, 200)),
        embedded(user_id, Category::Shoes, vec![1.0], (10, 10, 200)),
    ]);

    let server = create_test_server(store);
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "user_id": user_id, "base_item_id": base.id }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn test_unknown_base_item_is_404() {
    let server = create_test_server(Arc::new(InMemoryStore::default()));
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "user_id": Uuid::new_v4(), "base_item_id": Uuid::new_v4() }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_other_users_item_is_404() {
    let owner = Uuid::new_v4();
    let store = Arc::new(InMemoryStore::default());
    let base = embedded(owner, Category::Tops, vec![1.0], (200, 0, 0));
    store.items.lock().unwrap().push(base.clone());

    let server = create_test_server(store);
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "user_id": Uuid::new_v4(), "base_item_id": base.id }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unprocessed_base_item_is_conflict() {
    let user_id = Uuid::new_v4();
    let store = Arc::new(InMemoryStore::default());
    let base = ClothingItem::new(user_id, Category::Tops);
    store.items.lock().unwrap().push(base.clone());

    let server = create_test_server(store);
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "user_id": user_id, "base_item_id": base.id }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_generate_skips_saved_outfit() {
    let user_id = Uuid::new_v4();
    let store = Arc::new(InMemoryStore::default());
    let base = embedded(user_id, Category::Tops, vec![1.0, 0.0], (200, 0, 0));
    let best_bottom = embedded(user_id, Category::Bottoms, vec![1.0, 0.0], (200, 0, 0));
    let other_bottom = embedded(user_id, Category::Bottoms, vec![0.0, 1.0], (200, 100, 0));
    let best_shoe = embedded(user_id, Category::Shoes, vec![1.0, 0.0], (200, 0, 0));
    let other_shoe = embedded(user_id, Category::Shoes, vec![0.0, 1.0], (200, 100, 0));

    store.items.lock().unwrap().extend([
        base.clone(),
        best_bottom.clone(),
        other_bottom.clone(),
        best_shoe.clone(),
        other_shoe.clone(),
    ]);
    // Saved in a different order than the generator would compose it
    let saved = Outfit::new(
        user_id,
        "Date night".to_string(),
        vec![best_shoe.id, base.id, best_bottom.id],
    );
    store.outfits.lock().unwrap().push(saved.clone());

    let server = create_test_server(store);
    let response = server
        .post("/api/v1/outfits/generate")
        .json(&json!({ "user_id": user_id, "base_item_id": base.id }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();

    let expected = vec![
        base.id.to_string(),
        other_bottom.id.to_string(),
        other_shoe.id.to_string(),
    ];
    assert_eq!(ids(&body["items"]), expected);
    assert_ne!(body["signature"], json!(saved.signature));
    assert_eq!(
        body["signature"],
        json!(outfit_signature(&[base.id, other_bottom.id, other_shoe.id]))
    );
}

#[tokio::test]
async fn test_enrich_then_recommend() {
    let user_id = Uuid::new_v4();
    let store = Arc::new(InMemoryStore::default());

    let mut shirt = ClothingItem::new(user_id, Category::Tops);
    shirt.image_url = Some("https://img.example/shirt.jpg".to_string());
    let trousers = embedded(user_id, Category::Bottoms, vec![0.6, 0.8], (30, 60, 200));
    store
        .items
        .lock()
        .unwrap()
        .extend([shirt.clone(), trousers.clone()]);

    let server = create_test_server(store.clone());

    let response = server
        .post(&format!("/api/v1/items/{}/enrich", shirt.id))
        .json(&json!({ "user_id": user_id }))
        .await;
    response.assert_status_ok();
    let enriched: Value = response.json();
    assert_eq!(enriched["palette"]["Vibrant"]["rgb"], json!([30, 60, 200]));

    let stored = store
        .get_item_by_id(shirt.id, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.v_image, Some(vec![0.6, 0.8]));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "user_id": user_id, "base_item_id": shirt.id }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommendations"][0]["category"], "bottoms");
    assert_eq!(
        ids(&body["recommendations"][0]["items"]),
        vec![trousers.id.to_string()]
    );
}

#[tokio::test]
async fn test_enrich_without_image_is_bad_request() {
    let user_id = Uuid::new_v4();
    let store = Arc::new(InMemoryStore::default());
    let item = ClothingItem::new(user_id, Category::Shoes);
    store.items.lock().unwrap().push(item.clone());

    let server = create_test_server(store);
    let response = server
        .post(&format!("/api/v1/items/{}/enrich", item.id))
        .json(&json!({ "user_id": user_id }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
