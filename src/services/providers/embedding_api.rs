//! HTTP embedding provider
//!
//! API Flow:
//! 1. Image: POST /embed/image {"image_url"} → {"embedding": [...]}
//! 2. Text:  POST /embed/text  {"text"}      → {"embedding": [...]}
//!
//! Responses are cached by input for a week; the same image always maps to
//! the same vector.

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    services::providers::{ensure_success, EmbeddingProvider},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

const EMBEDDING_CACHE_TTL: u64 = 604800; // 1 week
const PROVIDER_NAME: &str = "embedding-api";

#[derive(Debug, Serialize)]
struct ImageEmbeddingRequest<'a> {
    image_url: &'a str,
}

#[derive(Debug, Serialize)]
struct TextEmbeddingRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

impl EmbeddingResponse {
    fn into_vector(self) -> AppResult<Vec<f32>> {
        if self.embedding.is_empty() {
            return Err(AppError::ExternalApi(
                "Embedding API returned an empty vector".to_string(),
            ));
        }
        if self.embedding.iter().any(|x| !x.is_finite()) {
            return Err(AppError::ExternalApi(
                "Embedding API returned a non-finite component".to_string(),
            ));
        }
        Ok(self.embedding)
    }
}

#[derive(Clone)]
pub struct EmbeddingApiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

impl EmbeddingApiProvider {
    pub fn new(cache: Cache, api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    async fn request_embedding<B: Serialize>(&self, path: &str, body: &B) -> AppResult<Vec<f32>> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let response = ensure_success(PROVIDER_NAME, response).await?;
        let parsed: EmbeddingResponse = response.json().await?;
        parsed.into_vector()
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for EmbeddingApiProvider {
    async fn embed_image(&self, image_url: &str) -> AppResult<Vec<f32>> {
        if image_url.trim().is_empty() {
            return Err(AppError::InvalidInput("Image URL cannot be empty".to_string()));
        }

        let key = CacheKey::ImageEmbedding(image_url.to_string());
        cached!(self.cache, key, EMBEDDING_CACHE_TTL, async move {
            let embedding = self
                .request_embedding("/embed/image", &ImageEmbeddingRequest { image_url })
                .await?;

            tracing::info!(
                provider = PROVIDER_NAME,
                dimensions = embedding.len(),
                "Image embedding generated"
            );

            Ok::<_, AppError>(embedding)
        })
    }

    async fn embed_text(&self, text: &str) -> AppResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(AppError::InvalidInput("Text cannot be empty".to_string()));
        }

        let key = CacheKey::TextEmbedding(text.to_string());
        cached!(self.cache, key, EMBEDDING_CACHE_TTL, async move {
            let embedding = self
                .request_embedding("/embed/text", &TextEmbeddingRequest { text })
                .await?;

            tracing::info!(
                provider = PROVIDER_NAME,
                dimensions = embedding.len(),
                "Text embedding generated"
            );

            Ok::<_, AppError>(embedding)
        })
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
