//! External enrichment providers
//!
//! Embedding and color extraction run in separate services. The engine only
//! depends on these traits so providers can be swapped or mocked.

use crate::{error::AppResult, models::Palette};

pub mod color_api;
pub mod embedding_api;

pub use color_api::ColorApiExtractor;
pub use embedding_api::EmbeddingApiProvider;

/// Turns images and text into fixed-length feature vectors
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Visual embedding of the image at `image_url`
    async fn embed_image(&self, image_url: &str) -> AppResult<Vec<f32>>;

    /// Text embedding of free-form `text`
    async fn embed_text(&self, text: &str) -> AppResult<Vec<f32>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Extracts the dominant colors of an image
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ColorExtractor: Send + Sync {
    async fn extract_palette(&self, image_url: &str) -> AppResult<Palette>;

    fn name(&self) -> &'static str;
}

/// Turns a non-2xx provider response into an `ExternalApi` error
pub(crate) async fn ensure_success(
    provider: &str,
    response: reqwest::Response,
) -> AppResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::error!(provider, status = %status, body = %body, "Provider request failed");

    Err(crate::error::AppError::ExternalApi(format!(
        "{} returned status {}: {}",
        provider, status, body
    )))
}
