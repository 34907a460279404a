use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::Palette,
    services::providers::{ensure_success, ColorExtractor},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

const PALETTE_CACHE_TTL: u64 = 604800; // 1 week
const PROVIDER_NAME: &str = "color-api";

#[derive(Debug, Serialize)]
struct PaletteRequest<'a> {
    image_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct PaletteResponse {
    palette: Palette,
}

/// Color extraction over HTTP: POST /palette {"image_url"} → {"palette": {...}}
#[derive(Clone)]
pub struct ColorApiExtractor {
    http_client: HttpClient,
    api_url: String,
    cache: Cache,
}

impl ColorApiExtractor {
    pub fn new(cache: Cache, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }
}

#[async_trait::async_trait]
impl ColorExtractor for ColorApiExtractor {
    async fn extract_palette(&self, image_url: &str) -> AppResult<Palette> {
        if image_url.trim().is_empty() {
            return Err(AppError::InvalidInput("Image URL cannot be empty".to_string()));
        }

        let key = CacheKey::Palette(image_url.to_string());
        cached!(self.cache, key, PALETTE_CACHE_TTL, async move {
            let url = format!("{}/palette", self.api_url);

            let response = self
                .http_client
                .post(&url)
                .json(&PaletteRequest { image_url })
                .send()
                .await?;

            let response = ensure_success(PROVIDER_NAME, response).await?;
            let parsed: PaletteResponse = response.json().await?;

            tracing::debug!(
                provider = PROVIDER_NAME,
                has_vibrant = parsed.palette.vibrant.is_some(),
                "Palette extracted"
            );

            Ok::<_, AppError>(parsed.palette)
        })
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Swatch;

    #[test]
    fn test_palette_response_parses_named_swatches() {
        let parsed: PaletteResponse = serde_json::from_str(
            r#"{
                "palette": {
                    "Vibrant": {"rgb": [201, 42, 38], "population": 1200},
                    "DarkMuted": {"rgb": [40, 30, 30], "population": 300}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(
            parsed.palette.vibrant,
            Some(Swatch {
                rgb: [201, 42, 38],
                population: 1200
            })
        );
        assert!(parsed.palette.dark_muted.is_some());
        assert!(parsed.palette.light_vibrant.is_none());
    }
}
