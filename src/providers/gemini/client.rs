use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::types::{GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse};
use crate::config::DEFAULT_GEMINI_BASE_URL;
use crate::provider::ContentProvider;
use crate::{Error, TextRequest};

/// Gemini provider using the Generative Language API with an API key.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: String) -> Result<Self, Error> {
        Self::new_with_base_url(api_key, DEFAULT_GEMINI_BASE_URL.to_string())
    }

    /// Create a new Gemini provider with custom base URL (for testing).
    pub fn new_with_base_url(api_key: String, base_url: String) -> Result<Self, Error> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Convert internal request to Gemini format.
    fn convert_request(&self, request: &TextRequest) -> GeminiRequest {
        let generation_config = request
            .temperature
            .map(|temperature| GeminiGenerationConfig { temperature });

        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config,
        }
    }

    /// Get the API endpoint for the model.
    fn get_endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait::async_trait]
impl ContentProvider for GeminiProvider {
    async fn generate(&self, request: &TextRequest) -> Result<String, Error> {
        let gemini_request = self.convert_request(request);
        let endpoint = self.get_endpoint(&request.model);

        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(Error::provider(
                "Gemini",
                format!("API error ({status}): {error_text}"),
            ));
        }

        let body = response.text().await?;
        let gemini_response: GeminiResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini usage"
            );
        }

        gemini_response.text().ok_or_else(|| {
            let finish_reason = gemini_response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "none".to_string());
            Error::provider(
                "Gemini",
                format!("response contained no text (finish reason: {finish_reason})"),
            )
        })
    }
}
