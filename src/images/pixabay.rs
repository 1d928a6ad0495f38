use reqwest::Client;
use serde::Deserialize;

use super::PhotoSearch;
use crate::Error;

/// Pixabay search client. Pixabay rejects `per_page` below 3.
pub struct PixabaySearch {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PixabaySearchResponse {
    #[serde(default)]
    hits: Vec<PixabayHit>,
}

#[derive(Debug, Deserialize)]
struct PixabayHit {
    #[serde(rename = "largeImageURL")]
    large_image_url: Option<String>,
    #[serde(rename = "webformatURL")]
    webformat_url: Option<String>,
}

impl PixabaySearch {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl PhotoSearch for PixabaySearch {
    fn name(&self) -> &'static str {
        "Pixabay"
    }

    async fn first_photo_url(&self, query: &str) -> Result<Option<String>, Error> {
        let response = self
            .client
            .get(format!("{}/api/", self.base_url.trim_end_matches('/')))
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("image_type", "photo"),
                ("orientation", "horizontal"),
                ("per_page", "3"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: PixabaySearchResponse = response.json().await?;
        Ok(body
            .hits
            .into_iter()
            .next()
            .and_then(|hit| hit.large_image_url.or(hit.webformat_url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parsing() {
        let body = r#"{
            "total": 4692,
            "totalHits": 500,
            "hits": [{
                "id": 195893,
                "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
                "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg"
            }]
        }"#;

        let parsed: PixabaySearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.hits[0].large_image_url.as_deref(),
            Some("https://pixabay.com/get/ed6a99fd0a76647_1280.jpg")
        );

        let empty: PixabaySearchResponse = serde_json::from_str(r#"{"total": 0}"#).unwrap();
        assert!(empty.hits.is_empty());
    }
}
