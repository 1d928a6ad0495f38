use reqwest::Client;
use serde::Deserialize;

use super::PhotoSearch;
use crate::Error;

/// Pexels search client.
pub struct PexelsSearch {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PexelsSearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    src: PexelsPhotoSources,
}

#[derive(Debug, Deserialize)]
struct PexelsPhotoSources {
    original: String,
}

impl PexelsSearch {
    pub fn new(client: Client, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl PhotoSearch for PexelsSearch {
    fn name(&self) -> &'static str {
        "Pexels"
    }

    async fn first_photo_url(&self, query: &str) -> Result<Option<String>, Error> {
        let response = self
            .client
            .get(format!("{}/v1/search", self.base_url.trim_end_matches('/')))
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query),
                ("per_page", "1"),
                ("orientation", "landscape"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: PexelsSearchResponse = response.json().await?;
        Ok(body.photos.into_iter().next().map(|photo| photo.src.original))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parsing() {
        let body = r#"{
            "page": 1,
            "per_page": 1,
            "photos": [{
                "id": 2014422,
                "width": 3024,
                "src": {
                    "original": "https://images.pexels.com/photos/2014422/pexels-photo-2014422.jpeg",
                    "large": "https://images.pexels.com/photos/2014422/large.jpeg"
                }
            }]
        }"#;

        let parsed: PexelsSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.photos[0].src.original,
            "https://images.pexels.com/photos/2014422/pexels-photo-2014422.jpeg"
        );

        let empty: PexelsSearchResponse = serde_json::from_str(r#"{"total_results": 0}"#).unwrap();
        assert!(empty.photos.is_empty());
    }
}
