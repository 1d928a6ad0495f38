//! Image resolution: stock-photo lookup with a solid-colour placeholder fallback.

pub mod pexels;
pub mod picture;
pub mod pixabay;
pub mod placeholder;

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::Error;

pub use pexels::PexelsSearch;
pub use picture::{Picture, PictureFormat};
pub use pixabay::PixabaySearch;

const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Where slide images should come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Pexels,
    Pixabay,
    Placeholder,
}

impl ImageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSource::Pexels => "pexels",
            ImageSource::Pixabay => "pixabay",
            ImageSource::Placeholder => "placeholder",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageSource::Pexels => "Pexels",
            ImageSource::Pixabay => "Pixabay",
            ImageSource::Placeholder => "Placeholder only",
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pexels" => Ok(ImageSource::Pexels),
            "pixabay" => Ok(ImageSource::Pixabay),
            "placeholder" | "none" => Ok(ImageSource::Placeholder),
            other => Err(Error::invalid_input(format!(
                "Unknown image source '{other}'. Valid values are: pexels, pixabay, placeholder"
            ))),
        }
    }
}

/// A stock-photo search API.
#[async_trait::async_trait]
pub trait PhotoSearch: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// URL of the best matching photo, or `None` when nothing matched.
    async fn first_photo_url(&self, query: &str) -> Result<Option<String>, Error>;
}

/// How a resolved image was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    Stock(&'static str),
    Placeholder,
}

/// A local image file. The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct ResolvedImage {
    file: NamedTempFile,
    origin: ImageOrigin,
}

impl ResolvedImage {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    pub fn is_placeholder(&self) -> bool {
        self.origin == ImageOrigin::Placeholder
    }

    /// Load the file as embeddable picture data.
    pub fn load(&self) -> Result<Picture, Error> {
        Picture::from_path(self.path())
    }
}

/// Resolves a text query to a local image file.
pub struct ImageResolver {
    client: Client,
    search: Option<Box<dyn PhotoSearch>>,
}

impl ImageResolver {
    /// Create a resolver for `source` using the credentials in `config`.
    ///
    /// A stock source without a configured key resolves every query to the
    /// placeholder.
    pub fn new(config: &GeneratorConfig, source: ImageSource) -> Result<Self, Error> {
        Self::with_timeout(config, source, DEFAULT_IMAGE_TIMEOUT)
    }

    /// Like [`ImageResolver::new`] with an explicit per-request timeout.
    pub fn with_timeout(
        config: &GeneratorConfig,
        source: ImageSource,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;

        let search: Option<Box<dyn PhotoSearch>> = match source {
            ImageSource::Pexels => config.pexels_api_key.as_ref().map(|key| {
                Box::new(PexelsSearch::new(
                    client.clone(),
                    key.clone(),
                    config.pexels_base_url.clone(),
                )) as Box<dyn PhotoSearch>
            }),
            ImageSource::Pixabay => config.pixabay_api_key.as_ref().map(|key| {
                Box::new(PixabaySearch::new(
                    client.clone(),
                    key.clone(),
                    config.pixabay_base_url.clone(),
                )) as Box<dyn PhotoSearch>
            }),
            ImageSource::Placeholder => None,
        };

        if search.is_none() && source != ImageSource::Placeholder {
            warn!(%source, "no API key configured, images will be placeholders");
        }

        Ok(Self { client, search })
    }

    /// Create a resolver around a custom search implementation.
    pub fn with_search(search: Box<dyn PhotoSearch>) -> Result<Self, Error> {
        let client = Client::builder().timeout(DEFAULT_IMAGE_TIMEOUT).build()?;
        Ok(Self {
            client,
            search: Some(search),
        })
    }

    /// Resolve `query` to a local image.
    ///
    /// Remote failures (missing key, request errors, non-2xx, no results,
    /// undecodable payloads) never surface; they produce the placeholder. Only
    /// a failure to write the placeholder itself is returned as an error.
    pub async fn resolve(&self, query: &str) -> Result<ResolvedImage, Error> {
        if let Some(search) = &self.search {
            match self.fetch(search.as_ref(), query).await {
                Ok(Some(image)) => return Ok(image),
                Ok(None) => info!(provider = search.name(), query, "no photo found"),
                Err(e) => warn!(provider = search.name(), query, error = %e, "photo lookup failed"),
            }
        }

        placeholder_image()
    }

    async fn fetch(
        &self,
        search: &dyn PhotoSearch,
        query: &str,
    ) -> Result<Option<ResolvedImage>, Error> {
        let Some(url) = search.first_photo_url(query).await? else {
            return Ok(None);
        };
        debug!(provider = search.name(), %url, "downloading photo");

        let bytes = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let format = image::guess_format(&bytes)?;
        let extension = format.extensions_str().first().copied().unwrap_or("img");

        let mut file = tempfile::Builder::new()
            .prefix("deckwright-")
            .suffix(&format!(".{extension}"))
            .tempfile()?;
        file.write_all(&bytes)?;
        file.flush()?;

        Ok(Some(ResolvedImage {
            file,
            origin: ImageOrigin::Stock(search.name()),
        }))
    }
}

/// Synthesize the placeholder image into a fresh temp file.
pub fn placeholder_image() -> Result<ResolvedImage, Error> {
    let file = tempfile::Builder::new()
        .prefix("deckwright-placeholder-")
        .suffix(".png")
        .tempfile()?;
    placeholder::write_placeholder(file.path())?;

    Ok(ResolvedImage {
        file,
        origin: ImageOrigin::Placeholder,
    })
}
