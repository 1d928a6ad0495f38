use serde::Serialize;
use std::env;

use crate::images::ImageSource;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_PEXELS_BASE_URL: &str = "https://api.pexels.com";
pub const DEFAULT_PIXABAY_BASE_URL: &str = "https://pixabay.com";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8501";

/// Credentials and endpoints for one generator instance.
///
/// Built once (usually with [`GeneratorConfig::from_env`]) and handed to the
/// constructors that need it; nothing reads the environment after that.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub pexels_api_key: Option<String>,
    pub pexels_base_url: String,
    pub pixabay_api_key: Option<String>,
    pub pixabay_base_url: String,
    pub listen_addr: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            pexels_api_key: None,
            pexels_base_url: DEFAULT_PEXELS_BASE_URL.to_string(),
            pixabay_api_key: None,
            pixabay_base_url: DEFAULT_PIXABAY_BASE_URL.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Blank values count as absent, so `GEMINI_API_KEY=` in a `.env` file
    /// does not enable the content API.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            gemini_api_key: non_blank("GEMINI_API_KEY"),
            gemini_model: non_blank("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: defaults.gemini_base_url,
            pexels_api_key: non_blank("PEXELS_API_KEY"),
            pexels_base_url: defaults.pexels_base_url,
            pixabay_api_key: non_blank("PIXABAY_API_KEY"),
            pixabay_base_url: defaults.pixabay_base_url,
            listen_addr: non_blank("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
        }
    }

    pub fn with_gemini_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    pub fn with_gemini_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.gemini_base_url = base_url.into();
        self
    }

    pub fn with_pexels_key(mut self, key: impl Into<String>) -> Self {
        self.pexels_api_key = Some(key.into());
        self
    }

    pub fn with_pexels_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.pexels_base_url = base_url.into();
        self
    }

    pub fn with_pixabay_key(mut self, key: impl Into<String>) -> Self {
        self.pixabay_api_key = Some(key.into());
        self
    }

    pub fn with_pixabay_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.pixabay_base_url = base_url.into();
        self
    }

    /// Which APIs the configured credentials make available.
    pub fn availability(&self) -> ApiAvailability {
        ApiAvailability {
            gemini: self.gemini_api_key.is_some(),
            pexels: self.pexels_api_key.is_some(),
            pixabay: self.pixabay_api_key.is_some(),
        }
    }
}

/// Presence of each credential; gates the choices offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiAvailability {
    pub gemini: bool,
    pub pexels: bool,
    pub pixabay: bool,
}

impl ApiAvailability {
    /// Image sources that can be selected, in preference order. The
    /// placeholder is always last and always present.
    pub fn image_sources(&self) -> Vec<ImageSource> {
        let mut sources = Vec::with_capacity(3);
        if self.pexels {
            sources.push(ImageSource::Pexels);
        }
        if self.pixabay {
            sources.push(ImageSource::Pixabay);
        }
        sources.push(ImageSource::Placeholder);
        sources
    }

    /// The source used when a request does not pick one.
    pub fn default_image_source(&self) -> ImageSource {
        self.image_sources()
            .first()
            .copied()
            .unwrap_or(ImageSource::Placeholder)
    }
}
