//! Entry point for one deck generation: validate, outline, assemble.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::assembler::DeckAssembler;
use crate::config::GeneratorConfig;
use crate::images::{ImageResolver, ImageSource};
use crate::outline::OutlineProducer;
use crate::provider::ContentProvider;
use crate::providers::GeminiProvider;
use crate::types::FallbackReason;
use crate::Error;

pub const MIN_TOPIC_CHARS: usize = 5;
pub const MAX_TOPIC_CHARS: usize = 200;
pub const MIN_SLIDES: usize = 1;
pub const MAX_SLIDES: usize = 20;

/// MIME type of the produced file.
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Example topics offered by the web form.
pub const TOPIC_SUGGESTIONS: [&str; 20] = [
    "Machine Learning Fundamentals",
    "Blockchain Technology",
    "Renewable Energy Sources",
    "Cybersecurity Best Practices",
    "Artificial Intelligence in Healthcare",
    "Digital Marketing Strategies",
    "Climate Change Solutions",
    "Data Science Applications",
    "Internet of Things (IoT)",
    "Quantum Computing Basics",
    "Remote Work Best Practices",
    "Sustainable Business Practices",
    "Mental Health Awareness",
    "Financial Planning and Investment",
    "Social Media Marketing",
    "The Future of Youth",
    "Deep Learning Applications",
    "Cloud Computing Trends",
    "Mobile App Development",
    "E-commerce Evolution",
];

/// Parameters of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub slide_count: usize,
    pub image_source: ImageSource,
    pub include_images: bool,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, slide_count: usize) -> Self {
        Self {
            topic: topic.into(),
            slide_count,
            image_source: ImageSource::Pexels,
            include_images: true,
        }
    }

    pub fn image_source(mut self, source: ImageSource) -> Self {
        self.image_source = source;
        self
    }

    pub fn include_images(mut self, include: bool) -> Self {
        self.include_images = include;
        self
    }

    /// Check bounds and return the trimmed topic.
    pub fn validate(&self) -> Result<&str, Error> {
        let topic = self.topic.trim();
        let chars = topic.chars().count();
        if !(MIN_TOPIC_CHARS..=MAX_TOPIC_CHARS).contains(&chars) {
            return Err(Error::invalid_input(format!(
                "Topic must be between {MIN_TOPIC_CHARS} and {MAX_TOPIC_CHARS} characters (got {chars})"
            )));
        }
        if !(MIN_SLIDES..=MAX_SLIDES).contains(&self.slide_count) {
            return Err(Error::invalid_input(format!(
                "Slide count must be between {MIN_SLIDES} and {MAX_SLIDES} (got {})",
                self.slide_count
            )));
        }
        Ok(topic)
    }
}

/// Coarse progress checkpoints of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Started,
    OutlineReady { slides: usize, fallback: bool },
    SlideRendered { index: usize, total: usize },
    Saved,
}

impl Progress {
    /// Completion percentage for a progress bar.
    pub fn percent(&self) -> u8 {
        match self {
            Progress::Started => 10,
            Progress::OutlineReady { .. } => 30,
            Progress::SlideRendered { index, total } => {
                let total = (*total).max(1);
                let done = (index + 1).min(total);
                (30 + done * 60 / total) as u8
            }
            Progress::Saved => 100,
        }
    }
}

/// Receives progress checkpoints.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: Progress);
}

impl<F> ProgressObserver for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn on_progress(&self, progress: Progress) {
        self(progress)
    }
}

/// Observer that ignores every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _progress: Progress) {}
}

/// Summary of a finished generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub path: PathBuf,
    pub slide_count: usize,
    pub fallback_reason: Option<FallbackReason>,
}

impl Generated {
    pub fn used_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Produces decks from topics.
pub struct PresentationGenerator {
    outline: OutlineProducer,
    config: GeneratorConfig,
}

impl PresentationGenerator {
    /// Build a generator backed by Gemini. Fails without a Gemini key.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, Error> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| Error::config("GEMINI_API_KEY is not set"))?;
        let provider = GeminiProvider::new_with_base_url(api_key, config.gemini_base_url.clone())?;
        Ok(Self::new(Arc::new(provider), config.clone()))
    }

    /// Build a generator around any content provider.
    pub fn new(provider: Arc<dyn ContentProvider>, config: GeneratorConfig) -> Self {
        Self {
            outline: OutlineProducer::new(provider, config.gemini_model.clone()),
            config,
        }
    }

    /// Generate a deck for `request` and save it to `output_path`.
    ///
    /// Input is validated before any network activity. Content and image API
    /// failures degrade to the fallback outline and placeholder images;
    /// only invalid input and serialisation failures are returned.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        output_path: &Path,
        observer: &dyn ProgressObserver,
    ) -> Result<Generated, Error> {
        let topic = request.validate()?;
        observer.on_progress(Progress::Started);
        info!(
            topic,
            slides = request.slide_count,
            source = %request.image_source,
            "generating presentation"
        );

        let outline = self.outline.produce_outline(topic, request.slide_count).await;
        observer.on_progress(Progress::OutlineReady {
            slides: outline.len(),
            fallback: outline.is_fallback(),
        });

        let resolver = if request.include_images {
            Some(ImageResolver::new(&self.config, request.image_source)?)
        } else {
            None
        };
        let assembler = DeckAssembler::new(&self.outline, resolver.as_ref());
        let path = assembler
            .assemble(&outline, output_path, |index, total| {
                observer.on_progress(Progress::SlideRendered { index, total })
            })
            .await?;
        observer.on_progress(Progress::Saved);

        Ok(Generated {
            path,
            slide_count: outline.len(),
            fallback_reason: outline.fallback_reason().cloned(),
        })
    }
}

/// Download file name for a topic: spaces become underscores, characters
/// unsafe in a header value or path are dropped.
pub fn output_file_name(topic: &str) -> String {
    let stem: String = topic
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '"' | '\\' | '/' | ':' | '*' | '?' | '<' | '>' | '|' | ';' => None,
            c if c.is_control() || !c.is_ascii() => None,
            c => Some(c),
        })
        .collect();
    format!("{stem}_presentation.pptx")
}
