//! Turns an outline into a saved deck, one slide per record.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::deck::{Deck, SlideImage, SlideTemplate};
use crate::images::ImageResolver;
use crate::outline::OutlineProducer;
use crate::types::{Outline, SlideSpec};
use crate::Error;

/// Renders outline records into a deck and writes it out.
pub struct DeckAssembler<'a> {
    outline: &'a OutlineProducer,
    images: Option<&'a ImageResolver>,
}

impl<'a> DeckAssembler<'a> {
    /// `images` of `None` disables image lookups entirely.
    pub fn new(outline: &'a OutlineProducer, images: Option<&'a ImageResolver>) -> Self {
        Self { outline, images }
    }

    /// Render every record of `outline` in order and save the deck to
    /// `output_path`.
    ///
    /// `on_slide(index, total)` is called after each slide is appended.
    /// Image problems leave a slide without a picture; only serialisation
    /// failures are returned.
    pub async fn assemble<F>(
        &self,
        outline: &Outline,
        output_path: &Path,
        mut on_slide: F,
    ) -> Result<PathBuf, Error>
    where
        F: FnMut(usize, usize),
    {
        let slides = outline.slides();
        let total = slides.len();
        let mut deck = Deck::new();

        for (index, spec) in slides.iter().enumerate() {
            let template = SlideTemplate::select(index, spec);
            let image = if template.wants_image(spec) {
                self.image_for(spec).await
            } else {
                None
            };

            let slide = template.render(spec, image);
            debug!(
                index,
                title = slide.title().unwrap_or_default(),
                ?template,
                layout = slide.layout.name(),
                picture = slide.has_picture(),
                "rendered slide"
            );
            deck.push(slide);
            on_slide(index, total);
        }

        deck.save(output_path)?;
        info!(path = %output_path.display(), slides = deck.len(), "presentation saved");
        Ok(output_path.to_path_buf())
    }

    /// The picture for `spec`, described by the query that found it.
    async fn image_for(&self, spec: &SlideSpec) -> Option<SlideImage> {
        let resolver = self.images?;

        let query = match spec.image_query() {
            Some(query) => query.to_string(),
            None => self.outline.describe_image(&spec.content).await,
        };

        // The temp file is dropped as soon as its bytes are loaded.
        let loaded = match resolver.resolve(&query).await {
            Ok(image) => {
                debug!(
                    query = %query,
                    origin = ?image.origin(),
                    placeholder = image.is_placeholder(),
                    "image resolved"
                );
                image.load()
            }
            Err(e) => Err(e),
        };

        match loaded {
            Ok(picture) => Some(SlideImage {
                picture,
                description: query,
            }),
            Err(e) => {
                warn!(title = %spec.title, query = %query, error = %e, "slide left without image");
                None
            }
        }
    }
}
