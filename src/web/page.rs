use askama::Template;

use crate::config::ApiAvailability;
use crate::generator::TOPIC_SUGGESTIONS;
use crate::images::ImageSource;

/// Slider bounds offered by the form; the generator itself accepts 1..=20.
pub(super) const FORM_MIN_SLIDES: usize = 3;
pub(super) const FORM_MAX_SLIDES: usize = 15;
pub(super) const FORM_DEFAULT_SLIDES: usize = 8;

/// The generation form, with choices limited to the configured APIs.
#[derive(Template)]
#[template(path = "index.html")]
pub(super) struct IndexPage {
    pub availability: ApiAvailability,
    pub topics: &'static [&'static str],
    pub image_sources: Vec<ImageSource>,
    pub min_slides: usize,
    pub max_slides: usize,
    pub default_slides: usize,
}

impl IndexPage {
    pub fn new(availability: ApiAvailability) -> Self {
        Self {
            availability,
            topics: &TOPIC_SUGGESTIONS,
            image_sources: availability.image_sources(),
            min_slides: FORM_MIN_SLIDES,
            max_slides: FORM_MAX_SLIDES,
            default_slides: FORM_DEFAULT_SLIDES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_lists_only_configured_sources() {
        let html = IndexPage::new(ApiAvailability {
            gemini: true,
            pexels: false,
            pixabay: true,
        })
        .render()
        .unwrap();
        assert!(html.contains("value=\"pixabay\""));
        assert!(html.contains("value=\"placeholder\""));
        assert!(!html.contains("value=\"pexels\""));
        assert!(html.contains("min=\"3\" max=\"15\" value=\"8\""));
        assert!(!html.contains("disabled"));
        assert!(!html.contains("No image APIs configured"));
    }

    #[test]
    fn test_form_without_content_api() {
        let html = IndexPage::new(ApiAvailability {
            gemini: false,
            pexels: false,
            pixabay: false,
        })
        .render()
        .unwrap();
        assert!(html.contains("GEMINI_API_KEY"));
        assert!(html.contains("placeholder images"));
        assert!(html.contains(" disabled>"));
        assert_eq!(
            html.matches("<option value=").count(),
            TOPIC_SUGGESTIONS.len() + 1
        );
    }

    #[test]
    fn test_topics_and_sources_rendered() {
        let html = IndexPage::new(ApiAvailability {
            gemini: true,
            pexels: true,
            pixabay: false,
        })
        .render()
        .unwrap();
        assert!(html.contains("<option value=\"Internet of Things (IoT)\">"));
        assert!(html.contains("<option value=\"pexels\">Pexels</option>"));
    }
}
