//! In-memory slide deck and its `.pptx` serialisation.
//!
//! A [`Deck`] is an append-only list of [`RenderedSlide`]s. Each slide is a
//! layout reference plus absolutely positioned shapes; the package writer
//! turns that into an Office Open XML presentation with one master, three
//! layouts and a theme.

mod package;
mod render;
pub mod template;

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use tracing::debug;

use crate::images::Picture;
use crate::Error;

pub use template::{SlideTemplate, TITLE_SUBTITLE};

/// Slide width in EMUs (10 inches, 4:3).
pub const SLIDE_WIDTH: i64 = 9_144_000;
/// Slide height in EMUs (7.5 inches).
pub const SLIDE_HEIGHT: i64 = 6_858_000;

const EMU_PER_CM: f64 = 360_000.0;

/// Convert centimetres to EMUs.
pub fn cm(value: f64) -> i64 {
    (value * EMU_PER_CM).round() as i64
}

/// Position and size of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    pub fn from_cm(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(cm(x), cm(y), cm(width), cm(height))
    }

    /// Largest frame with the `width:height` aspect ratio that fits inside
    /// this one, centred in it.
    pub fn fit(&self, width: u32, height: u32) -> Frame {
        if width == 0 || height == 0 {
            return *self;
        }

        let scale = (self.cx as f64 / width as f64).min(self.cy as f64 / height as f64);
        let cx = (width as f64 * scale).round() as i64;
        let cy = (height as f64 * scale).round() as i64;

        Frame {
            x: self.x + (self.cx - cx) / 2,
            y: self.y + (self.cy - cy) / 2,
            cx,
            cy,
        }
    }
}

/// The slide layouts shipped in every package, in part-number order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    TitleSlide,
    TitleAndContent,
    Blank,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::TitleSlide, Layout::TitleAndContent, Layout::Blank];

    /// 1-based part number (`slideLayoutN.xml`).
    pub fn number(&self) -> usize {
        match self {
            Layout::TitleSlide => 1,
            Layout::TitleAndContent => 2,
            Layout::Blank => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::TitleSlide => "Title Slide",
            Layout::TitleAndContent => "Title and Content",
            Layout::Blank => "Blank",
        }
    }
}

/// Layout placeholder a text shape is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    CenteredTitle,
    Subtitle,
    Title,
    Body,
}

/// Run formatting applied to every paragraph of a text shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size_pt: u32,
    pub bold: bool,
    /// RGB hex without `#`.
    pub color: Option<&'static str>,
}

impl TextStyle {
    pub const fn new(size_pt: u32) -> Self {
        Self {
            size_pt,
            bold: false,
            color: None,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn color(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }
}

/// A text shape: either a free text box or a layout placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub placeholder: Option<Placeholder>,
    pub frame: Frame,
    pub paragraphs: Vec<String>,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Text(TextBlock),
    Picture {
        frame: Frame,
        picture: Picture,
        description: String,
    },
}

/// A picture for a content slide, with the search phrase that found it as
/// its alt text.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideImage {
    pub picture: Picture,
    pub description: String,
}

/// One finished slide.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlide {
    pub template: SlideTemplate,
    pub layout: Layout,
    pub shapes: Vec<Shape>,
}

impl RenderedSlide {
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Text(block) => Some(block),
            Shape::Picture { .. } => None,
        })
    }

    /// The first paragraph of the first text shape.
    pub fn title(&self) -> Option<&str> {
        self.text_blocks()
            .next()
            .and_then(|block| block.paragraphs.first())
            .map(String::as_str)
    }

    pub fn picture(&self) -> Option<&Picture> {
        self.shapes.iter().find_map(|shape| match shape {
            Shape::Picture { picture, .. } => Some(picture),
            Shape::Text(_) => None,
        })
    }

    pub fn has_picture(&self) -> bool {
        self.picture().is_some()
    }
}

/// Append-only collection of rendered slides.
#[derive(Debug, Default)]
pub struct Deck {
    slides: Vec<RenderedSlide>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slide: RenderedSlide) {
        self.slides.push(slide);
    }

    pub fn slides(&self) -> &[RenderedSlide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Serialise the deck as a `.pptx` package into `writer`.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<W, Error> {
        package::write_package(self, writer)
    }

    /// Serialise the deck to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = self.write_to(BufWriter::new(file))?;
        writer.flush()?;
        debug!(path = %path.display(), slides = self.len(), "deck written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_conversion() {
        assert_eq!(cm(1.0), 360_000);
        assert_eq!(cm(1.27), 457_200);
        assert_eq!(cm(25.4), SLIDE_WIDTH);
        assert_eq!(cm(19.05), SLIDE_HEIGHT);
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let frame = Frame::new(0, 0, 4000, 4000);

        let wide = frame.fit(800, 400);
        assert_eq!((wide.cx, wide.cy), (4000, 2000));
        assert_eq!((wide.x, wide.y), (0, 1000));

        let tall = frame.fit(300, 600);
        assert_eq!((tall.cx, tall.cy), (2000, 4000));
        assert_eq!((tall.x, tall.y), (1000, 0));

    }

    #[test]
    fn test_fit_degenerate_image() {
        let frame = Frame::new(10, 10, 100, 100);
        assert_eq!(frame.fit(0, 50), frame);
    }

    #[test]
    fn test_layout_numbers() {
        let numbers: Vec<usize> = Layout::ALL.iter().map(Layout::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(Layout::Blank.name(), "Blank");
    }
}
