use crate::types::{SlideSpec, SlideType};

use super::{Frame, Layout, Placeholder, RenderedSlide, Shape, SlideImage, TextBlock, TextStyle};

/// Subtitle placed on every title slide.
pub const TITLE_SUBTITLE: &str = "Generated by Gemini AI";

const BODY_COLOR: &str = "333333";

const TITLE_SLIDE_TITLE: TextStyle = TextStyle::new(44).bold();
const TITLE_SLIDE_SUBTITLE: TextStyle = TextStyle::new(24);
const SLIDE_TITLE: TextStyle = TextStyle::new(36).bold();
const BODY: TextStyle = TextStyle::new(18).color(BODY_COLOR);

// Placeholder frames match the positions in the bundled layouts.
const CENTERED_TITLE_FRAME: Frame = Frame::new(685_800, 2_130_425, 7_772_400, 1_470_025);
const SUBTITLE_FRAME: Frame = Frame::new(1_371_600, 3_886_200, 6_400_800, 1_752_600);
const TITLE_FRAME: Frame = Frame::new(457_200, 274_638, 8_229_600, 1_143_000);
const BODY_FRAME: Frame = Frame::new(457_200, 1_600_200, 8_229_600, 4_525_963);

/// Title text box of the content layout: 1.27cm, 1.27cm, 22.86cm x 2.54cm.
pub fn content_title_frame() -> Frame {
    Frame::from_cm(1.27, 1.27, 22.86, 2.54)
}

/// Bullet column of the content layout: 1.27cm, 4.57cm, 11.43cm x 12.7cm.
pub fn content_body_frame() -> Frame {
    Frame::from_cm(1.27, 4.57, 11.43, 12.7)
}

/// Right-hand image column of the content layout.
pub fn content_image_frame() -> Frame {
    Frame::from_cm(13.97, 3.81, 10.16, 13.97)
}

/// How one outline record is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideTemplate {
    /// Centred title plus the fixed subtitle.
    Title,
    /// Title plus one bulleted body placeholder; never carries an image.
    Comparison,
    /// Title box, bullet column and an optional picture.
    Content,
}

impl SlideTemplate {
    /// The first record, and any record typed `title`, uses the title
    /// template; advantages and disadvantages use the comparison template.
    pub fn select(index: usize, spec: &SlideSpec) -> Self {
        if index == 0 || spec.slide_type == SlideType::Title {
            SlideTemplate::Title
        } else if spec.slide_type.is_comparison() {
            SlideTemplate::Comparison
        } else {
            SlideTemplate::Content
        }
    }

    /// Whether rendering `spec` with this template calls for an image lookup.
    pub fn wants_image(&self, spec: &SlideSpec) -> bool {
        *self == SlideTemplate::Content && spec.image_needed
    }

    pub fn layout(&self) -> Layout {
        match self {
            SlideTemplate::Title => Layout::TitleSlide,
            SlideTemplate::Comparison => Layout::TitleAndContent,
            SlideTemplate::Content => Layout::Blank,
        }
    }

    /// Lay out `spec`. `image` is ignored by templates that never show one.
    pub fn render(&self, spec: &SlideSpec, image: Option<SlideImage>) -> RenderedSlide {
        let shapes = match self {
            SlideTemplate::Title => vec![
                text(
                    Some(Placeholder::CenteredTitle),
                    CENTERED_TITLE_FRAME,
                    vec![spec.title.clone()],
                    TITLE_SLIDE_TITLE,
                ),
                text(
                    Some(Placeholder::Subtitle),
                    SUBTITLE_FRAME,
                    vec![TITLE_SUBTITLE.to_string()],
                    TITLE_SLIDE_SUBTITLE,
                ),
            ],
            SlideTemplate::Comparison => vec![
                text(
                    Some(Placeholder::Title),
                    TITLE_FRAME,
                    vec![spec.title.clone()],
                    SLIDE_TITLE,
                ),
                text(Some(Placeholder::Body), BODY_FRAME, paragraphs(spec), BODY),
            ],
            SlideTemplate::Content => {
                let mut shapes = vec![
                    text(None, content_title_frame(), vec![spec.title.clone()], SLIDE_TITLE),
                    text(None, content_body_frame(), paragraphs(spec), BODY),
                ];
                if let Some(SlideImage {
                    picture,
                    description,
                }) = image
                {
                    shapes.push(Shape::Picture {
                        frame: content_image_frame().fit(picture.width, picture.height),
                        description,
                        picture,
                    });
                }
                shapes
            }
        };

        RenderedSlide {
            template: *self,
            layout: self.layout(),
            shapes,
        }
    }
}

fn text(
    placeholder: Option<Placeholder>,
    frame: Frame,
    paragraphs: Vec<String>,
    style: TextStyle,
) -> Shape {
    Shape::Text(TextBlock {
        placeholder,
        frame,
        paragraphs,
        style,
    })
}

fn paragraphs(spec: &SlideSpec) -> Vec<String> {
    spec.bullet_lines().into_iter().map(str::to_string).collect()
}
