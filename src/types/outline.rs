use std::fmt;

use super::slide::SlideSpec;

/// The ordered slide descriptions for one deck, tagged with how they were obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// The content API reply parsed cleanly.
    Parsed(Vec<SlideSpec>),
    /// The fixed outline substituted after a failure.
    Fallback {
        slides: Vec<SlideSpec>,
        reason: FallbackReason,
    },
}

/// Why the content API reply was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The request itself failed (network, non-2xx, empty candidate).
    Request(String),
    /// The reply was not a JSON array of slide records.
    Parse(String),
    /// The reply was an empty array.
    Empty,
    /// A record violated an invariant, e.g. an empty title.
    InvalidRecord(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Request(msg) => write!(f, "content request failed: {msg}"),
            FallbackReason::Parse(msg) => write!(f, "reply was not a slide array: {msg}"),
            FallbackReason::Empty => write!(f, "reply contained no slides"),
            FallbackReason::InvalidRecord(msg) => write!(f, "invalid slide record: {msg}"),
        }
    }
}

impl Outline {
    pub fn slides(&self) -> &[SlideSpec] {
        match self {
            Outline::Parsed(slides) => slides,
            Outline::Fallback { slides, .. } => slides,
        }
    }

    pub fn len(&self) -> usize {
        self.slides().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides().is_empty()
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outline::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Outline::Parsed(_) => None,
            Outline::Fallback { reason, .. } => Some(reason),
        }
    }
}
