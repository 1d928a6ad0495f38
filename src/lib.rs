//! Generate slide decks from a topic.
//!
//! A content provider (Gemini) drafts an outline, stock-photo APIs (Pexels or
//! Pixabay) supply images, and the result is written as a `.pptx` file. Remote
//! failures degrade to a fixed outline and placeholder images, so a deck is
//! produced whenever the input is valid and the output path is writable.

pub mod assembler;
pub mod config;
pub mod deck;
pub mod error;
pub mod generator;
pub mod images;
pub mod outline;
pub mod provider;
pub mod providers;
pub mod types;
pub mod web;

// Re-export core types for easy usage
pub use config::{ApiAvailability, GeneratorConfig};
pub use error::Error;
pub use generator::{
    output_file_name, GenerationRequest, Generated, NoProgress, PresentationGenerator, Progress,
    ProgressObserver,
};
pub use images::{ImageResolver, ImageSource};
pub use provider::ContentProvider;
pub use providers::*;
pub use types::*;
