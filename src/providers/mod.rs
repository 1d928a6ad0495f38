//! Provider implementations for content generation services.

pub mod gemini;

// Re-export commonly used provider types
pub use gemini::GeminiProvider;
