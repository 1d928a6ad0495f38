//! Core types used throughout the library.

pub mod outline;
pub mod prompt;
pub mod slide;

// Re-export commonly used types
pub use outline::*;
pub use prompt::*;
pub use slide::*;
