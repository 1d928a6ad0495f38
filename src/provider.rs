use crate::{Error, TextRequest};

/// A trait for services that turn a prompt into generated text.
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync + 'static {
    /// Generate a completion and return its full text.
    async fn generate(&self, request: &TextRequest) -> Result<String, Error>;
}
