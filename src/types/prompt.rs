/// A single-turn text generation request sent to a content provider.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: Option<f32>,
}

impl TextRequest {
    /// Create a request for `model` with the given user prompt.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: None,
        }
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = TextRequest::new("gemini-2.5-pro", "Hello").temperature(0.7);

        assert_eq!(request.model, "gemini-2.5-pro");
        assert_eq!(request.prompt, "Hello");
        assert_eq!(request.temperature, Some(0.7));
    }
}
