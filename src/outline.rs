//! Outline production: prompt the content provider for a JSON slide list and
//! fall back to a fixed outline whenever that does not work out.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::provider::ContentProvider;
use crate::types::{FallbackReason, Outline, SlideSpec, SlideType, TextRequest};

/// Returned by [`OutlineProducer::describe_image`] when the provider cannot help.
pub const GENERIC_IMAGE_DESCRIPTION: &str = "professional abstract illustration";

/// Number of records in the fixed fallback outline.
pub const FALLBACK_SLIDE_COUNT: usize = 10;

const OUTLINE_TEMPERATURE: f32 = 0.7;

/// Turns a topic into an ordered list of slide descriptions.
pub struct OutlineProducer {
    provider: Arc<dyn ContentProvider>,
    model: String,
}

impl OutlineProducer {
    pub fn new(provider: Arc<dyn ContentProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Ask the provider for an outline of roughly `slide_count` slides.
    ///
    /// Never fails: any request or parse problem yields [`Outline::Fallback`].
    /// The slide count is only a hint to the provider; the fallback ignores it.
    pub async fn produce_outline(&self, topic: &str, slide_count: usize) -> Outline {
        let request = TextRequest::new(&self.model, outline_prompt(topic, slide_count))
            .temperature(OUTLINE_TEMPERATURE);

        let reply = match self.provider.generate(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "outline request failed, using fallback outline");
                return fallback(topic, FallbackReason::Request(e.to_string()));
            }
        };

        match parse_outline(&reply) {
            Ok(slides) => {
                info!(slides = slides.len(), "parsed outline from content provider");
                Outline::Parsed(slides)
            }
            Err(reason) => {
                warn!(%reason, "unusable outline reply, using fallback outline");
                debug!(reply = %reply, "raw outline reply");
                fallback(topic, reason)
            }
        }
    }

    /// Ask the provider for a short stock-photo query describing `content`.
    pub async fn describe_image(&self, content: &str) -> String {
        let request = TextRequest::new(&self.model, image_description_prompt(content));

        match self.provider.generate(&request).await {
            Ok(reply) => {
                let description = reply.trim().trim_matches('"').trim();
                if description.is_empty() {
                    GENERIC_IMAGE_DESCRIPTION.to_string()
                } else {
                    description.to_string()
                }
            }
            Err(e) => {
                warn!(error = %e, "image description request failed");
                GENERIC_IMAGE_DESCRIPTION.to_string()
            }
        }
    }
}

fn fallback(topic: &str, reason: FallbackReason) -> Outline {
    Outline::Fallback {
        slides: fallback_outline(topic),
        reason,
    }
}

/// Build the prompt that asks for a JSON slide array.
pub fn outline_prompt(topic: &str, slide_count: usize) -> String {
    format!(
        r#"Create a professional PowerPoint outline on "{topic}" with {slide_count} slides.

The presentation should follow this structure:
1. Title Slide (Introduction)
2. Overview/Introduction
3. History/Background
4. Key Concepts/Principles
5. Applications/Use Cases
6. Advantages and Benefits
7. Disadvantages/Limitations
8. Current Trends/Recent Developments
9. Future Prospects
10. Conclusion/Summary

Return the response as a JSON array with the following structure:
[
    {{
        "title": "Slide Title",
        "content": "• First detailed bullet point with explanation\n• Second detailed bullet point with explanation\n• Third detailed bullet point with explanation\n• Fourth detailed bullet point with explanation",
        "slide_type": "title|introduction|history|concepts|applications|advantages|disadvantages|trends|future|conclusion",
        "image_needed": true/false,
        "image_description": "Specific image description for this slide"
    }}
]

CRITICAL REQUIREMENTS:
- The "content" field MUST contain FULL detailed bullet points with explanations, NOT just topic names
- Each bullet point should be 1-2 sentences explaining the concept
- Include specific facts, examples, and details for each bullet point
- Use bullet points (•) format, one bullet per line
- Ensure logical flow and progression
- Include image_needed field for each slide
- Provide specific image descriptions for slides that need visuals

The response must be a valid JSON array."#
    )
}

/// Build the prompt that asks for an image search phrase.
pub fn image_description_prompt(content: &str) -> String {
    format!(
        "Suggest a relevant image description (8-12 words) for this content:\n{content}\n\
         Requirements:\n\
         - Be specific and descriptive (8-12 words)\n\
         - Focus on the main concept or theme\n\
         - Use professional and technical terms when appropriate\n\
         - Ensure the image would add value to the slide\n\
         - Make it suitable for stock photo search\n\
         Reply with the description only."
    )
}

/// Remove a Markdown code fence around the reply, if there is one.
pub fn strip_code_fences(reply: &str) -> &str {
    let body = if let Some(start) = reply.find("```json") {
        &reply[start + "```json".len()..]
    } else if let Some(start) = reply.find("```") {
        &reply[start + "```".len()..]
    } else {
        return reply.trim();
    };

    match body.find("```") {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Parse a raw provider reply into slide records.
pub fn parse_outline(reply: &str) -> Result<Vec<SlideSpec>, FallbackReason> {
    let json = strip_code_fences(reply);
    let slides: Vec<SlideSpec> =
        serde_json::from_str(json).map_err(|e| FallbackReason::Parse(e.to_string()))?;

    if slides.is_empty() {
        return Err(FallbackReason::Empty);
    }
    if let Some(position) = slides.iter().position(|s| s.title.trim().is_empty()) {
        return Err(FallbackReason::InvalidRecord(format!(
            "slide {} has an empty title",
            position + 1
        )));
    }

    Ok(slides)
}

/// The fixed ten-section outline used when the provider cannot be used.
pub fn fallback_outline(topic: &str) -> Vec<SlideSpec> {
    vec![
        SlideSpec::new(format!("Introduction to {topic}"), SlideType::Title)
            .with_content(
                "• Comprehensive overview of the topic \n\
                 • Key objectives and learning goals\n\
                 • What to expect from this presentation\n\
                 • Importance and relevance in today's world",
            )
            .with_image(Some(format!("{topic} concept visualization").as_str())),
        SlideSpec::new("Overview and Background", SlideType::Introduction).with_content(
            "• Definition and core concepts \n\
             • Historical development and evolution\n\
             • Current state and significance\n\
             • Key terminology and definitions",
        ),
        SlideSpec::new("History and Development", SlideType::History)
            .with_content(
                "• Historical timeline and milestones \n\
                 • Key inventors and contributors\n\
                 • Major breakthroughs and discoveries\n\
                 • Evolution over time",
            )
            .with_image(Some("historical timeline or development chart")),
        SlideSpec {
            image_description: Some("concept diagram or framework visualization".to_string()),
            ..SlideSpec::new("Key Concepts and Principles", SlideType::Concepts).with_content(
                "• Fundamental principles and theories \n\
                 • Core concepts and methodologies\n\
                 • Important frameworks and models\n\
                 • Essential knowledge and understanding",
            )
        },
        SlideSpec::new("Applications and Use Cases", SlideType::Applications)
            .with_content(
                "• Real-world applications and implementations \n\
                 • Industry use cases and examples\n\
                 • Practical applications in various fields\n\
                 • Case studies and success stories",
            )
            .with_image(Some("application examples or use case scenarios")),
        SlideSpec::new("Advantages and Benefits", SlideType::Advantages).with_content(
            "• Key advantages and positive aspects\n\
             • Benefits and improvements\n\
             • Competitive advantages\n\
             • Value proposition and strengths",
        ),
        SlideSpec::new("Disadvantages and Limitations", SlideType::Disadvantages).with_content(
            "• Current limitations and challenges\n\
             • Potential drawbacks and concerns\n\
             • Areas for improvement\n\
             • Risk factors and considerations",
        ),
        SlideSpec::new("Current Trends and Developments", SlideType::Trends)
            .with_content(
                "• Latest trends and innovations\n\
                 • Recent developments and breakthroughs\n\
                 • Current research and advancements\n\
                 • Market trends and adoption",
            )
            .with_image(Some("trend charts or recent developments")),
        SlideSpec::new("Future Prospects", SlideType::Future)
            .with_content(
                "• Future predictions and forecasts\n\
                 • Upcoming developments and opportunities\n\
                 • Potential impact and implications\n\
                 • Recommendations and next steps",
            )
            .with_image(Some("future vision or roadmap")),
        SlideSpec::new("Conclusion and Summary", SlideType::Conclusion).with_content(
            "• Summary of key points and insights \n\
             • Final thoughts and recommendations\n\
             • Call to action and next steps\n\
             • Questions and discussion points",
        ),
    ]
}
