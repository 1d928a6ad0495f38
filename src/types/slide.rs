use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Section kind of an outline entry; drives template selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    Title,
    Introduction,
    History,
    Concepts,
    Applications,
    Advantages,
    Disadvantages,
    Trends,
    Future,
    Conclusion,
    /// Any value the content API invents outside the fixed set.
    #[serde(other)]
    Unknown,
}

impl SlideType {
    /// Whether this section is rendered with the two-region comparison layout.
    pub fn is_comparison(&self) -> bool {
        matches!(self, SlideType::Advantages | SlideType::Disadvantages)
    }
}

/// One outline entry as returned by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    pub slide_type: SlideType,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub image_needed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_description: Option<String>,
}

impl SlideSpec {
    pub fn new(title: impl Into<String>, slide_type: SlideType) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            slide_type,
            image_needed: false,
            image_description: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_image(mut self, description: Option<&str>) -> Self {
        self.image_needed = true;
        self.image_description = description.map(str::to_string);
        self
    }

    /// The image search query supplied by the outline, if any.
    pub fn image_query(&self) -> Option<&str> {
        self.image_description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Body lines in order; a trailing newline does not add an empty line.
    pub fn bullet_lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }
}

/// Models write flags as `true`, `"true"` or `null`; only an explicit true
/// counts.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(flag)) => flag,
        Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
