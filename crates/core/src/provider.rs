//! TextGenerator trait: the abstraction over the external text model.
//!
//! A generator receives an ordered list of content segments (inline text or
//! inline attachments) plus an optional structured-output schema, and returns
//! whatever text the model produced. The engine never talks HTTP directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// One piece of prompt content. Order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentSegment {
    /// Plain prompt text.
    Text { text: String },

    /// An attachment the model reads natively (PDF, image, ...).
    Inline { mime_type: String, data: String },
}

impl ContentSegment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Inline {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline { .. })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Inline { .. } => None,
        }
    }
}

/// Shape of the answer requested from the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    PlainText,
    /// JSON conforming to `schema` (generator-native schema dialect).
    Json { schema: serde_json::Value },
}

/// A single generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,

    pub segments: Vec<ContentSegment>,

    pub response_format: ResponseFormat,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Token usage reported by the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// What came back from the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// `None` when the model produced no text at all.
    pub text: Option<String>,

    /// Which model actually responded.
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// The external text-generation capability.
///
/// Implementations must map a rejected credential to
/// [`ProviderError::AuthenticationFailed`] so callers can tell it apart from
/// other failures.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// A human-readable name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Run one generation with the given credential.
    async fn generate(
        &self,
        credential: &str,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_constructors() {
        let t = ContentSegment::text("hello");
        assert_eq!(t.as_text(), Some("hello"));
        assert!(!t.is_inline());

        let i = ContentSegment::inline("application/pdf", "JVBERi0=");
        assert!(i.is_inline());
        assert!(i.as_text().is_none());
    }

    #[test]
    fn segment_serialization_is_tagged() {
        let json = serde_json::to_value(ContentSegment::inline("image/png", "AAAA")).unwrap();
        assert_eq!(json["kind"], "inline");
        assert_eq!(json["mime_type"], "image/png");
    }

    #[test]
    fn json_format_carries_schema() {
        let format = ResponseFormat::Json {
            schema: serde_json::json!({"type": "OBJECT"}),
        };
        let json = serde_json::to_string(&format).unwrap();
        assert!(json.contains("\"type\":\"json\""));
        assert!(json.contains("OBJECT"));
    }
}
