//! Narrative provider trait definition

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request for one narrative generation call
///
/// The pipeline makes no assumption about the provider beyond free text
/// coming back: no tool calls, no streaming, no structured output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Optional system prompt framing the analyst role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The rendered analyst prompt
    pub prompt: String,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    /// Sampling temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Free-text response from a narrative provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeResponse {
    /// Generated narrative text
    pub text: String,

    /// Token usage statistics
    pub usage: TokenUsage,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: usize,

    /// Number of output tokens
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

/// Trait for narrative generation providers
///
/// Implementations turn the structured report payload prompt into the
/// report's narrative text (e.g., Anthropic, or the offline stub).
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    /// Generate narrative text for the rendered prompt
    async fn narrate(&self, request: NarrativeRequest) -> Result<NarrativeResponse>;

    /// Get the provider name (e.g., "anthropic")
    fn name(&self) -> &str;
}
