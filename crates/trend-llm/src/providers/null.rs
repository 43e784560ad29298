//! Stub provider for offline runs
//!
//! Used when no API key is configured or narrative generation is disabled;
//! the rest of the pipeline (indicators, reconciliation, rendering, memory
//! save) still runs end to end.

use crate::{NarrativeProvider, NarrativeRequest, NarrativeResponse, Result, TokenUsage};
use async_trait::async_trait;

/// Provider that returns a fixed placeholder narrative
#[derive(Debug, Default, Clone)]
pub struct NullProvider {}

impl NullProvider {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl NarrativeProvider for NullProvider {
    async fn narrate(&self, _request: NarrativeRequest) -> Result<NarrativeResponse> {
        Ok(NarrativeResponse {
            text: "Narrative generation disabled for this run.".to_string(),
            usage: TokenUsage::default(),
        })
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_provider_returns_placeholder() {
        let provider = NullProvider::new();
        let response = provider
            .narrate(NarrativeRequest {
                model: "none".to_string(),
                system: None,
                prompt: "ignored".to_string(),
                max_tokens: 16,
                temperature: None,
            })
            .await
            .unwrap();
        assert!(!response.text.is_empty());
        assert_eq!(response.usage.total(), 0);
    }
}
