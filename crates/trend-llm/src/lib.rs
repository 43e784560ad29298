//! Narrative generation for trend-rs
//!
//! The core hands its structured report payload to a narrative collaborator
//! and expects free text back. This crate defines that seam
//! ([`NarrativeProvider`]) and ships two implementations: the Anthropic
//! Messages API client and an offline stub.

pub mod error;
pub mod provider;
pub mod providers;

// Re-export main types for convenience
pub use error::{LlmError, Result};
pub use provider::{NarrativeProvider, NarrativeRequest, NarrativeResponse, TokenUsage};
pub use providers::{AnthropicProvider, NullProvider};
