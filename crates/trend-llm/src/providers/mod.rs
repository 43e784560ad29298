//! Narrative provider implementations

pub mod anthropic;
pub mod null;

pub use anthropic::AnthropicProvider;
pub use null::NullProvider;
