//! Generative-text service client (OpenRouter chat completions).

pub mod client;
pub mod types;

pub use client::{CompletionClient, LlmError, OpenRouterClient};
pub use types::Sampling;
