//! The text-generation capability.

use async_trait::async_trait;

use crate::error::AssistError;

/// A single generation request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prompt {
    /// Optional system instruction.
    pub system: Option<String>,
    /// The user turn.
    pub user: String,
    /// When set, the provider is asked for JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
}

impl Prompt {
    pub fn text(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ..Self::default()
        }
    }

    pub fn json(user: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            user: user.into(),
            response_schema: Some(schema),
            ..Self::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Produces text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<String, AssistError>;
}

/// Generator used when no provider is configured. Always fails, so every
/// caller takes its fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _prompt: &Prompt) -> Result<String, AssistError> {
        Err(AssistError::Unavailable)
    }
}
