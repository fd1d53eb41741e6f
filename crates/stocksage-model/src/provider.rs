use async_trait::async_trait;

use crate::ModelError;

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Human-readable provider name for status display.
    fn name(&self) -> &str;

    /// Model identifier as reported to users.
    fn model_name(&self) -> &str;

    /// Send one prompt and wait for the complete reply.
    ///
    /// Returns `Ok(None)` when the upstream answered successfully but the
    /// payload carried no candidate text.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, ModelError>;
}
