use async_trait::async_trait;

/// Capability for pausing the flow on a yes/no decision or presenting a
/// terminal message. The orchestration never talks to a concrete dialog
/// mechanism; the embedder supplies one.
#[async_trait]
pub trait UserPrompt: Send + Sync {
    /// Block the logical flow until the user answers. True means proceed.
    async fn confirm(&self, message: &str) -> bool;

    /// Present a message requiring no decision.
    async fn notify(&self, message: &str);
}
