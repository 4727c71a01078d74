use async_trait::async_trait;
use wordpeek_types::LookupOutcome;

/// Turns selected text into a lookup outcome.
///
/// Implementations never fail: every error is folded into
/// [`LookupOutcome::Error`].
#[async_trait]
pub trait LookupService: Send + Sync {
    async fn lookup(&self, text: &str) -> LookupOutcome;
}
