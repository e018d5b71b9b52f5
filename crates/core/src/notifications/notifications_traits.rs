use crate::errors::Result;
use async_trait::async_trait;

/// Trait for the push delivery transport.
///
/// Implemented in the server over HTTP; tests substitute a recorder.
#[async_trait]
pub trait PushSenderTrait: Send + Sync {
    /// Sends one message to every token. Returns the tokens the gateway
    /// rejected (invalid or expired registrations) so the caller can
    /// prune them; an `Err` means the whole batch failed.
    async fn send(&self, tokens: &[String], title: &str, body: &str) -> Result<Vec<String>>;
}

/// Trait for notification service operations
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// One pass over all reminder candidates. Returns how many reminders
    /// were delivered; per-user failures are logged and skipped.
    async fn run_reminder_sweep(&self) -> Result<u32>;
}
