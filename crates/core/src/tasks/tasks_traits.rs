use crate::errors::Result;
use crate::plants::CareTaskType;
use crate::tasks::tasks_model::TaskCompletionResult;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for task-ledger repository operations.
///
/// Both methods are single transactions over the user row.
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    /// Clears `tasks_completed_today` and stamps the reset date when the
    /// stored reset day predates `today`. Returns whether a clear ran.
    async fn reset_daily_tasks(&self, user_id: &str, today: NaiveDate) -> Result<bool>;

    /// Records a completion: applies the ledger plan, credits XP, and
    /// recomputes the level, all in one transaction.
    async fn complete_task(
        &self,
        user_id: &str,
        plant_id: &str,
        task: CareTaskType,
    ) -> Result<TaskCompletionResult>;
}

/// Trait for task service operations
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    /// Runs the daily reset check, then records the completion. Failures
    /// come back as a zero-effect result with an error indicator.
    async fn complete_task(
        &self,
        user_id: &str,
        plant_id: &str,
        task: CareTaskType,
    ) -> TaskCompletionResult;

    async fn check_daily_task_reset(&self, user_id: &str) -> Result<bool>;
}
