use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::error;

use super::tasks_model::TaskCompletionResult;
use super::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
use crate::errors::Result;
use crate::plants::CareTaskType;
use crate::utils::time_utils;

/// Task/XP ledger service.
pub struct TaskService {
    repository: Arc<dyn TaskRepositoryTrait>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Completion against an explicit day; the trait method uses the
    /// current care-timezone day.
    pub async fn complete_task_on(
        &self,
        user_id: &str,
        plant_id: &str,
        task: CareTaskType,
        today: NaiveDate,
    ) -> Result<TaskCompletionResult> {
        self.repository.reset_daily_tasks(user_id, today).await?;
        self.repository.complete_task(user_id, plant_id, task).await
    }
}

#[async_trait]
impl TaskServiceTrait for TaskService {
    async fn complete_task(
        &self,
        user_id: &str,
        plant_id: &str,
        task: CareTaskType,
    ) -> TaskCompletionResult {
        let today = time_utils::care_date_today();
        match self.complete_task_on(user_id, plant_id, task, today).await {
            Ok(result) => result,
            Err(e) => {
                error!(
                    "task completion ({}) failed for user {} plant {}: {}",
                    task.as_str(),
                    user_id,
                    plant_id,
                    e
                );
                TaskCompletionResult::failed(e.to_string())
            }
        }
    }

    async fn check_daily_task_reset(&self, user_id: &str) -> Result<bool> {
        let today = time_utils::care_date_today();
        self.repository.reset_daily_tasks(user_id, today).await
    }
}
