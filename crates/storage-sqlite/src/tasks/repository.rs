use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use diesel::SqliteConnection;
use verdant_core::plants::CareTaskType;
use verdant_core::tasks::{ledger, TaskCompletionResult, TaskRepositoryTrait};
use verdant_core::users::User;
use verdant_core::Result;

use crate::db::WriteHandle;
use crate::users::{load_user_db, save_user};

/// Task-ledger repository over the user row.
///
/// Both operations are read-compute-write over a single user inside one
/// writer transaction; the arithmetic lives in `verdant_core::tasks::ledger`.
pub struct TaskRepository {
    writer: WriteHandle,
}

impl TaskRepository {
    pub fn new(writer: WriteHandle) -> Self {
        TaskRepository { writer }
    }
}

#[async_trait]
impl TaskRepositoryTrait for TaskRepository {
    async fn reset_daily_tasks(&self, user_id: &str, today: NaiveDate) -> Result<bool> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let mut user: User = load_user_db(conn, &user_id)?.try_into()?;
                if !ledger::reset_is_due(user.last_task_reset_date, today) {
                    return Ok(false);
                }
                user.tasks_completed_today.clear();
                user.last_task_reset_date = Some(Utc::now());
                save_user(conn, &user)?;
                Ok(true)
            })
            .await
    }

    async fn complete_task(
        &self,
        user_id: &str,
        plant_id: &str,
        task: CareTaskType,
    ) -> Result<TaskCompletionResult> {
        let user_id = user_id.to_string();
        let plant_id = plant_id.to_string();
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<TaskCompletionResult> {
                    let mut user: User = load_user_db(conn, &user_id)?.try_into()?;
                    let plan =
                        ledger::plan_task_completion(&user.tasks_completed_today, &plant_id, task);
                    let result = ledger::completion_result(user.xp, &plan);
                    if !plan.keys_to_add.is_empty() {
                        user.tasks_completed_today.extend(plan.keys_to_add.clone());
                        user.xp = result.total_xp;
                        user.level = result.level;
                        save_user(conn, &user)?;
                    }
                    Ok(result)
                },
            )
            .await
    }
}
