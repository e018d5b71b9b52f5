//! Pure task-ledger arithmetic.
//!
//! The per-day task set lives on the user as composite keys. These
//! functions compute, without I/O, what a completion adds to the set and
//! what it pays out; storage implementations apply the plan inside a
//! transaction.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use super::tasks_model::{LevelUp, TaskCompletionResult};
use crate::constants::{TASK_KEY_BONUS, TASK_KEY_SEPARATOR};
use crate::levels;
use crate::plants::CareTaskType;
use crate::utils::time_utils::care_date_from_utc;

/// Flat bonus paid once per plant per day when all three tasks are done.
pub const ALL_TASKS_BONUS_XP: u64 = 35;

/// Fixed XP for a single task completion.
pub fn xp_for_task(task: CareTaskType) -> u64 {
    match task {
        CareTaskType::Water => 30,
        CareTaskType::Fertilize => 35,
        CareTaskType::Maintenance => 35,
    }
}

pub fn task_key(plant_id: &str, task: CareTaskType) -> String {
    format!("{plant_id}{TASK_KEY_SEPARATOR}{}", task.as_str())
}

pub fn bonus_key(plant_id: &str) -> String {
    format!("{plant_id}{TASK_KEY_SEPARATOR}{TASK_KEY_BONUS}")
}

/// What one completion call must write and pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPlan {
    pub keys_to_add: Vec<String>,
    pub xp_delta: u64,
    pub already_completed: bool,
    pub bonus_earned: bool,
}

/// Plans a completion of `task` for `plant_id` against the current
/// per-day key set.
///
/// A key already present means the task was paid today: the plan is
/// empty. Otherwise the task key is added and its XP paid; if that
/// completes the plant's third dimension and the bonus key is absent,
/// the bonus is paid exactly once as well.
pub fn plan_task_completion(
    completed: &BTreeSet<String>,
    plant_id: &str,
    task: CareTaskType,
) -> TaskPlan {
    let key = task_key(plant_id, task);
    if completed.contains(&key) {
        return TaskPlan {
            keys_to_add: Vec::new(),
            xp_delta: 0,
            already_completed: true,
            bonus_earned: false,
        };
    }

    let mut keys_to_add = vec![key];
    let mut xp_delta = xp_for_task(task);

    let all_done = CareTaskType::ALL.iter().all(|t| {
        let k = task_key(plant_id, *t);
        completed.contains(&k) || keys_to_add.contains(&k)
    });
    let bonus = bonus_key(plant_id);
    let bonus_earned = all_done && !completed.contains(&bonus);
    if bonus_earned {
        keys_to_add.push(bonus);
        xp_delta += ALL_TASKS_BONUS_XP;
    }

    TaskPlan {
        keys_to_add,
        xp_delta,
        already_completed: false,
        bonus_earned,
    }
}

/// Builds the caller-facing result for a plan applied to a user whose XP
/// was `xp_before`.
pub fn completion_result(xp_before: u64, plan: &TaskPlan) -> TaskCompletionResult {
    let total_xp = xp_before + plan.xp_delta;
    let old_level = levels::level_for_xp(xp_before);
    let new_level = levels::level_for_xp(total_xp);
    let level_up = (new_level > old_level).then(|| LevelUp {
        old_level,
        new_level,
        new_title: levels::title_for_xp(total_xp).to_string(),
    });

    TaskCompletionResult {
        xp_earned: plan.xp_delta,
        bonus_earned: plan.bonus_earned,
        total_xp,
        level: new_level,
        already_completed: plan.already_completed,
        level_up,
        error: None,
    }
}

/// Whether the per-day key set must be cleared before recording anything
/// for `today`. True when no reset was ever recorded or the recorded one
/// belongs to an earlier care-timezone day.
pub fn reset_is_due(last_reset: Option<DateTime<Utc>>, today: NaiveDate) -> bool {
    match last_reset {
        None => true,
        Some(ts) => care_date_from_utc(ts) < today,
    }
}
