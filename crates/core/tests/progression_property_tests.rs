//! Property-based integration tests for the progression engine.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use std::collections::BTreeSet;

use verdant_core::levels::{level_for_xp, progress_for_xp, LEVEL_THRESHOLDS};
use verdant_core::plants::care_schedule::is_due;
use verdant_core::plants::CareTaskType;
use verdant_core::tasks::ledger::{plan_task_completion, task_key, ALL_TASKS_BONUS_XP};

// =============================================================================
// Generators
// =============================================================================

fn arb_task() -> impl Strategy<Value = CareTaskType> {
    prop_oneof![
        Just(CareTaskType::Water),
        Just(CareTaskType::Fertilize),
        Just(CareTaskType::Maintenance),
    ]
}

fn arb_date() -> impl Strategy<Value = chrono::NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
    })
}

// =============================================================================
// Level calculator
// =============================================================================

proptest! {
    #[test]
    fn level_is_monotonic_in_xp(xp in 0u64..10_000, delta in 0u64..5_000) {
        prop_assert!(level_for_xp(xp + delta) >= level_for_xp(xp));
    }

    #[test]
    fn level_stays_in_table_range(xp in 0u64..1_000_000) {
        let level = level_for_xp(xp);
        prop_assert!((1..=7).contains(&level));
    }

    #[test]
    fn level_matches_greatest_threshold(xp in 0u64..10_000) {
        let expected = LEVEL_THRESHOLDS
            .iter()
            .filter(|t| t.min_xp <= xp)
            .map(|t| t.level)
            .max()
            .unwrap_or(1);
        prop_assert_eq!(level_for_xp(xp), expected);
    }

    #[test]
    fn progress_percent_is_bounded(xp in 0u64..10_000) {
        let progress = progress_for_xp(xp);
        prop_assert!(progress.percent_to_next <= 100);
        prop_assert_eq!(progress.level, level_for_xp(xp));
        // xp_into_level never exceeds the distance to the next threshold.
        if let Some(to_next) = progress.xp_to_next {
            prop_assert!(to_next > 0);
        }
    }
}

// =============================================================================
// Watering-due predicate
// =============================================================================

proptest! {
    #[test]
    fn due_requires_elapsed_interval(
        days_ago in 0i64..100,
        interval in 1i64..40,
        today in arb_date(),
    ) {
        let last = today - chrono::Duration::days(days_ago);
        if is_due(Some(last), interval, today, today) {
            prop_assert!(days_ago >= interval);
        }
    }

    #[test]
    fn due_fires_on_every_exact_multiple(
        multiple in 1i64..8,
        interval in 1i64..40,
        today in arb_date(),
    ) {
        let last = today - chrono::Duration::days(interval * multiple);
        prop_assert!(is_due(Some(last), interval, today, today));
    }

    #[test]
    fn future_non_multiple_days_stay_quiet(
        days_ago in 1i64..100,
        interval in 2i64..40,
        ahead in 1i64..30,
        today in arb_date(),
    ) {
        let last = today - chrono::Duration::days(days_ago);
        let target = today + chrono::Duration::days(ahead);
        if is_due(Some(last), interval, target, today) {
            prop_assert_eq!((days_ago + ahead) % interval, 0);
        }
    }

    #[test]
    fn never_serviced_due_from_today_onward(
        offset in -30i64..30,
        interval in 1i64..40,
        today in arb_date(),
    ) {
        let target = today + chrono::Duration::days(offset);
        prop_assert_eq!(is_due(None, interval, target, today), offset >= 0);
    }
}

// =============================================================================
// Task ledger
// =============================================================================

proptest! {
    #[test]
    fn replayed_task_never_pays_twice(
        plant_id in "[a-z0-9]{4,12}",
        task in arb_task(),
        prior_tasks in proptest::collection::btree_set("[a-z0-9]{4,12}:(water|fertilize|maintenance)", 0..6),
    ) {
        let mut completed: BTreeSet<String> = prior_tasks;
        let first = plan_task_completion(&completed, &plant_id, task);
        for key in &first.keys_to_add {
            completed.insert(key.clone());
        }
        let replay = plan_task_completion(&completed, &plant_id, task);
        prop_assert!(replay.already_completed || first.already_completed);
        prop_assert_eq!(replay.xp_delta, 0);
        prop_assert!(replay.keys_to_add.is_empty());
    }

    #[test]
    fn any_completion_order_totals_135(order in Just(vec![0usize, 1, 2]).prop_shuffle()) {
        let tasks = CareTaskType::ALL;
        let mut completed = BTreeSet::new();
        let mut total = 0u64;
        for idx in order {
            let plan = plan_task_completion(&completed, "p1", tasks[idx]);
            for key in plan.keys_to_add {
                completed.insert(key);
            }
            total += plan.xp_delta;
        }
        // 30 + 35 + 35 plus the single bonus.
        prop_assert_eq!(total, 100 + ALL_TASKS_BONUS_XP);
        prop_assert!(completed.contains(&task_key("p1", CareTaskType::Water)));
        prop_assert_eq!(completed.len(), 4);
    }

    #[test]
    fn bonus_only_on_closing_task(
        first in arb_task(),
        second in arb_task(),
    ) {
        prop_assume!(first != second);
        let mut completed = BTreeSet::new();
        for task in [first, second] {
            let plan = plan_task_completion(&completed, "p1", task);
            prop_assert!(!plan.bonus_earned);
            for key in plan.keys_to_add {
                completed.insert(key);
            }
        }
    }
}
