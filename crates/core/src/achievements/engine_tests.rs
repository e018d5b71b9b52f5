use chrono::{NaiveDate, TimeZone, Utc};

use super::achievements_constants::{
    FIRST_PLANT, GREEN_THUMB, PLANT_COLLECTOR, PLANT_PHOTOGRAPHER, WATER_WARRIOR,
};
use super::achievements_model::{AchievementState, StreakScope};
use super::engine::{
    plan_collection_recompute, plan_daily_reset, plan_streak_advance, CollectionSnapshot,
};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 20, 15, 0, 0).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

mod collection {
    use super::*;

    #[test]
    fn first_plant_unlocks_at_one() {
        let snapshot = CollectionSnapshot {
            plant_count: 1,
            photographed_count: 0,
        };
        let outcome = plan_collection_recompute("u1", &[], snapshot, now());

        let unlocked_ids: Vec<_> = outcome.newly_unlocked.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(unlocked_ids, vec![FIRST_PLANT]);
        assert_eq!(outcome.newly_unlocked[0].xp_reward, 10);

        let first = outcome.records.iter().find(|r| r.id == FIRST_PLANT).unwrap();
        assert!(first.unlocked);
        assert_eq!(first.progress, 1);
        assert_eq!(first.unlocked_date, Some(now()));
    }

    #[test]
    fn first_plant_unlock_is_permanent() {
        let snapshot = CollectionSnapshot {
            plant_count: 1,
            photographed_count: 0,
        };
        let first_pass = plan_collection_recompute("u1", &[], snapshot, now());

        // Collection drops back to zero: progress follows, the badge and
        // its timestamp do not move.
        let empty = CollectionSnapshot {
            plant_count: 0,
            photographed_count: 0,
        };
        let later = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let second_pass = plan_collection_recompute("u1", &first_pass.records, empty, later);
        assert!(second_pass.newly_unlocked.is_empty());
        let first = second_pass
            .records
            .iter()
            .find(|r| r.id == FIRST_PLANT)
            .unwrap();
        assert!(first.unlocked);
        assert_eq!(first.progress, 0);
        assert_eq!(first.unlocked_date, Some(now()));

        // Coming back to one plant does not re-unlock or move the timestamp.
        let third_pass = plan_collection_recompute("u1", &second_pass.records, snapshot, later);
        assert!(third_pass.newly_unlocked.is_empty());
        let first = third_pass
            .records
            .iter()
            .find(|r| r.id == FIRST_PLANT)
            .unwrap();
        assert_eq!(first.progress, 1);
        assert_eq!(first.unlocked_date, Some(now()));
    }

    #[test]
    fn collector_tracks_count_and_relocks() {
        let at_five = CollectionSnapshot {
            plant_count: 5,
            photographed_count: 0,
        };
        let outcome = plan_collection_recompute("u1", &[], at_five, now());
        let collector = outcome
            .records
            .iter()
            .find(|r| r.id == PLANT_COLLECTOR)
            .unwrap();
        assert!(collector.unlocked);
        assert_eq!(collector.progress, 5);
        assert!(outcome.newly_unlocked.iter().any(|u| u.id == PLANT_COLLECTOR));

        // Dropping to 4 re-locks, the only achievement that does.
        let at_four = CollectionSnapshot {
            plant_count: 4,
            photographed_count: 0,
        };
        let relocked = plan_collection_recompute("u1", &outcome.records, at_four, now());
        let collector = relocked
            .records
            .iter()
            .find(|r| r.id == PLANT_COLLECTOR)
            .unwrap();
        assert!(!collector.unlocked);
        assert_eq!(collector.progress, 4);
        assert!(relocked.newly_unlocked.is_empty());

        // Climbing back re-unlocks and reports it again.
        let again = plan_collection_recompute("u1", &relocked.records, at_five, now());
        assert!(again.newly_unlocked.iter().any(|u| u.id == PLANT_COLLECTOR));
    }

    #[test]
    fn relock_clears_the_unlock_timestamp() {
        let at_five = CollectionSnapshot {
            plant_count: 5,
            photographed_count: 0,
        };
        let at_four = CollectionSnapshot {
            plant_count: 4,
            photographed_count: 0,
        };
        let unlocked = plan_collection_recompute("u1", &[], at_five, now());
        let relocked = plan_collection_recompute("u1", &unlocked.records, at_four, now());
        let collector = relocked
            .records
            .iter()
            .find(|r| r.id == PLANT_COLLECTOR)
            .unwrap();
        // A locked badge must not carry a leftover unlock date.
        assert!(!collector.unlocked);
        assert_eq!(collector.unlocked_date, None);

        let again = plan_collection_recompute("u1", &relocked.records, at_five, now());
        let collector = again
            .records
            .iter()
            .find(|r| r.id == PLANT_COLLECTOR)
            .unwrap();
        assert_eq!(collector.unlocked_date, Some(now()));
    }

    #[test]
    fn photographer_unlock_is_one_way() {
        let at_ten = CollectionSnapshot {
            plant_count: 12,
            photographed_count: 10,
        };
        let outcome = plan_collection_recompute("u1", &[], at_ten, now());
        assert!(outcome
            .newly_unlocked
            .iter()
            .any(|u| u.id == PLANT_PHOTOGRAPHER));

        // Photos removed: progress drops but the badge stays.
        let fewer = CollectionSnapshot {
            plant_count: 12,
            photographed_count: 6,
        };
        let second = plan_collection_recompute("u1", &outcome.records, fewer, now());
        let photographer = second
            .records
            .iter()
            .find(|r| r.id == PLANT_PHOTOGRAPHER)
            .unwrap();
        assert!(photographer.unlocked);
        assert_eq!(photographer.progress, 6);
        assert!(second.newly_unlocked.is_empty());
    }

    #[test]
    fn empty_collection_creates_no_records() {
        let empty = CollectionSnapshot {
            plant_count: 0,
            photographed_count: 0,
        };
        let outcome = plan_collection_recompute("u1", &[], empty, now());
        assert!(outcome.records.is_empty());
        assert!(outcome.newly_unlocked.is_empty());
    }

    #[test]
    fn recompute_is_idempotent() {
        let snapshot = CollectionSnapshot {
            plant_count: 3,
            photographed_count: 1,
        };
        let first = plan_collection_recompute("u1", &[], snapshot, now());
        let second = plan_collection_recompute("u1", &first.records, snapshot, now());
        assert!(second.newly_unlocked.is_empty());
        assert_eq!(first.records, second.records);
    }
}

mod streaks {
    use super::*;

    #[test]
    fn first_day_initializes_to_one() {
        let outcome = plan_streak_advance("u1", &[], StreakScope::Watering, day(20), now());
        // Both watering streaks start counting.
        assert_eq!(outcome.records.len(), 2);
        for record in &outcome.records {
            assert_eq!(record.progress, 1);
            assert_eq!(record.last_completed_date(), Some(day(20)));
            assert!(!record.unlocked);
        }
        assert!(outcome.newly_unlocked.is_empty());
    }

    #[test]
    fn same_day_reentry_is_noop() {
        let first = plan_streak_advance("u1", &[], StreakScope::Watering, day(20), now());
        let second = plan_streak_advance("u1", &first.records, StreakScope::Watering, day(20), now());
        assert!(second.records.is_empty());
        assert!(second.newly_unlocked.is_empty());
    }

    #[test]
    fn consecutive_days_increment() {
        let mut records = Vec::new();
        for d in 16..=19 {
            let outcome = plan_streak_advance("u1", &records, StreakScope::Watering, day(d), now());
            for updated in outcome.records {
                records.retain(|r: &super::super::achievements_model::AchievementRecord| {
                    r.id != updated.id
                });
                records.push(updated);
            }
        }
        let warrior = records.iter().find(|r| r.id == WATER_WARRIOR).unwrap();
        assert_eq!(warrior.progress, 4);
        assert!(!warrior.unlocked);

        // Day five crosses the water-warrior target.
        let outcome = plan_streak_advance("u1", &records, StreakScope::Watering, day(20), now());
        assert!(outcome.newly_unlocked.iter().any(|u| u.id == WATER_WARRIOR));
        let warrior = outcome.records.iter().find(|r| r.id == WATER_WARRIOR).unwrap();
        assert!(warrior.unlocked);
        assert_eq!(warrior.progress, 5);
    }

    #[test]
    fn gap_resets_to_one() {
        let first = plan_streak_advance("u1", &[], StreakScope::Watering, day(16), now());
        let second = plan_streak_advance("u1", &first.records, StreakScope::Watering, day(17), now());
        // Two-day gap: progress restarts instead of continuing.
        let third = plan_streak_advance("u1", &second.records, StreakScope::Watering, day(19), now());
        for record in &third.records {
            assert_eq!(record.progress, 1);
            assert_eq!(record.last_completed_date(), Some(day(19)));
        }
    }

    #[test]
    fn unlocked_streaks_are_left_alone() {
        let mut records = Vec::new();
        for d in 10..=14 {
            let outcome = plan_streak_advance("u1", &records, StreakScope::Watering, day(d), now());
            for updated in outcome.records {
                records.retain(|r: &super::super::achievements_model::AchievementRecord| {
                    r.id != updated.id
                });
                records.push(updated);
            }
        }
        let warrior_before = records
            .iter()
            .find(|r| r.id == WATER_WARRIOR)
            .cloned()
            .unwrap();
        assert!(warrior_before.unlocked);

        // A long gap later: the unlocked badge does not move.
        let outcome = plan_streak_advance("u1", &records, StreakScope::Watering, day(25), now());
        assert!(!outcome.records.iter().any(|r| r.id == WATER_WARRIOR));
    }

    #[test]
    fn full_care_scope_touches_only_green_thumb() {
        let outcome = plan_streak_advance("u1", &[], StreakScope::FullCare, day(20), now());
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, GREEN_THUMB);
    }
}

mod daily_reset {
    use super::*;

    #[test]
    fn stale_locked_streaks_are_zeroed() {
        let advanced = plan_streak_advance("u1", &[], StreakScope::Watering, day(15), now());
        let resets = plan_daily_reset(&advanced.records, day(20));
        assert_eq!(resets.len(), 2);
        for record in &resets {
            assert_eq!(record.progress, 0);
            assert_eq!(record.last_completed_date(), None);
            assert!(!record.unlocked);
        }
    }

    #[test]
    fn todays_records_survive() {
        let advanced = plan_streak_advance("u1", &[], StreakScope::Watering, day(20), now());
        let resets = plan_daily_reset(&advanced.records, day(20));
        assert!(resets.is_empty());
    }

    #[test]
    fn unlocked_records_survive() {
        let mut records = Vec::new();
        for d in 10..=14 {
            let outcome = plan_streak_advance("u1", &records, StreakScope::Watering, day(d), now());
            for updated in outcome.records {
                records.retain(|r: &super::super::achievements_model::AchievementRecord| {
                    r.id != updated.id
                });
                records.push(updated);
            }
        }
        let resets = plan_daily_reset(&records, day(20));
        // Water-warrior is unlocked by day 14 and must not be zeroed;
        // consistent-caretaker (locked, stale) must be.
        assert_eq!(resets.len(), 1);
        assert_eq!(resets[0].id, super::super::achievements_constants::CONSISTENT_CARETAKER);
    }

    #[test]
    fn count_records_are_ignored() {
        let snapshot = CollectionSnapshot {
            plant_count: 3,
            photographed_count: 0,
        };
        let outcome = plan_collection_recompute("u1", &[], snapshot, now());
        assert!(plan_daily_reset(&outcome.records, day(20)).is_empty());
    }

    #[test]
    fn reset_record_keeps_streak_state_shape() {
        let advanced = plan_streak_advance("u1", &[], StreakScope::Watering, day(15), now());
        let resets = plan_daily_reset(&advanced.records, day(20));
        for record in resets {
            assert!(matches!(record.state, AchievementState::Streak { .. }));
        }
    }
}
