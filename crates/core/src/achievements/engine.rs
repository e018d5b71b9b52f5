//! Pure achievement state transitions.
//!
//! Every function here maps a snapshot of stored records plus fresh
//! aggregates to the records that must be written back, with no I/O.
//! Storage implementations call these inside a transaction; tests call
//! them over in-memory state. Concurrent recomputations therefore
//! converge on last-committed-wins over the recomputed aggregates,
//! never on lost delta updates.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::achievements_constants::{defs_of_kind, AchievementDef, ACHIEVEMENT_CATALOG};
use super::achievements_model::{
    AchievementKind, AchievementRecord, AchievementState, StreakScope, UnlockedAchievement,
};

/// Fresh aggregates read inside the same transaction as the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSnapshot {
    pub plant_count: u32,
    pub photographed_count: u32,
}

/// Result of a transition: records to upsert and unlocks to surface.
#[derive(Debug, Clone, Default)]
pub struct TransitionOutcome {
    pub records: Vec<AchievementRecord>,
    pub newly_unlocked: Vec<UnlockedAchievement>,
}

fn new_record(def: &AchievementDef, user_id: &str) -> AchievementRecord {
    let state = if def.kind.is_streak() {
        AchievementState::Streak {
            last_completed_date: None,
        }
    } else {
        AchievementState::Count
    };
    AchievementRecord {
        id: def.id.to_string(),
        user_id: user_id.to_string(),
        name: def.name.to_string(),
        progress: 0,
        target: def.target,
        unlocked: false,
        unlocked_date: None,
        xp_reward: def.xp_reward,
        state,
    }
}

fn unlock(record: &mut AchievementRecord, def: &AchievementDef, now: DateTime<Utc>) -> UnlockedAchievement {
    record.unlocked = true;
    record.unlocked_date = Some(now);
    UnlockedAchievement {
        id: def.id.to_string(),
        name: def.name.to_string(),
        description: def.description.to_string(),
        xp_reward: def.xp_reward,
        unlocked_date: now,
    }
}

/// Recomputes all count-based achievements from a fresh collection snapshot.
///
/// `existing` holds whichever records are already stored for this user;
/// records are created lazily, so a missing record with nothing to report
/// stays missing. One-way achievements are never revoked; the collection
/// size achievement re-locks when the count drops below target.
pub fn plan_collection_recompute(
    user_id: &str,
    existing: &[AchievementRecord],
    snapshot: CollectionSnapshot,
    now: DateTime<Utc>,
) -> TransitionOutcome {
    let mut outcome = TransitionOutcome::default();

    for def in ACHIEVEMENT_CATALOG.iter().filter(|d| !d.kind.is_streak()) {
        let aggregate = match def.kind {
            AchievementKind::PlantCount => snapshot.plant_count,
            AchievementKind::PhotoCount => snapshot.photographed_count,
            _ => continue,
        };
        let prior = existing.iter().find(|r| r.id == def.id);

        // Permanent one-shot achievements: progress keeps tracking the
        // collection, but the unlock and its timestamp never move.
        if !def.relocks && def.target == 1 {
            if aggregate == 0 && prior.is_none() {
                continue;
            }
            let mut record = prior.cloned().unwrap_or_else(|| new_record(def, user_id));
            record.progress = aggregate.min(1);
            if record.progress >= def.target && !record.unlocked {
                let unlocked = unlock(&mut record, def, now);
                outcome.newly_unlocked.push(unlocked);
            }
            outcome.records.push(record);
            continue;
        }

        if aggregate == 0 && prior.is_none() {
            continue;
        }
        let mut record = prior.cloned().unwrap_or_else(|| new_record(def, user_id));
        record.progress = aggregate;
        let reached = aggregate >= def.target;
        if reached && !record.unlocked {
            let unlocked = unlock(&mut record, def, now);
            outcome.newly_unlocked.push(unlocked);
        } else if !reached && record.unlocked && def.relocks {
            // Collection shrank below target: the badge and its
            // timestamp are taken back.
            record.unlocked = false;
            record.unlocked_date = None;
        }
        outcome.records.push(record);
    }

    outcome
}

/// Advances the streak achievements in `scope` for a day on which the
/// caller has verified nothing is pending.
///
/// Idempotent per calendar day via `last_completed_date`; a one-day gap
/// continues the streak, anything larger restarts it at 1. Unlocked
/// streak records are left untouched.
pub fn plan_streak_advance(
    user_id: &str,
    existing: &[AchievementRecord],
    scope: StreakScope,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> TransitionOutcome {
    let kind = match scope {
        StreakScope::Watering => AchievementKind::WateringStreak,
        StreakScope::FullCare => AchievementKind::FullCareStreak,
    };
    let mut outcome = TransitionOutcome::default();

    for def in defs_of_kind(kind) {
        let prior = existing.iter().find(|r| r.id == def.id);
        if prior.is_some_and(|r| r.unlocked) {
            continue;
        }
        let last = prior.and_then(|r| r.last_completed_date());
        if last == Some(today) {
            continue;
        }

        let mut record = prior.cloned().unwrap_or_else(|| new_record(def, user_id));
        let continues = last == Some(today - Duration::days(1));
        record.progress = if continues { record.progress + 1 } else { 1 };
        record.state = AchievementState::Streak {
            last_completed_date: Some(today),
        };
        if record.progress >= def.target {
            let unlocked = unlock(&mut record, def, now);
            outcome.newly_unlocked.push(unlocked);
        }
        outcome.records.push(record);
    }

    outcome
}

/// Lazily applies the streak-break rule: zeroes progress for locked streak
/// records whose last counted day is not `today`.
///
/// The caller only invokes this when the user still has pending tasks for
/// the day; a fully caught-up day must not wipe a streak that is about to
/// be advanced. Unlocked records are never touched.
pub fn plan_daily_reset(existing: &[AchievementRecord], today: NaiveDate) -> Vec<AchievementRecord> {
    existing
        .iter()
        .filter(|r| {
            matches!(r.state, AchievementState::Streak { .. })
                && !r.unlocked
                && r.last_completed_date() != Some(today)
                && (r.progress > 0 || r.last_completed_date().is_some())
        })
        .map(|r| {
            let mut record = r.clone();
            record.progress = 0;
            record.state = AchievementState::Streak {
                last_completed_date: None,
            };
            record
        })
        .collect()
}
