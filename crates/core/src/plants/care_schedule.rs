//! Pure care-due predicates.
//!
//! All date arithmetic is midnight-to-midnight on calendar dates in the
//! canonical care timezone; see `utils::time_utils`.

use chrono::NaiveDate;

use super::plants_model::Plant;
use crate::utils::time_utils::{care_date_from_utc, days_between};

/// Whether a care dimension is due on `target_date`.
///
/// A never-serviced plant is immediately due for any date from today on.
/// Otherwise the predicate fires when the interval has fully elapsed, but
/// only on the due day itself and on exact interval multiples thereafter,
/// so an overdue plant is not flagged anew on every intermediate day.
pub fn is_due(
    last_serviced: Option<NaiveDate>,
    interval_days: i64,
    target_date: NaiveDate,
    today: NaiveDate,
) -> bool {
    let interval = interval_days.max(1);
    match last_serviced {
        None => target_date >= today,
        Some(last) => {
            let days_since = days_between(last, target_date);
            days_since >= interval && (target_date == today || days_since % interval == 0)
        }
    }
}

/// Watering due check for a plant on a given date.
pub fn is_watering_due(plant: &Plant, target_date: NaiveDate, today: NaiveDate) -> bool {
    let interval = plant
        .watering_frequency
        .interval_days(plant.custom_watering_days);
    is_due(
        plant.last_watered.map(care_date_from_utc),
        interval,
        target_date,
        today,
    )
}

/// Fertilizing due check. Plants on a `never` schedule are never due.
pub fn is_fertilizing_due(plant: &Plant, target_date: NaiveDate, today: NaiveDate) -> bool {
    match plant
        .fertilizing_frequency
        .interval_days(plant.custom_fertilizing_weeks)
    {
        Some(interval) => is_due(
            plant.last_fertilized.map(care_date_from_utc),
            interval,
            target_date,
            today,
        ),
        None => false,
    }
}

/// Maintenance due check. Plants on a `never` schedule are never due.
pub fn is_maintenance_due(plant: &Plant, target_date: NaiveDate, today: NaiveDate) -> bool {
    match plant
        .maintenance_frequency
        .interval_days(plant.custom_maintenance_weeks)
    {
        Some(interval) => is_due(
            plant.last_maintenance.map(care_date_from_utc),
            interval,
            target_date,
            today,
        ),
        None => false,
    }
}

/// Whether any of the three care dimensions is due today.
pub fn needs_any_care(plant: &Plant, today: NaiveDate) -> bool {
    is_watering_due(plant, today, today)
        || is_fertilizing_due(plant, today, today)
        || is_maintenance_due(plant, today, today)
}

/// Whether the plant was already watered on `today`.
pub fn watered_on(plant: &Plant, day: NaiveDate) -> bool {
    plant
        .last_watered
        .map(care_date_from_utc)
        .is_some_and(|d| d == day)
}
