use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REMINDER_TIME;
use crate::plants::Plant;

/// A rendered push notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderMessage {
    pub title: String,
    pub body: String,
}

/// Single-plant reminder bodies. `{plantName}` and `{plantType}` are
/// substituted before sending.
const SINGLE_PLANT_TEMPLATES: [&str; 4] = [
    "{plantName} is thirsty! Time for some water.",
    "Your {plantType} {plantName} could use a drink today.",
    "Don't forget {plantName} - watering day is here.",
    "{plantName} is waiting for its water. A quick splash keeps it happy!",
];

/// Parses a reminder time-of-day string into `(hour, minute)`.
///
/// Accepts 24-hour ("21:30") and 12-hour ("9:00 AM") forms. Anything
/// unparseable falls back to the default reminder time rather than
/// failing the sweep.
pub fn parse_reminder_time(input: &str) -> (u32, u32) {
    fn parse(input: &str) -> Option<(u32, u32)> {
        let trimmed = input.trim();
        let (clock, meridiem) = match trimmed.rsplit_once(' ') {
            Some((clock, suffix))
                if suffix.eq_ignore_ascii_case("am") || suffix.eq_ignore_ascii_case("pm") =>
            {
                (clock, Some(suffix.to_ascii_lowercase()))
            }
            _ => (trimmed, None),
        };

        let (hour_str, minute_str) = clock.split_once(':').unwrap_or((clock, "0"));
        let mut hour: u32 = hour_str.trim().parse().ok()?;
        let minute: u32 = minute_str.trim().parse().ok()?;

        match meridiem.as_deref() {
            Some("am") => {
                if !(1..=12).contains(&hour) {
                    return None;
                }
                if hour == 12 {
                    hour = 0;
                }
            }
            Some("pm") => {
                if !(1..=12).contains(&hour) {
                    return None;
                }
                if hour != 12 {
                    hour += 12;
                }
            }
            _ => {
                if hour > 23 {
                    return None;
                }
            }
        }
        (minute <= 59).then_some((hour, minute))
    }

    parse(input).unwrap_or(DEFAULT_REMINDER_TIME)
}

/// Builds the reminder for the plants due today.
///
/// One plant gets a themed message; several get a combined body naming
/// at most the first three, with the remainder summarized.
pub fn build_reminder(plants: &[Plant], template_index: usize) -> Option<ReminderMessage> {
    match plants {
        [] => None,
        [plant] => {
            let template = SINGLE_PLANT_TEMPLATES[template_index % SINGLE_PLANT_TEMPLATES.len()];
            let body = template
                .replace("{plantName}", &plant.name)
                .replace("{plantType}", &plant.plant_type);
            Some(ReminderMessage {
                title: "Watering reminder".to_string(),
                body,
            })
        }
        many => {
            let named: Vec<&str> = many.iter().take(3).map(|p| p.name.as_str()).collect();
            let body = if many.len() > 3 {
                format!(
                    "{} and {} more need watering today!",
                    named.join(", "),
                    many.len() - 3
                )
            } else {
                format!("{} need watering today!", named.join(", "))
            };
            Some(ReminderMessage {
                title: format!("{} plants need water", many.len()),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_24_hour() {
        assert_eq!(parse_reminder_time("21:30"), (21, 30));
        assert_eq!(parse_reminder_time("09:00"), (9, 0));
        assert_eq!(parse_reminder_time("0:05"), (0, 5));
    }

    #[test]
    fn test_parse_12_hour() {
        assert_eq!(parse_reminder_time("9:00 AM"), (9, 0));
        assert_eq!(parse_reminder_time("9:15 pm"), (21, 15));
        assert_eq!(parse_reminder_time("12:00 AM"), (0, 0));
        assert_eq!(parse_reminder_time("12:30 PM"), (12, 30));
    }

    #[test]
    fn test_parse_garbage_falls_back() {
        assert_eq!(parse_reminder_time("soon"), (9, 0));
        assert_eq!(parse_reminder_time("25:00"), (9, 0));
        assert_eq!(parse_reminder_time("9:75"), (9, 0));
        assert_eq!(parse_reminder_time(""), (9, 0));
    }
}
