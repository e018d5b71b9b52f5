use super::model::{LevelProgress, LevelThreshold};

/// The level ladder, ordered by ascending XP requirement.
///
/// Levels are derived purely from total XP; no level state is ever stored
/// beyond the XP total itself.
pub const LEVEL_THRESHOLDS: [LevelThreshold; 7] = [
    LevelThreshold { level: 1, min_xp: 0, title: "Seed Starter" },
    LevelThreshold { level: 2, min_xp: 100, title: "Sprout Caretaker" },
    LevelThreshold { level: 3, min_xp: 300, title: "Green Thumb" },
    LevelThreshold { level: 4, min_xp: 600, title: "Plant Parent" },
    LevelThreshold { level: 5, min_xp: 1000, title: "Garden Guardian" },
    LevelThreshold { level: 6, min_xp: 1500, title: "Plant Whisperer" },
    LevelThreshold { level: 7, min_xp: 2100, title: "Nature Master" },
];

/// Returns the highest threshold whose `min_xp` does not exceed `total_xp`.
fn threshold_for(total_xp: u64) -> &'static LevelThreshold {
    LEVEL_THRESHOLDS
        .iter()
        .rev()
        .find(|t| total_xp >= t.min_xp)
        .unwrap_or(&LEVEL_THRESHOLDS[0])
}

/// The level a user with `total_xp` experience points holds.
pub fn level_for_xp(total_xp: u64) -> u32 {
    threshold_for(total_xp).level
}

/// The title attached to the level reached at `total_xp`.
pub fn title_for_xp(total_xp: u64) -> &'static str {
    threshold_for(total_xp).title
}

/// Full standing for `total_xp`: level, title, and progress toward the next
/// threshold. At the top level `xp_to_next` is `None` and percent caps at 100.
pub fn progress_for_xp(total_xp: u64) -> LevelProgress {
    let current = threshold_for(total_xp);
    let next = LEVEL_THRESHOLDS.iter().find(|t| t.level == current.level + 1);

    let xp_into_level = total_xp - current.min_xp;
    let (xp_to_next, percent_to_next) = match next {
        Some(next) => {
            let span = next.min_xp - current.min_xp;
            let pct = if span == 0 { 100 } else { (xp_into_level * 100 / span) as u8 };
            (Some(next.min_xp - total_xp), pct.min(100))
        }
        None => (None, 100),
    };

    LevelProgress {
        level: current.level,
        title: current.title.to_string(),
        total_xp,
        xp_into_level,
        xp_to_next,
        percent_to_next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_at_exact_thresholds() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(300), 3);
        assert_eq!(level_for_xp(600), 4);
        assert_eq!(level_for_xp(1000), 5);
        assert_eq!(level_for_xp(1500), 6);
        assert_eq!(level_for_xp(2100), 7);
    }

    #[test]
    fn test_level_just_below_thresholds() {
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(299), 2);
        assert_eq!(level_for_xp(2099), 6);
    }

    #[test]
    fn test_level_beyond_top() {
        assert_eq!(level_for_xp(2101), 7);
        assert_eq!(level_for_xp(1_000_000), 7);
        assert_eq!(title_for_xp(1_000_000), "Nature Master");
    }

    #[test]
    fn test_progress_mid_level() {
        let p = progress_for_xp(150);
        assert_eq!(p.level, 2);
        assert_eq!(p.title, "Sprout Caretaker");
        assert_eq!(p.xp_into_level, 50);
        assert_eq!(p.xp_to_next, Some(150));
        assert_eq!(p.percent_to_next, 25);
    }

    #[test]
    fn test_progress_at_top_level() {
        let p = progress_for_xp(5000);
        assert_eq!(p.level, 7);
        assert_eq!(p.xp_to_next, None);
        assert_eq!(p.percent_to_next, 100);
    }
}
