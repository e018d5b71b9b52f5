use super::achievements_model::AchievementKind;

/// Static definition of one achievement in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: AchievementKind,
    pub target: u32,
    pub xp_reward: u64,
    /// Whether the unlock can be revoked when progress later drops below
    /// target. Only the collection-size achievement behaves this way.
    pub relocks: bool,
}

pub const FIRST_PLANT: &str = "first-plant";
pub const PLANT_COLLECTOR: &str = "plant-collector";
pub const PLANT_PHOTOGRAPHER: &str = "plant-photographer";
pub const WATER_WARRIOR: &str = "water-warrior";
pub const CONSISTENT_CARETAKER: &str = "consistent-caretaker";
pub const GREEN_THUMB: &str = "green-thumb";

/// The full achievement catalog.
pub const ACHIEVEMENT_CATALOG: [AchievementDef; 6] = [
    AchievementDef {
        id: FIRST_PLANT,
        name: "First Plant",
        description: "Add your first plant",
        kind: AchievementKind::PlantCount,
        target: 1,
        xp_reward: 10,
        relocks: false,
    },
    AchievementDef {
        id: PLANT_COLLECTOR,
        name: "Plant Collector",
        description: "Grow your collection to 5 plants",
        kind: AchievementKind::PlantCount,
        target: 5,
        xp_reward: 50,
        relocks: true,
    },
    AchievementDef {
        id: PLANT_PHOTOGRAPHER,
        name: "Plant Photographer",
        description: "Add photos for 10 plants",
        kind: AchievementKind::PhotoCount,
        target: 10,
        xp_reward: 30,
        relocks: false,
    },
    AchievementDef {
        id: WATER_WARRIOR,
        name: "Water Warrior",
        description: "Water all your plants 5 days in a row",
        kind: AchievementKind::WateringStreak,
        target: 5,
        xp_reward: 25,
        relocks: false,
    },
    AchievementDef {
        id: CONSISTENT_CARETAKER,
        name: "Consistent Caretaker",
        description: "Water all your plants 7 days in a row",
        kind: AchievementKind::WateringStreak,
        target: 7,
        xp_reward: 75,
        relocks: false,
    },
    AchievementDef {
        id: GREEN_THUMB,
        name: "Green Thumb",
        description: "Keep every plant fully cared for 30 days in a row",
        kind: AchievementKind::FullCareStreak,
        target: 30,
        xp_reward: 100,
        relocks: false,
    },
];

/// Looks up a catalog entry by id.
pub fn achievement_def(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENT_CATALOG.iter().find(|d| d.id == id)
}

/// Catalog entries of the given kind.
pub fn defs_of_kind(kind: AchievementKind) -> impl Iterator<Item = &'static AchievementDef> {
    ACHIEVEMENT_CATALOG.iter().filter(move |d| d.kind == kind)
}
