use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a plant wants water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WateringFrequency {
    Daily,
    AlternateDays,
    Weekly,
    Biweekly,
    Monthly,
    Custom,
}

impl WateringFrequency {
    /// Interval in whole days. `Custom` consults the plant's own setting,
    /// falling back to weekly; values below 1 are clamped to 1.
    pub fn interval_days(&self, custom_days: Option<i64>) -> i64 {
        let days = match self {
            WateringFrequency::Daily => 1,
            WateringFrequency::AlternateDays => 2,
            WateringFrequency::Weekly => 7,
            WateringFrequency::Biweekly => 14,
            WateringFrequency::Monthly => 30,
            WateringFrequency::Custom => custom_days.unwrap_or(7),
        };
        days.max(1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WateringFrequency::Daily => "daily",
            WateringFrequency::AlternateDays => "alternate-days",
            WateringFrequency::Weekly => "weekly",
            WateringFrequency::Biweekly => "biweekly",
            WateringFrequency::Monthly => "monthly",
            WateringFrequency::Custom => "custom",
        }
    }

    /// Unrecognized codes fall back to weekly so a stale stored value
    /// never breaks the due computation.
    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "daily" => WateringFrequency::Daily,
            "alternate-days" => WateringFrequency::AlternateDays,
            "biweekly" => WateringFrequency::Biweekly,
            "monthly" => WateringFrequency::Monthly,
            "custom" => WateringFrequency::Custom,
            _ => WateringFrequency::Weekly,
        }
    }
}

/// Fertilizing cadence, expressed in weeks. `Never` disables the dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FertilizingFrequency {
    Monthly,
    Bimonthly,
    Quarterly,
    Seasonal,
    Custom,
    Never,
}

impl FertilizingFrequency {
    /// Interval in days, or `None` when fertilizing is disabled.
    pub fn interval_days(&self, custom_weeks: Option<i64>) -> Option<i64> {
        let weeks = match self {
            FertilizingFrequency::Monthly => 4,
            FertilizingFrequency::Bimonthly => 8,
            FertilizingFrequency::Quarterly => 13,
            FertilizingFrequency::Seasonal => 16,
            FertilizingFrequency::Custom => custom_weeks.unwrap_or(4),
            FertilizingFrequency::Never => return None,
        };
        Some((weeks * 7).max(1))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FertilizingFrequency::Monthly => "monthly",
            FertilizingFrequency::Bimonthly => "bimonthly",
            FertilizingFrequency::Quarterly => "quarterly",
            FertilizingFrequency::Seasonal => "seasonal",
            FertilizingFrequency::Custom => "custom",
            FertilizingFrequency::Never => "never",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "bimonthly" => FertilizingFrequency::Bimonthly,
            "quarterly" => FertilizingFrequency::Quarterly,
            "seasonal" => FertilizingFrequency::Seasonal,
            "custom" => FertilizingFrequency::Custom,
            "never" => FertilizingFrequency::Never,
            _ => FertilizingFrequency::Monthly,
        }
    }
}

/// Maintenance cadence (pruning, repotting, etc.), expressed in weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceFrequency {
    Monthly,
    Quarterly,
    Biannually,
    Annually,
    Custom,
    Never,
}

impl MaintenanceFrequency {
    /// Interval in days, or `None` when maintenance is disabled.
    pub fn interval_days(&self, custom_weeks: Option<i64>) -> Option<i64> {
        let weeks = match self {
            MaintenanceFrequency::Monthly => 4,
            MaintenanceFrequency::Quarterly => 13,
            MaintenanceFrequency::Biannually => 26,
            MaintenanceFrequency::Annually => 52,
            MaintenanceFrequency::Custom => custom_weeks.unwrap_or(12),
            MaintenanceFrequency::Never => return None,
        };
        Some((weeks * 7).max(1))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceFrequency::Monthly => "monthly",
            MaintenanceFrequency::Quarterly => "quarterly",
            MaintenanceFrequency::Biannually => "biannually",
            MaintenanceFrequency::Annually => "annually",
            MaintenanceFrequency::Custom => "custom",
            MaintenanceFrequency::Never => "never",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "monthly" => MaintenanceFrequency::Monthly,
            "biannually" => MaintenanceFrequency::Biannually,
            "annually" => MaintenanceFrequency::Annually,
            "custom" => MaintenanceFrequency::Custom,
            "never" => MaintenanceFrequency::Never,
            _ => MaintenanceFrequency::Quarterly,
        }
    }
}

/// The three discrete care dimensions a plant is serviced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareTaskType {
    Water,
    Fertilize,
    Maintenance,
}

impl CareTaskType {
    pub const ALL: [CareTaskType; 3] = [
        CareTaskType::Water,
        CareTaskType::Fertilize,
        CareTaskType::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CareTaskType::Water => "water",
            CareTaskType::Fertilize => "fertilize",
            CareTaskType::Maintenance => "maintenance",
        }
    }
}

impl std::str::FromStr for CareTaskType {
    type Err = crate::errors::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "water" => Ok(CareTaskType::Water),
            "fertilize" => Ok(CareTaskType::Fertilize),
            "maintenance" => Ok(CareTaskType::Maintenance),
            other => Err(crate::errors::ValidationError::InvalidInput(format!(
                "unknown care task type: {other}"
            ))),
        }
    }
}

/// A plant in a user's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub plant_type: String,
    pub watering_frequency: WateringFrequency,
    pub custom_watering_days: Option<i64>,
    pub fertilizing_frequency: FertilizingFrequency,
    pub custom_fertilizing_weeks: Option<i64>,
    pub maintenance_frequency: MaintenanceFrequency,
    pub custom_maintenance_weeks: Option<i64>,
    pub last_watered: Option<DateTime<Utc>>,
    pub last_fertilized: Option<DateTime<Utc>>,
    pub last_maintenance: Option<DateTime<Utc>>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plant {
    pub fn has_photo(&self) -> bool {
        self.photo_url.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Payload for creating a plant. The id is assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlant {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub plant_type: String,
    pub watering_frequency: WateringFrequency,
    pub custom_watering_days: Option<i64>,
    #[serde(default = "default_fertilizing")]
    pub fertilizing_frequency: FertilizingFrequency,
    pub custom_fertilizing_weeks: Option<i64>,
    #[serde(default = "default_maintenance")]
    pub maintenance_frequency: MaintenanceFrequency,
    pub custom_maintenance_weeks: Option<i64>,
    pub photo_url: Option<String>,
}

fn default_fertilizing() -> FertilizingFrequency {
    FertilizingFrequency::Never
}

fn default_maintenance() -> MaintenanceFrequency {
    MaintenanceFrequency::Never
}

impl NewPlant {
    pub fn into_plant(self) -> Plant {
        let now = Utc::now();
        Plant {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: self.user_id,
            name: self.name,
            plant_type: self.plant_type,
            watering_frequency: self.watering_frequency,
            custom_watering_days: self.custom_watering_days,
            fertilizing_frequency: self.fertilizing_frequency,
            custom_fertilizing_weeks: self.custom_fertilizing_weeks,
            maintenance_frequency: self.maintenance_frequency,
            custom_maintenance_weeks: self.custom_maintenance_weeks,
            last_watered: None,
            last_fertilized: None,
            last_maintenance: None,
            photo_url: self.photo_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a plant's editable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantUpdate {
    pub name: Option<String>,
    pub plant_type: Option<String>,
    pub watering_frequency: Option<WateringFrequency>,
    pub custom_watering_days: Option<i64>,
    pub fertilizing_frequency: Option<FertilizingFrequency>,
    pub custom_fertilizing_weeks: Option<i64>,
    pub maintenance_frequency: Option<MaintenanceFrequency>,
    pub custom_maintenance_weeks: Option<i64>,
    pub photo_url: Option<String>,
}
