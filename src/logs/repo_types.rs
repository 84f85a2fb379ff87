use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::NutrientProfile;

/// A food log row waiting to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLogEntry {
    pub user_id: Uuid,
    pub food_name: String,
    pub quantity_g: f64,
    pub profile: NutrientProfile,
    pub estimated: bool,
    pub date: Date,
    pub meal_type: String,
}

/// Persisted food log row. Never updated after insert.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub user_id: Uuid,
    pub food_name: String,
    pub quantity_g: f64,
    pub carbs: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    pub estimated: bool,
    pub date: Date,
    pub meal_type: String,
    pub created_at: OffsetDateTime,
}

impl LogEntry {
    pub fn profile(&self) -> NutrientProfile {
        NutrientProfile::new(self.calories, self.carbs, self.protein, self.fat, self.fiber)
    }
}
