use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::nutrition::NutrientProfile;

/// Row of the local reference table. Values are per 100g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Food {
    pub name: String,
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl Food {
    pub fn per_100g(&self) -> NutrientProfile {
        NutrientProfile::new(self.calories, self.carbs, self.protein, self.fat, self.fiber)
    }
}
