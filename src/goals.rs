//! Daily calorie goal via the Mifflin-St Jeor equation.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_CALORIES: u32 = 2000;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BodyProfile {
    pub age: u32,
    pub gender: Option<String>,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: Option<String>,
    /// `lose`, `gain` or anything else for maintenance.
    pub weight_goal: Option<String>,
}

fn activity_factor(level: Option<&str>) -> f64 {
    match level.map(|l| l.trim().to_lowercase()).as_deref() {
        Some("light") => 1.375,
        Some("moderate") => 1.55,
        Some("active") => 1.725,
        Some("very active") => 1.9,
        _ => 1.2,
    }
}

fn goal_adjustment(goal: Option<&str>) -> f64 {
    match goal.map(|g| g.trim().to_lowercase()).as_deref() {
        Some("lose") => -500.0,
        Some("gain") => 500.0,
        _ => 0.0,
    }
}

/// Basal metabolic rate in kcal/day.
pub fn basal_metabolic_rate(p: &BodyProfile) -> f64 {
    let base = 10.0 * p.weight_kg + 6.25 * p.height_cm - 5.0 * f64::from(p.age);
    let male = p
        .gender
        .as_deref()
        .is_some_and(|g| g.trim().eq_ignore_ascii_case("male"));
    if male {
        base + 5.0
    } else {
        base - 161.0
    }
}

/// Daily calorie goal, truncated to whole kcal. `None` yields the default.
pub fn estimate_daily_calories(profile: Option<&BodyProfile>) -> u32 {
    let Some(p) = profile else {
        return DEFAULT_DAILY_CALORIES;
    };
    let calories = basal_metabolic_rate(p) * activity_factor(p.activity_level.as_deref())
        + goal_adjustment(p.weight_goal.as_deref());
    if calories.is_finite() && calories > 0.0 {
        calories.trunc() as u32
    } else {
        0
    }
}
