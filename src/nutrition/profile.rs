use serde::{Deserialize, Serialize};

/// Nutrients for a specific quantity of food (not necessarily 100g).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub calories: f64,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

impl NutrientProfile {
    pub const fn new(calories: f64, carbs_g: f64, protein_g: f64, fat_g: f64, fiber_g: f64) -> Self {
        Self {
            calories,
            carbs_g,
            protein_g,
            fat_g,
            fiber_g,
        }
    }

    /// Scale per-100g reference values to `quantity_g`.
    pub fn scaled_to(self, quantity_g: f64) -> Self {
        let ratio = quantity_g / 100.0;
        self.map(|v| v * ratio)
    }

    /// Clamp every field to a finite, non-negative value rounded to 2 decimals.
    pub fn normalized(self) -> Self {
        self.map(|v| {
            let v = round2(v);
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        })
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            carbs_g: f(self.carbs_g),
            protein_g: f(self.protein_g),
            fat_g: f(self.fat_g),
            fiber_g: f(self.fiber_g),
        }
    }
}

/// Outcome of a resolution. `estimated` is only set by the flat-guess tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub profile: NutrientProfile,
    pub estimated: bool,
}

/// Round to 2 decimals. Values too large to carry cents are returned unchanged.
pub fn round2(v: f64) -> f64 {
    let cents = v * 100.0;
    if cents.is_finite() {
        cents.round() / 100.0
    } else {
        v
    }
}
