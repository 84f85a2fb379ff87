use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::profile::NutrientProfile;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();

    /// Curated per-100g values for common foods.
    static ref REFERENCE_FOODS: HashMap<&'static str, NutrientProfile> = {
        // name => (calories, carbs, protein, fat, fiber)
        let rows: [(&str, [f64; 5]); 30] = [
            ("apple", [52.0, 14.0, 0.3, 0.2, 2.4]),
            ("banana", [89.0, 23.0, 1.1, 0.3, 2.6]),
            ("orange", [47.0, 12.0, 0.9, 0.1, 2.4]),
            ("chicken breast", [165.0, 0.0, 31.0, 3.6, 0.0]),
            ("beef steak", [271.0, 0.0, 25.0, 19.0, 0.0]),
            ("salmon", [208.0, 0.0, 20.0, 13.0, 0.0]),
            ("white rice", [130.0, 28.0, 2.7, 0.3, 0.4]),
            ("brown rice", [112.0, 23.0, 2.6, 0.9, 1.8]),
            ("pasta", [131.0, 25.0, 5.0, 1.1, 1.8]),
            ("whole wheat bread", [69.0, 13.0, 3.6, 0.9, 1.9]),
            ("white bread", [66.0, 13.0, 2.2, 0.8, 0.6]),
            ("potato", [77.0, 17.0, 2.0, 0.1, 2.2]),
            ("sweet potato", [86.0, 20.0, 1.6, 0.1, 3.0]),
            ("broccoli", [34.0, 7.0, 2.8, 0.4, 2.6]),
            ("spinach", [23.0, 3.6, 2.9, 0.4, 2.2]),
            ("carrot", [41.0, 10.0, 0.9, 0.2, 2.8]),
            ("milk", [42.0, 5.0, 3.4, 1.0, 0.0]),
            ("yogurt", [61.0, 6.0, 3.5, 1.5, 0.0]),
            ("cheese", [113.0, 1.3, 7.0, 9.0, 0.0]),
            ("egg", [78.0, 0.6, 6.0, 5.0, 0.0]),
            ("almonds", [164.0, 6.0, 6.0, 14.0, 3.5]),
            ("walnuts", [185.0, 4.0, 4.3, 18.0, 1.9]),
            ("peanut butter", [188.0, 6.0, 8.0, 16.0, 2.0]),
            ("olive oil", [119.0, 0.0, 0.0, 14.0, 0.0]),
            ("avocado", [160.0, 9.0, 2.0, 15.0, 7.0]),
            ("chocolate", [152.0, 16.0, 2.2, 9.0, 1.6]),
            ("oatmeal", [68.0, 12.0, 2.4, 1.4, 1.7]),
            ("quinoa", [120.0, 21.0, 4.4, 1.9, 2.8]),
            ("lentils", [116.0, 20.0, 9.0, 0.4, 7.9]),
            ("chickpeas", [139.0, 27.0, 7.1, 2.6, 7.1]),
        ];
        rows.into_iter()
            .map(|(name, [kcal, carbs, protein, fat, fiber])| {
                (name, NutrientProfile::new(kcal, carbs, protein, fat, fiber))
            })
            .collect()
    };
}

/// Per-100g baseline used when nothing else knows the food.
pub const FLAT_ESTIMATE_PER_100G: NutrientProfile = NutrientProfile::new(100.0, 20.0, 5.0, 3.0, 2.0);

/// Trim, lowercase and collapse internal whitespace.
pub fn normalize_food_name(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(name.trim(), " ")
        .to_lowercase()
}

/// Built-in per-100g table, matched case-insensitively on the whole name.
pub fn reference_per_100g(food_name: &str) -> Option<NutrientProfile> {
    REFERENCE_FOODS
        .get(normalize_food_name(food_name).as_str())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize_food_name("  Chicken \t  Breast "), "chicken breast");
        assert_eq!(normalize_food_name(""), "");
    }

    #[test]
    fn reference_lookup_is_case_insensitive_and_exact() {
        let apple = reference_per_100g("APPLE").expect("apple is curated");
        assert_eq!(apple.calories, 52.0);
        assert!(reference_per_100g("Peanut  Butter").is_some());
        assert!(reference_per_100g("apple pie").is_none());
        assert!(reference_per_100g("appl").is_none());
    }
}
