//! Pulls the five tracked nutrients out of provider JSON.
//!
//! Providers disagree on shape. FoodData Central lists nutrients in a
//! `foodNutrients` array keyed by nutrient number (legacy `208`) or id
//! (`1008`), and the key and amount live in different places depending on
//! the endpoint. Open Food Facts and Nutritionix use flat keys instead.

use serde_json::{Map, Value};

use crate::nutrition::NutrientProfile;

#[derive(Clone, Copy)]
enum Field {
    Calories,
    Carbs,
    Protein,
    Fat,
    Fiber,
}

const FLAT_ALIASES: [(&str, Field); 10] = [
    ("energy-kcal_100g", Field::Calories),
    ("nf_calories", Field::Calories),
    ("carbohydrates_100g", Field::Carbs),
    ("nf_total_carbohydrate", Field::Carbs),
    ("proteins_100g", Field::Protein),
    ("nf_protein", Field::Protein),
    ("fat_100g", Field::Fat),
    ("nf_total_fat", Field::Fat),
    ("fiber_100g", Field::Fiber),
    ("nf_dietary_fiber", Field::Fiber),
];

fn field_for_nutrient(id: u64) -> Option<Field> {
    match id {
        208 | 1008 => Some(Field::Calories),
        205 | 1005 => Some(Field::Carbs),
        203 | 1003 => Some(Field::Protein),
        204 | 1004 => Some(Field::Fat),
        291 | 1079 => Some(Field::Fiber),
        _ => None,
    }
}

#[derive(Default)]
struct Found([Option<f64>; 5]);

impl Found {
    /// First value seen for a field wins.
    fn set(&mut self, field: Field, value: f64) {
        let slot = &mut self.0[field as usize];
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    fn into_profile(self) -> Option<NutrientProfile> {
        if self.0.iter().all(Option::is_none) {
            return None;
        }
        let [calories, carbs, protein, fat, fiber] = self.0.map(|v| v.unwrap_or(0.0));
        Some(NutrientProfile::new(calories, carbs, protein, fat, fiber))
    }
}

fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_id(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn nutrient_id(entry: &Map<String, Value>) -> Option<u64> {
    let nested = entry.get("nutrient").and_then(Value::as_object);
    [
        nested.and_then(|n| n.get("number")),
        nested.and_then(|n| n.get("id")),
        entry.get("nutrientId"),
        entry.get("number"),
        entry.get("nutrient_number"),
    ]
    .into_iter()
    .flatten()
    .find_map(as_id)
}

fn nutrient_amount(entry: &Map<String, Value>) -> f64 {
    let top = ["amount", "value", "nutrient_amount", "nutrientValue"]
        .iter()
        .find_map(|k| entry.get(*k).and_then(as_number));
    top.or_else(|| {
        let nested = entry.get("nutrient").and_then(Value::as_object)?;
        ["amount", "value"]
            .iter()
            .find_map(|k| nested.get(*k).and_then(as_number))
    })
    .unwrap_or(0.0)
}

fn read_flat(obj: &Map<String, Value>, found: &mut Found) {
    for (key, field) in FLAT_ALIASES {
        if let Some(v) = obj.get(key).and_then(as_number) {
            found.set(field, v);
        }
    }
}

/// Extract per-100g nutrients from a food document.
///
/// Returns `None` when no tracked nutrient is present at all; fields that
/// are missing individually default to 0.0.
pub fn extract_per_100g(doc: &Value) -> Option<NutrientProfile> {
    let obj = doc.as_object()?;
    let mut found = Found::default();

    let nutrients = obj
        .get("foodNutrients")
        .or_else(|| obj.get("food_nutrients"))
        .and_then(Value::as_array);
    for entry in nutrients.into_iter().flatten().filter_map(Value::as_object) {
        if let Some(field) = nutrient_id(entry).and_then(field_for_nutrient) {
            found.set(field, nutrient_amount(entry));
        }
    }

    read_flat(obj, &mut found);
    if let Some(nutriments) = obj.get("nutriments").and_then(Value::as_object) {
        read_flat(nutriments, &mut found);
    }

    found.into_profile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fdc_details_with_nested_nutrient_ids() {
        let doc = json!({
            "fdcId": 171688,
            "foodNutrients": [
                { "nutrient": { "id": 1008, "number": "208", "name": "Energy" }, "amount": 52.0 },
                { "nutrient": { "id": 1005, "number": "205" }, "amount": 13.81 },
                { "nutrient": { "id": 1003, "number": "203" }, "amount": 0.26 },
                { "nutrient": { "id": 1004, "number": "204" }, "amount": 0.17 },
                { "nutrient": { "id": 1079, "number": "291" }, "amount": 2.4 },
                { "nutrient": { "id": 1051, "number": "255" }, "amount": 85.6 }
            ]
        });
        let p = extract_per_100g(&doc).unwrap();
        assert_eq!(p, NutrientProfile::new(52.0, 13.81, 0.26, 0.17, 2.4));
    }

    #[test]
    fn fdc_search_style_entries() {
        let doc = json!({
            "foodNutrients": [
                { "nutrientId": 1008, "value": 165 },
                { "nutrientNumber": "203", "nutrient_number": "203", "value": "31.0" },
                { "number": 204, "nutrientValue": 3.6 },
                { "nutrient": { "number": "205", "amount": 0.5 } }
            ]
        });
        let p = extract_per_100g(&doc).unwrap();
        assert_eq!(p.calories, 165.0);
        assert_eq!(p.protein_g, 31.0);
        assert_eq!(p.fat_g, 3.6);
        assert_eq!(p.carbs_g, 0.5);
        assert_eq!(p.fiber_g, 0.0);
    }

    #[test]
    fn flat_aliases_at_top_level_and_under_nutriments() {
        let off = json!({
            "product_name": "Granola",
            "nutriments": {
                "energy-kcal_100g": 471,
                "carbohydrates_100g": 64,
                "proteins_100g": 10,
                "fat_100g": 20
            }
        });
        assert_eq!(
            extract_per_100g(&off).unwrap(),
            NutrientProfile::new(471.0, 64.0, 10.0, 20.0, 0.0)
        );

        let nix = json!({ "nf_calories": 95, "nf_dietary_fiber": 4.4 });
        let p = extract_per_100g(&nix).unwrap();
        assert_eq!(p.calories, 95.0);
        assert_eq!(p.fiber_g, 4.4);
        assert_eq!(p.fat_g, 0.0);
    }

    #[test]
    fn nothing_recognised_is_none() {
        assert!(extract_per_100g(&json!({ "foodNutrients": [] })).is_none());
        assert!(extract_per_100g(&json!({ "foodNutrients": [{ "nutrientId": 1051, "value": 3 }] })).is_none());
        assert!(extract_per_100g(&json!([1, 2, 3])).is_none());
    }
}
