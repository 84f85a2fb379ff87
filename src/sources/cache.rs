use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::nutrition::{normalize_food_name, NutrientProfile};

/// Process-lifetime memo of successful lookups, keyed by normalized name and quantity.
#[derive(Debug, Default)]
pub struct ProfileCache {
    entries: RwLock<HashMap<(String, u64), NutrientProfile>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(food_name: &str, quantity_g: f64) -> (String, u64) {
        (normalize_food_name(food_name), quantity_g.to_bits())
    }

    pub async fn get(&self, food_name: &str, quantity_g: f64) -> Option<NutrientProfile> {
        self.entries
            .read()
            .await
            .get(&Self::key(food_name, quantity_g))
            .copied()
    }

    pub async fn insert(&self, food_name: &str, quantity_g: f64, profile: NutrientProfile) {
        self.entries
            .write()
            .await
            .insert(Self::key(food_name, quantity_g), profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keys_on_normalized_name_and_quantity() {
        let cache = ProfileCache::new();
        let p = NutrientProfile::new(1.0, 2.0, 3.0, 4.0, 5.0);
        cache.insert("Rye  Bread", 50.0, p).await;

        assert_eq!(cache.get("rye bread", 50.0).await, Some(p));
        assert_eq!(cache.get("rye bread", 51.0).await, None);
        assert_eq!(cache.get("rye bread", 50.000_000_1).await, None);
    }
}
