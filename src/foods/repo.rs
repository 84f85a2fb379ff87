use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use super::fuzzy;
use super::repo_types::Food;
use crate::nutrition::normalize_food_name;

/// Persisted per-100g reference foods.
#[async_trait]
pub trait FoodCatalog: Send + Sync {
    /// Exact (case-insensitive) match, else the shortest name containing `name`.
    async fn find(&self, name: &str) -> anyhow::Result<Option<Food>>;
    /// Insert or replace a food. The name is stored normalized.
    async fn upsert(&self, food: &Food) -> anyhow::Result<()>;
    /// Names similar to `keyword` (typos tolerated), best match first.
    async fn search(&self, keyword: &str, limit: i64) -> anyhow::Result<Vec<String>>;
}

pub struct PgFoodCatalog {
    db: PgPool,
}

impl PgFoodCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl FoodCatalog for PgFoodCatalog {
    async fn find(&self, name: &str) -> anyhow::Result<Option<Food>> {
        let key = normalize_food_name(name);
        if key.is_empty() {
            return Ok(None);
        }
        let food = sqlx::query_as::<_, Food>(
            r#"
            SELECT name, calories, carbs, protein, fat, fiber
              FROM foods
             WHERE name = $1 OR name LIKE $2
             ORDER BY (name = $1) DESC, length(name) ASC, name ASC
             LIMIT 1
            "#,
        )
        .bind(&key)
        .bind(like_pattern(&key))
        .fetch_optional(&self.db)
        .await
        .context("find food")?;
        Ok(food)
    }

    async fn upsert(&self, food: &Food) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO foods (name, calories, carbs, protein, fat, fiber)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO UPDATE
               SET calories = EXCLUDED.calories,
                   carbs = EXCLUDED.carbs,
                   protein = EXCLUDED.protein,
                   fat = EXCLUDED.fat,
                   fiber = EXCLUDED.fiber
            "#,
        )
        .bind(normalize_food_name(&food.name))
        .bind(food.calories)
        .bind(food.carbs)
        .bind(food.protein)
        .bind(food.fat)
        .bind(food.fiber)
        .execute(&self.db)
        .await
        .context("upsert food")?;
        Ok(())
    }

    async fn search(&self, keyword: &str, limit: i64) -> anyhow::Result<Vec<String>> {
        let key = normalize_food_name(keyword);
        if key.is_empty() {
            return Ok(Vec::new());
        }
        // scored in process; LIKE cannot express typo tolerance
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM foods")
            .fetch_all(&self.db)
            .await
            .context("search foods")?;
        Ok(fuzzy::rank(
            &key,
            names.iter().map(String::as_str),
            limit.max(0) as usize,
        ))
    }
}

/// In-process catalog for tests and database-less runs.
#[derive(Default)]
pub struct MemoryFoodCatalog {
    foods: RwLock<BTreeMap<String, Food>>,
}

impl MemoryFoodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names containing `key`, ordered like the Postgres `find` query.
    fn matching<'a>(foods: &'a BTreeMap<String, Food>, key: &str) -> Vec<&'a Food> {
        let mut hits: Vec<&Food> = foods.values().filter(|f| f.name.contains(key)).collect();
        hits.sort_by(|a, b| a.name.len().cmp(&b.name.len()).then_with(|| a.name.cmp(&b.name)));
        hits
    }
}

#[async_trait]
impl FoodCatalog for MemoryFoodCatalog {
    async fn find(&self, name: &str) -> anyhow::Result<Option<Food>> {
        let key = normalize_food_name(name);
        if key.is_empty() {
            return Ok(None);
        }
        let foods = self.foods.read().await;
        if let Some(exact) = foods.get(&key) {
            return Ok(Some(exact.clone()));
        }
        Ok(Self::matching(&foods, &key).first().map(|f| (*f).clone()))
    }

    async fn upsert(&self, food: &Food) -> anyhow::Result<()> {
        let name = normalize_food_name(&food.name);
        let stored = Food {
            name: name.clone(),
            ..food.clone()
        };
        self.foods.write().await.insert(name, stored);
        Ok(())
    }

    async fn search(&self, keyword: &str, limit: i64) -> anyhow::Result<Vec<String>> {
        let key = normalize_food_name(keyword);
        if key.is_empty() {
            return Ok(Vec::new());
        }
        let foods = self.foods.read().await;
        Ok(fuzzy::rank(
            &key,
            foods.keys().map(String::as_str),
            limit.max(0) as usize,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(name: &str, calories: f64) -> Food {
        Food {
            name: name.into(),
            calories,
            carbs: 1.0,
            protein: 2.0,
            fat: 3.0,
            fiber: 0.5,
        }
    }

    async fn catalog() -> MemoryFoodCatalog {
        let c = MemoryFoodCatalog::new();
        for f in [
            food("Greek Yogurt", 59.0),
            food("yogurt", 61.0),
            food("frozen yogurt bar", 200.0),
            food("rye bread", 259.0),
        ] {
            c.upsert(&f).await.unwrap();
        }
        c
    }

    #[tokio::test]
    async fn find_prefers_exact_then_shortest_substring() {
        let c = catalog().await;
        assert_eq!(c.find("YOGURT").await.unwrap().unwrap().calories, 61.0);
        assert_eq!(c.find("greek yogurt").await.unwrap().unwrap().calories, 59.0);
        assert_eq!(c.find("rye").await.unwrap().unwrap().name, "rye bread");
        assert!(c.find("kale").await.unwrap().is_none());
        assert!(c.find("   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_replaces_by_normalized_name() {
        let c = catalog().await;
        c.upsert(&food("  RYE   Bread", 250.0)).await.unwrap();
        assert_eq!(c.find("rye bread").await.unwrap().unwrap().calories, 250.0);
        let names = c.search("rye", 10).await.unwrap();
        assert_eq!(names.first().map(String::as_str), Some("rye bread"));
        assert_eq!(names.iter().filter(|n| n.contains("rye")).count(), 1);
    }

    #[tokio::test]
    async fn search_orders_and_limits() {
        let c = catalog().await;
        assert_eq!(
            c.search("yog", 2).await.unwrap(),
            vec!["yogurt".to_string(), "greek yogurt".to_string()]
        );
        assert!(c.search("", 8).await.unwrap().is_empty());
        assert!(c.search("kale", 8).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_tolerates_typos() {
        let c = catalog().await;
        let names = c.search("Yougurt", 8).await.unwrap();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"yogurt".to_string()));
        assert!(names.contains(&"greek yogurt".to_string()));
        assert!(!names.contains(&"rye bread".to_string()));

        // substring queries are not typos and stay exact-first
        assert_eq!(c.search("bread", 8).await.unwrap(), vec!["rye bread".to_string()]);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
