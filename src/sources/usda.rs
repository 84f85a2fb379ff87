//! USDA FoodData Central client.
//!
//! Searches for the food, takes the first candidate, fetches its details and
//! scales the per-100g nutrients. Successful lookups are memoised for the
//! lifetime of the source.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{extract::extract_per_100g, NutritionSource, ProfileCache, SourceError};
use crate::nutrition::{normalize_food_name, NutrientProfile};

const DATA_TYPES: &str = "Survey (FNDDS),Branded,Foundation,SR Legacy";

#[derive(Debug, Clone)]
pub struct UsdaConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
}

impl Default for UsdaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.nal.usda.gov/fdc/v1".into(),
            timeout_secs: 10,
            page_size: 10,
        }
    }
}

pub struct UsdaSource {
    config: UsdaConfig,
    http: reqwest::Client,
    cache: ProfileCache,
}

impl UsdaSource {
    pub fn new(config: UsdaConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            http,
            cache: ProfileCache::new(),
        })
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, SourceError> {
        let resp = self
            .http
            .get(url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        Ok(resp.json::<Value>().await?)
    }

    /// FDC id of the first search candidate, if any.
    async fn first_candidate(&self, food_name: &str) -> Result<Option<u64>, SourceError> {
        let url = format!("{}/foods/search", self.config.base_url);
        let page_size = self.config.page_size.to_string();
        let body = self
            .get_json(
                &url,
                &[
                    ("query", food_name),
                    ("pageSize", page_size.as_str()),
                    ("dataType", DATA_TYPES),
                ],
            )
            .await?;

        let foods = match body.get("foods") {
            Some(Value::Array(foods)) => foods,
            Some(_) => return Err(SourceError::Decode("`foods` is not an array".into())),
            None => return Ok(None),
        };
        let id = foods.first().and_then(|first| {
            first
                .get("fdcId")
                .or_else(|| first.get("fdc_id"))
                .and_then(Value::as_u64)
        });
        Ok(id)
    }

    async fn fetch_per_100g(&self, food_name: &str) -> Result<Option<NutrientProfile>, SourceError> {
        let Some(fdc_id) = self.first_candidate(food_name).await? else {
            return Ok(None);
        };
        let url = format!("{}/food/{}", self.config.base_url, fdc_id);
        let details = self.get_json(&url, &[]).await?;
        let per_100g = extract_per_100g(&details);
        if per_100g.is_none() {
            debug!(%fdc_id, "fdc details carry no tracked nutrients");
        }
        Ok(per_100g)
    }
}

#[async_trait]
impl NutritionSource for UsdaSource {
    fn name(&self) -> &str {
        "usda"
    }

    async fn lookup(
        &self,
        food_name: &str,
        quantity_g: f64,
    ) -> Result<Option<NutrientProfile>, SourceError> {
        if let Some(hit) = self.cache.get(food_name, quantity_g).await {
            debug!(food = %food_name, quantity_g, "usda cache hit");
            return Ok(Some(hit));
        }

        // query with the cache key so hits and fresh lookups agree
        let Some(per_100g) = self.fetch_per_100g(&normalize_food_name(food_name)).await? else {
            return Ok(None);
        };
        let profile = per_100g.scaled_to(quantity_g);
        self.cache.insert(food_name, quantity_g, profile).await;
        Ok(Some(profile))
    }
}
