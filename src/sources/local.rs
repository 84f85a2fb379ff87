use std::sync::Arc;

use async_trait::async_trait;

use super::{NutritionSource, SourceError};
use crate::foods::repo::FoodCatalog;
use crate::nutrition::NutrientProfile;

/// Reads the persisted `foods` table.
pub struct LocalTableSource {
    catalog: Arc<dyn FoodCatalog>,
}

impl LocalTableSource {
    pub fn new(catalog: Arc<dyn FoodCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl NutritionSource for LocalTableSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn lookup(
        &self,
        food_name: &str,
        quantity_g: f64,
    ) -> Result<Option<NutrientProfile>, SourceError> {
        let food = self.catalog.find(food_name).await?;
        Ok(food.map(|f| f.per_100g().scaled_to(quantity_g)))
    }
}
