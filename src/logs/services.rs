use serde::Serialize;
use thiserror::Error;
use time::{macros::format_description, Date};
use tracing::info;
use uuid::Uuid;

use super::repo::LogStore;
use super::repo_types::NewLogEntry;
use crate::nutrition::{validate_quantity, NutrientProfile, NutritionResolver, ResolveError};

#[derive(Debug, Error)]
pub enum LogFoodError {
    #[error("quantity must be a positive number of grams, got {0}")]
    InvalidQuantity(f64),
    #[error("date must be YYYY-MM-DD, got {0:?}")]
    InvalidDate(String),
    #[error("failed to store food log: {0}")]
    Storage(#[source] anyhow::Error),
}

impl From<ResolveError> for LogFoodError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::InvalidQuantity(q) => LogFoodError::InvalidQuantity(q),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedFood {
    pub id: i64,
    pub estimated: bool,
    pub profile: NutrientProfile,
}

pub fn parse_date(raw: &str) -> Result<Date, LogFoodError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| LogFoodError::InvalidDate(raw.to_string()))
}

/// Validate, resolve and persist one food log entry.
///
/// Both the quantity and the date are checked before any nutrition source
/// is contacted.
pub async fn log_food(
    resolver: &NutritionResolver,
    store: &dyn LogStore,
    user_id: Uuid,
    food_name: &str,
    quantity_g: f64,
    date: &str,
    meal_type: &str,
) -> Result<LoggedFood, LogFoodError> {
    validate_quantity(quantity_g)?;
    let date = parse_date(date)?;

    let resolved = resolver.resolve(food_name, quantity_g).await?;
    let entry = NewLogEntry {
        user_id,
        food_name: food_name.trim().to_string(),
        quantity_g,
        profile: resolved.profile,
        estimated: resolved.estimated,
        date,
        meal_type: meal_type.trim().to_string(),
    };
    let id = store.append(&entry).await.map_err(LogFoodError::Storage)?;

    info!(%user_id, entry_id = id, food = %entry.food_name, estimated = resolved.estimated, "food logged");
    Ok(LoggedFood {
        id,
        estimated: resolved.estimated,
        profile: resolved.profile,
    })
}
