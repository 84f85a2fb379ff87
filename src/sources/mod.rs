//! Nutrition lookup backends.
//!
//! Every backend implements [`NutritionSource`]. A lookup either returns a
//! profile already scaled to the requested quantity, `Ok(None)` when the
//! backend simply does not know the food, or a [`SourceError`] when the
//! backend itself could not be reached or answered garbage.

use async_trait::async_trait;
use thiserror::Error;

use crate::nutrition::NutrientProfile;

mod cache;
pub mod extract;
pub mod local;
pub mod usda;

pub use cache::ProfileCache;
pub use local::LocalTableSource;
pub use usda::{UsdaConfig, UsdaSource};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::Decode(e.to_string())
        } else {
            SourceError::Transport(e.to_string())
        }
    }
}

#[async_trait]
pub trait NutritionSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Look up `food_name` and scale to `quantity_g`. `Ok(None)` means not found.
    async fn lookup(
        &self,
        food_name: &str,
        quantity_g: f64,
    ) -> Result<Option<NutrientProfile>, SourceError>;
}
