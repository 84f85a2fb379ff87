use thiserror::Error;
use tracing::{debug, warn};

use super::chain::SourceChain;
use super::profile::{NutrientProfile, ResolutionResult};
use super::reference::{reference_per_100g, FLAT_ESTIMATE_PER_100G};

#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    #[error("quantity must be a positive number of grams, got {0}")]
    InvalidQuantity(f64),
}

/// Largest accepted quantity (one tonne). Keeps scaled profiles finite.
pub const MAX_QUANTITY_G: f64 = 1_000_000.0;

pub fn validate_quantity(quantity_g: f64) -> Result<(), ResolveError> {
    // `!(q > 0)` also rejects NaN
    if !(quantity_g > 0.0) || quantity_g > MAX_QUANTITY_G {
        return Err(ResolveError::InvalidQuantity(quantity_g));
    }
    Ok(())
}

/// Turns a food name and quantity into a normalized nutrient profile.
///
/// Tiers, in order: the configured source chain, the built-in reference
/// table, then a flat per-100g estimate. Only the last tier marks the
/// result as estimated, so once the quantity is valid this never fails.
#[derive(Clone, Default)]
pub struct NutritionResolver {
    chain: SourceChain,
}

impl NutritionResolver {
    pub fn new(chain: SourceChain) -> Self {
        Self { chain }
    }

    pub async fn resolve(
        &self,
        food_name: &str,
        quantity_g: f64,
    ) -> Result<ResolutionResult, ResolveError> {
        validate_quantity(quantity_g)?;

        let (profile, estimated) = match self.chain.first_match(food_name, quantity_g).await {
            Some(hit) => (hit.profile, false),
            None => match reference_per_100g(food_name) {
                Some(per_100g) => {
                    debug!(food = %food_name, "using built-in reference table");
                    (per_100g.scaled_to(quantity_g), false)
                }
                None => {
                    warn!(food = %food_name, quantity_g, "no source or reference data, using flat estimate");
                    (FLAT_ESTIMATE_PER_100G.scaled_to(quantity_g), true)
                }
            },
        };

        Ok(ResolutionResult {
            profile: profile.normalized(),
            estimated,
        })
    }
}
