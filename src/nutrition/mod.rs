//! Nutrition resolution: profiles, the source chain and the resolver.

pub mod chain;
pub mod profile;
pub mod reference;
pub mod resolver;

pub use chain::{ChainHit, SourceChain};
pub use profile::{round2, NutrientProfile, ResolutionResult};
pub use reference::{normalize_food_name, reference_per_100g, FLAT_ESTIMATE_PER_100G};
pub use resolver::{validate_quantity, MAX_QUANTITY_G, NutritionResolver, ResolveError};
