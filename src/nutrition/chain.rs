use std::sync::Arc;

use tracing::{debug, warn};

use super::profile::NutrientProfile;
use crate::sources::NutritionSource;

/// Measured profile plus the name of the source that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainHit {
    pub source: String,
    pub profile: NutrientProfile,
}

/// Ordered fallback over nutrition sources. First success wins.
#[derive(Clone, Default)]
pub struct SourceChain {
    sources: Vec<Arc<dyn NutritionSource>>,
}

impl SourceChain {
    pub fn new(sources: Vec<Arc<dyn NutritionSource>>) -> Self {
        Self { sources }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Try every source in order. `None` means no source had measured data.
    pub async fn first_match(&self, food_name: &str, quantity_g: f64) -> Option<ChainHit> {
        for source in &self.sources {
            match source.lookup(food_name, quantity_g).await {
                Ok(Some(profile)) => {
                    debug!(source = source.name(), food = %food_name, "source hit");
                    return Some(ChainHit {
                        source: source.name().to_string(),
                        profile,
                    });
                }
                Ok(None) => {
                    debug!(source = source.name(), food = %food_name, "source has no data");
                }
                Err(e) => {
                    warn!(source = source.name(), food = %food_name, error = %e, "source unavailable");
                }
            }
        }
        None
    }
}

#[cfg(test)]
pub(crate) mod test_sources {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::nutrition::NutrientProfile;
    use crate::sources::{NutritionSource, SourceError};

    pub enum Behaviour {
        Hit(NutrientProfile),
        Miss,
        Fail,
    }

    /// Scripted source that counts its calls.
    pub struct StubSource {
        pub name: &'static str,
        pub behaviour: Behaviour,
        pub calls: AtomicUsize,
    }

    impl StubSource {
        pub fn new(name: &'static str, behaviour: Behaviour) -> Self {
            Self {
                name,
                behaviour,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NutritionSource for StubSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn lookup(
            &self,
            _food_name: &str,
            quantity_g: f64,
        ) -> Result<Option<NutrientProfile>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behaviour {
                Behaviour::Hit(per_100g) => Ok(Some(per_100g.scaled_to(quantity_g))),
                Behaviour::Miss => Ok(None),
                Behaviour::Fail => Err(SourceError::Transport("connection refused".into())),
            }
        }
    }
}
