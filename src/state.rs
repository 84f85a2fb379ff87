use crate::config::{AppConfig, SourceKind};
use crate::foods::repo::{FoodCatalog, MemoryFoodCatalog, PgFoodCatalog};
use crate::logs::repo::{LogStore, MemoryLogStore, PgLogStore};
use crate::nutrition::{NutritionResolver, SourceChain};
use crate::sources::{LocalTableSource, NutritionSource, UsdaSource};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<NutritionResolver>,
    pub foods: Arc<dyn FoodCatalog>,
    pub logs: Arc<dyn LogStore>,
}

/// Instantiate the configured sources in priority order.
pub fn build_sources(
    config: &AppConfig,
    foods: Arc<dyn FoodCatalog>,
) -> anyhow::Result<Vec<Arc<dyn NutritionSource>>> {
    let mut sources: Vec<Arc<dyn NutritionSource>> = Vec::new();
    for kind in &config.sources {
        match kind {
            SourceKind::Usda => match &config.usda {
                Some(usda) => sources.push(Arc::new(UsdaSource::new(usda.clone())?)),
                None => warn!("USDA_API_KEY not set; skipping usda source"),
            },
            SourceKind::Local => sources.push(Arc::new(LocalTableSource::new(foods.clone()))),
        }
    }
    Ok(sources)
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db = crate::db::connect(&config.database_url).await?;
        if let Err(e) = crate::db::migrate(&db).await {
            warn!(error = %e, "migration failed; continuing");
        }

        let foods = Arc::new(PgFoodCatalog::new(db.clone())) as Arc<dyn FoodCatalog>;
        let logs = Arc::new(PgLogStore::new(db)) as Arc<dyn LogStore>;
        let chain = SourceChain::new(build_sources(config, foods.clone())?);
        info!(sources = ?chain.source_names(), "nutrition sources configured");

        Ok(Self::from_parts(
            Arc::new(NutritionResolver::new(chain)),
            foods,
            logs,
        ))
    }

    pub fn from_parts(
        resolver: Arc<NutritionResolver>,
        foods: Arc<dyn FoodCatalog>,
        logs: Arc<dyn LogStore>,
    ) -> Self {
        Self {
            resolver,
            foods,
            logs,
        }
    }

    /// In-memory state with only the local table source. No network, no database.
    pub fn fake() -> Self {
        let config = AppConfig {
            listen_addr: ([127, 0, 0, 1], 0).into(),
            database_url: String::new(),
            sources: vec![SourceKind::Local],
            usda: None,
        };
        let foods = Arc::new(MemoryFoodCatalog::new()) as Arc<dyn FoodCatalog>;
        let logs = Arc::new(MemoryLogStore::new()) as Arc<dyn LogStore>;
        let sources = build_sources(&config, foods.clone()).expect("local source never fails");

        Self::from_parts(
            Arc::new(NutritionResolver::new(SourceChain::new(sources))),
            foods,
            logs,
        )
    }
}
