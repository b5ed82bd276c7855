use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::config::{AppConfig, StorageBackend};
use crate::database::models::{Difficulty, Image, Region, Walk};
use crate::database::{
    seed, DatabaseError, DatabaseManager, MemoryStore, MemoryUserStore, PgStore, PgUserStore, Store, UserStore,
};
use crate::images::ImageStorage;

/// Shared handles every request handler works against.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub regions: Arc<dyn Store<Region>>,
    pub walks: Arc<dyn Store<Walk>>,
    pub difficulties: Arc<dyn Store<Difficulty>>,
    pub images: Arc<dyn Store<Image>>,
    pub users: Arc<dyn UserStore>,
    pub image_storage: ImageStorage,
}

impl AppState {
    /// Build the state for the configured backend, seeding reference data when enabled.
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        let state = match config.database.backend {
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                Self::in_memory(config)
            }
            StorageBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                Self::postgres(config, pool)
            }
        };

        if state.config.database.seed_data {
            state.seed().await?;
        }
        Ok(state)
    }

    pub fn in_memory(config: AppConfig) -> Self {
        let image_storage = ImageStorage::new(&config.images.storage_dir);
        Self {
            config: Arc::new(config),
            regions: Arc::new(MemoryStore::<Region>::new()),
            walks: Arc::new(MemoryStore::<Walk>::new()),
            difficulties: Arc::new(MemoryStore::<Difficulty>::new()),
            images: Arc::new(MemoryStore::<Image>::new()),
            users: Arc::new(MemoryUserStore::new()),
            image_storage,
        }
    }

    pub fn postgres(config: AppConfig, pool: PgPool) -> Self {
        let image_storage = ImageStorage::new(&config.images.storage_dir);
        Self {
            config: Arc::new(config),
            regions: Arc::new(PgStore::<Region>::new(pool.clone())),
            walks: Arc::new(PgStore::<Walk>::new(pool.clone())),
            difficulties: Arc::new(PgStore::<Difficulty>::new(pool.clone())),
            images: Arc::new(PgStore::<Image>::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool)),
            image_storage,
        }
    }

    /// Insert difficulties and regions into empty stores.
    pub async fn seed(&self) -> Result<(), DatabaseError> {
        seed::seed_if_empty(self.difficulties.as_ref(), seed::difficulties()).await?;
        seed::seed_if_empty(self.regions.as_ref(), seed::regions()).await?;
        Ok(())
    }
}
