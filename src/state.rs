use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::db::PgStore;
use crate::food_requests::FoodRequestRepo;
use crate::foods::FoodRepo;
use crate::memory::MemoryStore;
use crate::my_food_requests::MyFoodRequestRepo;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub foods: Arc<dyn FoodRepo>,
    pub food_requests: Arc<dyn FoodRequestRepo>,
    pub my_food_requests: Arc<dyn MyFoodRequestRepo>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        match config.store {
            StoreBackend::Postgres => {
                let store = PgStore::connect(&config).await?;
                store.migrate().await?;
                tracing::info!("connected to postgres");
                Ok(Self::from_store(config, Arc::new(store)))
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; data is lost on restart");
                Ok(Self::in_memory(config))
            }
        }
    }

    /// One store backing all three collections.
    pub fn from_store<S>(config: AppConfig, store: Arc<S>) -> Self
    where
        S: FoodRepo + FoodRequestRepo + MyFoodRequestRepo + 'static,
    {
        Self {
            config: Arc::new(config),
            foods: store.clone() as Arc<dyn FoodRepo>,
            food_requests: store.clone() as Arc<dyn FoodRequestRepo>,
            my_food_requests: store as Arc<dyn MyFoodRequestRepo>,
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self::from_store(config, Arc::new(MemoryStore::new()))
    }
}
