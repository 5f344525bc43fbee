use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::meals::store::{MealStore, PgMealStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MealStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<(Self, sqlx::PgPool)> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let store = Arc::new(PgMealStore::new(db.clone())) as Arc<dyn MealStore>;
        Ok((Self { store, config }, db))
    }

    pub fn from_parts(store: Arc<dyn MealStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// State over the in-memory store, for tests and embedded use.
    pub fn in_memory() -> Self {
        use crate::meals::store::MemoryMealStore;

        let config = Arc::new(AppConfig {
            database_url: String::new(),
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self {
            store: Arc::new(MemoryMealStore::new()),
            config,
        }
    }
}
