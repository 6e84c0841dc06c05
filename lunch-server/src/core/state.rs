use std::sync::Arc;

use sqlx::SqlitePool;

use crate::conversation::ConversationEngine;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared server state, cheap to clone, handed to every handler
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Configuration (immutable) |
/// | db | SQLite pool |
/// | engine | Conversation engine with the in-memory session store |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub engine: Arc<ConversationEngine>,
}

impl ServerState {
    /// Initialize the state: work dir structure, database, engine.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_path();
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self::with_db(config.clone(), db))
    }

    /// Build the state around an existing database service. Tests use
    /// this with an in-memory database.
    pub fn with_db(config: Config, db: DbService) -> Self {
        let engine = Arc::new(ConversationEngine::new(
            db.pool.clone(),
            config.cities.clone(),
            config.select_page_size,
        ));
        Self { config, db, engine }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
