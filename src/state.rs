use drivedesk_config::{DatabaseConfig, PaginationConfig};
use drivedesk_core::AppError;
use drivedesk_db::{PgPool, init_db_pool};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub pagination_config: PaginationConfig,
}

impl AppState {
    pub fn new(db: PgPool, pagination_config: PaginationConfig) -> Self {
        Self {
            db,
            pagination_config,
        }
    }

    /// Builds state from environment configuration.
    pub async fn from_env() -> Result<Self, AppError> {
        let database_config = DatabaseConfig::from_env()?;
        let db = init_db_pool(&database_config).await?;

        Ok(Self::new(db, PaginationConfig::from_env()))
    }
}
