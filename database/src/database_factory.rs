use std::sync::Arc;

use common::server_config::DbConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::error;

use crate::hms_dbprovider::HmsDbProvider;
use crate::hms_pg::PgDbProvider;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub async fn create_db_instance(
    config: &DbConfig,
) -> Option<Arc<dyn HmsDbProvider + Send + Sync>> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
        .connect(&config.url)
        .await;

    match pool {
        Ok(pool) => Some(Arc::new(PgDbProvider::new(pool))),
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            None
        }
    }
}
