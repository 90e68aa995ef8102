use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::DatabaseConfig;
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env()?;
    let pool = DatabaseManager::connect(&config).await?;

    DatabaseManager::migrate(&pool).await?;
    pool.close().await;

    output_success(output_format, "Migrations applied", None)
}
