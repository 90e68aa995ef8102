use clap::Args;
use serde_json::json;

use crate::auth::hash_password;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::DatabaseConfig;
use crate::database::{AdminRepository, DatabaseError, DatabaseManager};

#[derive(Debug, Args)]
pub struct CreateAdminArgs {
    #[arg(long, help = "Login email")]
    pub email: String,

    #[arg(long, help = "Display name")]
    pub name: String,

    #[arg(long, help = "Initial password")]
    pub password: String,

    #[arg(long, default_value = "admin", help = "Role tag stored on the account")]
    pub role: String,
}

pub async fn handle(args: CreateAdminArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    if args.password.len() < 8 {
        output_error(output_format, "Password must be at least 8 characters")?;
        anyhow::bail!("password too short");
    }

    let config = DatabaseConfig::from_env()?;
    let pool = DatabaseManager::connect(&config).await?;
    DatabaseManager::migrate(&pool).await?;

    let password_hash = hash_password(&args.password)?;
    let result = AdminRepository::new(&pool)
        .create(args.email.trim(), &password_hash, args.name.trim(), args.role.trim())
        .await;
    pool.close().await;

    match result {
        Ok(admin) => output_success(
            output_format,
            &format!("Created admin {} ({})", admin.email, admin.role),
            Some(json!({ "admin": admin })),
        ),
        Err(DatabaseError::Conflict(message)) => {
            output_error(output_format, &message)?;
            anyhow::bail!(message)
        }
        Err(e) => Err(e.into()),
    }
}
