//! Zing — operator CLI
//!
//! ```sh
//! # Create the schema and the built-in roles
//! zing init
//!
//! # Register an account (the configured admin address becomes Administrator)
//! zing create-user --email admin@example.com --username admin --password hunter2
//!
//! # Validate config without touching the database
//! zing --config /etc/zing/config.toml check
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sea_orm_migration::sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use zing::domain::CreateUserDto;
use zing::infrastructure::database::migrator::Migrator;
use zing::telemetry::init_tracing;
use zing::{
    default_config_path, init_database, AccountService, AppConfig, SeaOrmRepositoryProvider,
};

/// Zing — account and role administration for the blog database.
#[derive(Parser, Debug)]
#[command(name = "zing", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "ZING_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the database URL.
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending database migrations.
    Migrate,
    /// Apply migrations, then create or refresh the built-in roles.
    Init,
    /// Register a new account.
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "ZING_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Print the effective configuration and exit.
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env(std::env::var(zing::config::ADMIN_EMAIL_ENV).ok());
            (cfg, Some(e))
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref url) = cli.database_url {
        config.database.url = url.clone();
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => warn!("{}. Using defaults.", e),
    }

    if let Command::Check = cli.command {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        println!("   Admin email : {}", config.admin_email().unwrap_or("(not set)"));
        return Ok(());
    }

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&config.database_config()).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let accounts = AccountService::new(repos, config.admin.email.clone());

    match cli.command {
        Command::Migrate => run_migrations(&db).await?,
        Command::Init => {
            run_migrations(&db).await?;
            accounts.insert_roles().await?;
            info!("Built-in roles are up to date");
        }
        Command::CreateUser {
            email,
            username,
            password,
            name,
            location,
        } => {
            let mut dto = CreateUserDto::new(email, username, password);
            dto.name = name;
            dto.location = location;

            let user = accounts.register(dto).await?;
            match user.role {
                Some(ref role) => info!("Created {} with role {}", user, role.name),
                None => warn!("Created {} without a role; run `zing init` first", user),
            }
        }
        Command::Check => unreachable!("handled before connecting"),
    }

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    }
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), Box<dyn std::error::Error>> {
    info!("Running database migrations...");
    if let Err(e) = Migrator::up(db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");
    Ok(())
}
