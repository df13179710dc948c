//! # Zing
//!
//! Account, role and post model for the Zing blog.
//!
//! ## Architecture
//!
//! - **domain**: Entities, permission bits, capability trait, repository ports
//! - **application**: Account and post use cases
//! - **infrastructure**: SeaORM entities, migrations, repositories, bcrypt
//! - **session**: Resolves session identifiers to principals
//! - **config** / **telemetry**: TOML settings and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod session;
pub mod shared;
pub mod telemetry;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use application::{AccountService, PostService};
pub use domain::{AnonymousUser, CurrentUser, Permission, Principal};
pub use session::{LoginManager, UserLoader};
