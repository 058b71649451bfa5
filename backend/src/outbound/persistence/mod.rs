//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories are thin translators between row structs and domain types;
//! they hold no business rules. Connections come from a `bb8` pool over
//! `diesel-async`, and every driver failure is mapped onto the port's own
//! error enum before it leaves this module.
//!
//! ```no_run
//! use alumni_connect::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/alumni")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_application_status_repository;
mod diesel_error_mapping;
mod diesel_opportunity_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_application_status_repository::DieselApplicationStatusRepository;
pub use diesel_opportunity_repository::DieselOpportunityRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
