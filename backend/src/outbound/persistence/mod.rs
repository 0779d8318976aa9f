//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the relationship, user and org hierarchy
//! ports, backed by PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; adapters translate them to domain types and map
//! database failures onto the port error enums.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/kabsu")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_org_hierarchy_query;
mod diesel_relationship_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_org_hierarchy_query::DieselOrgHierarchyQuery;
pub use diesel_relationship_repository::DieselRelationshipRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
