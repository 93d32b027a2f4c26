//! Rigbase - Event Equipment Rental Catalog
//!
//! Data-access layer for a catalog of rentable event equipment organized
//! into named packages (categories), with full-text search and
//! package-composition management. Front ends (web, bots, CLIs) are external
//! collaborators: they call the repository and service operations exposed
//! here and never touch the schema directly.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod telemetry;

pub use config::AppConfig;
pub use db::{ConnectionPool, Database};
pub use error::{Error, Result};
pub use repository::Repository;
pub use services::Services;
