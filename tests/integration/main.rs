//! Live-database integration tests.
//!
//! These need a running Postgres instance. Point DATABASE_URL at it, then:
//!   cargo test -- --ignored

mod common;

mod package_tests;
mod pool_tests;
