//! Database access layer: the connection pool and the statement execution
//! helper every repository goes through.

pub mod executor;
pub mod pool;

pub use executor::Database;
pub use pool::ConnectionPool;
