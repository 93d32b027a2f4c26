//! Error types for the rigbase catalog

use thiserror::Error;

/// Main catalog error type.
///
/// Constraint violations coming back from Postgres are translated into the
/// domain variants at the execution-helper boundary; see [`From<sqlx::Error>`].
#[derive(Error, Debug)]
pub enum Error {
    /// A value failed validation, client-side or via a CHECK constraint.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Unique-name violation (category names are unique).
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// A (equipment, category) pair already exists in the junction table.
    #[error("Duplicate association: {0}")]
    DuplicateAssociation(String),

    /// Foreign-key violation: a referenced equipment or category row is gone.
    #[error("Dangling reference: {0}")]
    DanglingReference(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// No connection became available within the configured timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// The backend cannot be reached at all. Fatal until an operator intervenes.
    #[error("Database unavailable: {0}")]
    ConnectionUnavailable(String),

    /// Malformed statement. A programming error, never expected in normal operation.
    #[error("Query failed: {0}")]
    QueryError(String),

    /// Backend failure with no domain translation.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl Error {
    /// Message safe to show at the collaborator boundary.
    ///
    /// Validation and not-found errors are specific; connectivity and backend
    /// failures collapse to a generic message with no internal detail.
    pub fn public_message(&self) -> String {
        match self {
            Error::InvalidValue(_)
            | Error::DuplicateName(_)
            | Error::DuplicateAssociation(_)
            | Error::DanglingReference(_)
            | Error::NotFound(_) => self.to_string(),
            Error::PoolExhausted
            | Error::ConnectionUnavailable(_)
            | Error::QueryError(_)
            | Error::Database(_) => "Service unavailable, please retry later".to_string(),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Error::PoolExhausted,
            sqlx::Error::PoolClosed => {
                Error::ConnectionUnavailable("connection pool is closed".to_string())
            }
            sqlx::Error::Io(e) => Error::ConnectionUnavailable(e.to_string()),
            sqlx::Error::Tls(e) => Error::ConnectionUnavailable(e.to_string()),
            sqlx::Error::Protocol(e) => Error::ConnectionUnavailable(e),
            sqlx::Error::Configuration(e) => Error::ConnectionUnavailable(e.to_string()),
            sqlx::Error::Database(db) => {
                let code = db.code().map(|c| c.into_owned());
                match classify_database_error(code.as_deref(), db.constraint(), db.message()) {
                    Some(mapped) => mapped,
                    None => Error::Database(sqlx::Error::Database(db)),
                }
            }
            other => Error::Database(other),
        }
    }
}

/// Translate a Postgres error (SQLSTATE code + constraint name) into a domain
/// error. Returns `None` for conditions with no domain meaning.
fn classify_database_error(
    code: Option<&str>,
    constraint: Option<&str>,
    message: &str,
) -> Option<Error> {
    let code = code?;
    let constraint = constraint.unwrap_or("");
    match code {
        // unique_violation: the junction pair index or the category name key
        "23505" => {
            if constraint.starts_with("equipment_categories") {
                Some(Error::DuplicateAssociation(format!(
                    "association already exists ({})",
                    constraint
                )))
            } else {
                Some(Error::DuplicateName(format!(
                    "name already exists ({})",
                    constraint
                )))
            }
        }
        // foreign_key_violation
        "23503" => Some(Error::DanglingReference(format!(
            "referenced row does not exist ({})",
            constraint
        ))),
        // check_violation
        "23514" => Some(Error::InvalidValue(format!(
            "check constraint violated ({})",
            constraint
        ))),
        // not_null_violation
        "23502" => Some(Error::InvalidValue(message.to_string())),
        // class 42: syntax error or access-rule violation
        c if c.starts_with("42") => Some(Error::QueryError(message.to_string())),
        _ => None,
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;
