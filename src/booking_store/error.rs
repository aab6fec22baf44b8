use rusqlite::ErrorCode;
use thiserror::Error;

/// Faults surfaced by a `BookingStore`.
///
/// SQLite failures are sorted into the kinds callers are expected to handle
/// (`ConstraintViolation`, `Unavailable`) and everything else (`Sqlite`).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Sqlite(rusqlite::Error),
}

impl StoreError {
    /// Whether this fault is one a mutation handler reports to the user
    /// instead of failing the request.
    pub fn is_expected_fault(&self) -> bool {
        matches!(
            self,
            StoreError::ConstraintViolation(_) | StoreError::Unavailable(_)
        )
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StoreError::ConstraintViolation(err.to_string()),
            Some(
                ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::CannotOpen
                | ErrorCode::SystemIoFailure
                | ErrorCode::DiskFull
                | ErrorCode::ReadOnly,
            ) => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Sqlite(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn constraint_failures_are_expected() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT NOT NULL)", [])
            .unwrap();
        let err: StoreError = conn
            .execute("INSERT INTO t (v) VALUES (NULL)", [])
            .unwrap_err()
            .into();

        assert!(matches!(err, StoreError::ConstraintViolation(_)));
        assert!(err.is_expected_fault());
    }

    #[test]
    fn syntax_errors_are_unexpected() {
        let conn = Connection::open_in_memory().unwrap();
        let err: StoreError = conn.execute("SELEC 1", []).unwrap_err().into();

        assert!(matches!(err, StoreError::Sqlite(_)));
        assert!(!err.is_expected_fault());
    }

    #[test]
    fn not_found_is_not_a_reportable_fault() {
        let err = StoreError::NotFound {
            entity: "Venue",
            id: 7,
        };
        assert_eq!(err.to_string(), "Venue 7 not found");
        assert!(!err.is_expected_fault());
    }
}
