//! Shared Diesel error mapping.
//!
//! Every repository port error has `connection` and `query` constructors;
//! these helpers route pool and Diesel failures onto them.

use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure onto a port's connection error.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Map a Diesel failure onto a port's query or connection error.
///
/// Database details go to the debug log only.
pub(crate) fn map_diesel_error<E>(
    error: diesel::result::Error,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => connection("database connection error"),
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ComplaintRepositoryError;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn map(error: DieselError) -> ComplaintRepositoryError {
        map_diesel_error(
            error,
            ComplaintRepositoryError::query,
            ComplaintRepositoryError::connection,
        )
    }

    #[rstest]
    fn closed_connection_is_a_connection_error() {
        let error = map(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("closed".to_owned()),
        ));

        assert!(matches!(error, ComplaintRepositoryError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new("dup".to_owned())),
        "database error"
    )]
    fn other_failures_are_query_errors(#[case] error: DieselError, #[case] expected: &str) {
        assert_eq!(map(error), ComplaintRepositoryError::query(expected));
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let error = map_pool_error(
            PoolError::Checkout {
                message: "timed out".to_owned(),
            },
            ComplaintRepositoryError::connection,
        );

        assert_eq!(error, ComplaintRepositoryError::connection("timed out"));
    }
}
