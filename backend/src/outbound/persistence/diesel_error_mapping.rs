//! Shared classification of Diesel failures.
//!
//! Repositories turn the classified failure into their own port error, so
//! constraint handling stays in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Store failure category relevant to the registry ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The connection was lost or never established.
    Connection(String),
    /// A unique index rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
    /// Any other query failure.
    Query(String),
}

/// Classify a Diesel error, logging its kind at debug level.
pub(crate) fn classify_diesel_error(error: DieselError) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            StoreFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => StoreFailure::Query("database query error".to_owned()),
        DieselError::DatabaseError(_, info) => StoreFailure::Query(info.message().to_owned()),
        other => StoreFailure::Query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    struct Info {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(Info {
                message: "constraint rejected row",
                constraint,
            }),
        )
    }

    #[rstest]
    fn unique_violation_keeps_constraint_name() {
        let failure = classify_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("accounts_email_key"),
        ));
        assert_eq!(
            failure,
            StoreFailure::UniqueViolation {
                constraint: Some("accounts_email_key".to_owned())
            }
        );
    }

    #[rstest]
    fn foreign_key_violation_is_classified() {
        let failure = classify_diesel_error(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some("items_owner_id_fkey"),
        ));
        assert!(matches!(failure, StoreFailure::ForeignKeyViolation { .. }));
    }

    #[rstest]
    fn closed_connection_is_a_connection_failure() {
        let failure = classify_diesel_error(database_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(failure, StoreFailure::Connection(_)));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_failures_are_query_errors(#[case] error: DieselError) {
        assert!(matches!(classify_diesel_error(error), StoreFailure::Query(_)));
    }
}
