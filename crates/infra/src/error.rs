//! Error taxonomy of the data-access layer.

use thiserror::Error;

use sponsorship_auth::{AuthzError, PasswordError};

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The database answered, but not with the row shape the statement expects.
    #[error("query error: {0}")]
    Query(String),

    /// The requester may not mutate the target resource.
    #[error(transparent)]
    Permission(#[from] AuthzError),

    /// A write matched zero rows.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation failed: {0}")]
    Validation(String),

    /// A unique constraint rejected the write (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// bcrypt itself failed. Bad passwords arrive as [`ModelError::Validation`].
    #[error(transparent)]
    Password(PasswordError),

    /// Connection failures and other driver errors.
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl ModelError {
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

impl From<sqlx::Error> for ModelError {
    fn from(value: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &value {
            if db.is_unique_violation() {
                return Self::Conflict(db.message().to_string());
            }
            if db.is_foreign_key_violation() {
                return Self::Validation(db.message().to_string());
            }
        }
        Self::Database(value)
    }
}

impl From<PasswordError> for ModelError {
    fn from(value: PasswordError) -> Self {
        if value.is_input_error() {
            return Self::Validation(value.to_string());
        }
        Self::Password(value)
    }
}

/// Map a row-decoding failure to [`ModelError::Query`]; pass everything else through.
pub(crate) fn decode_error(context: &'static str) -> impl Fn(sqlx::Error) -> ModelError {
    move |e| match e {
        sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::Decode(_) => ModelError::Query(format!("{context}: {e}")),
        other => ModelError::from(other),
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct FakeDbError(ErrorKind);

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "constraint failed")
        }
    }

    impl std::error::Error for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "constraint failed"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            None
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match &self.0 {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError(kind)))
    }

    #[test]
    fn unexpected_row_shape_is_a_query_error() {
        let missing = decode_error("sponsor row")(sqlx::Error::ColumnNotFound("city".into()));
        assert!(matches!(missing, ModelError::Query(ref m) if m.starts_with("sponsor row")));

        let bad_type = decode_error("sponsor row")(sqlx::Error::ColumnDecode {
            index: "\"birth_date\"".into(),
            source: "expected DATE".into(),
        });
        assert!(matches!(bad_type, ModelError::Query(_)));
    }

    #[test]
    fn driver_failures_pass_through() {
        assert!(matches!(
            decode_error("sponsor row")(sqlx::Error::PoolTimedOut),
            ModelError::Database(sqlx::Error::PoolTimedOut)
        ));
        assert!(matches!(
            ModelError::from(sqlx::Error::RowNotFound),
            ModelError::Database(_)
        ));
    }

    #[test]
    fn constraint_violations_are_classified() {
        assert!(matches!(
            ModelError::from(db_error(ErrorKind::UniqueViolation)),
            ModelError::Conflict(_)
        ));
        assert!(matches!(
            ModelError::from(db_error(ErrorKind::ForeignKeyViolation)),
            ModelError::Validation(_)
        ));
        assert!(matches!(
            ModelError::from(db_error(ErrorKind::Other)),
            ModelError::Database(_)
        ));
    }

    #[test]
    fn bad_passwords_are_validation_errors() {
        assert!(matches!(ModelError::from(PasswordError::Empty), ModelError::Validation(_)));
        assert!(matches!(
            ModelError::from(PasswordError::TooLong(80)),
            ModelError::Validation(_)
        ));
        assert!(matches!(
            ModelError::from(PasswordError::Hashing("rng".into())),
            ModelError::Password(_)
        ));
    }
}
