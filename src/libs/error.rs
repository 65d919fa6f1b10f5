// error.rs
use thiserror::Error;

/// Failures while turning an entity declaration into DDL.
///
/// Every variant aborts the whole table: no partial statement is ever
/// handed to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("no table name declared on entity `{entity}`")]
    MissingTableMetadata { entity: String },

    #[error("unsupported data type '{type_name}' on column `{column}`")]
    UnsupportedType { type_name: String, column: String },

    #[error("enum column `{column}` declares no options")]
    MissingEnumOptions { column: String },

    #[error("column for field `{field}` has an empty name")]
    EmptyColumnName { field: String },

    #[error("default for column `{column}` is not a finite number")]
    NonFiniteDefault { column: String },

    #[error("entity `{entity}` (table `{table}`) declares no columns")]
    MissingColumns { entity: String, table: String },
}

/// Error returned by [`Orm`](crate::Orm) operations that reach the executor.
#[derive(Debug, Error)]
pub enum OrmError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Raised by the executor, passed through untouched.
    #[error(transparent)]
    Execution(E),
}

impl<E> OrmError<E>
where
    E: std::error::Error + 'static,
{
    pub fn as_schema(&self) -> Option<&SchemaError> {
        match self {
            OrmError::Schema(e) => Some(e),
            OrmError::Execution(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid database configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported database driver '{0}', expected mysql or mariadb")]
    UnsupportedDriver(String),

    #[error("unknown database option '{0}'")]
    UnknownOption(String),

    #[error("invalid value for database option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    #[error(transparent)]
    Connect(#[from] sqlx::Error),
}

pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_names_the_offender() {
        let err = SchemaError::UnsupportedType {
            type_name: "money".into(),
            column: "price".into(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported data type 'money' on column `price`"
        );
    }

    #[test]
    fn execution_errors_pass_through_unchanged() {
        let io = std::io::Error::other("connection reset");
        let err: OrmError<std::io::Error> = OrmError::Execution(io);
        assert_eq!(err.to_string(), "connection reset");
        assert!(err.as_schema().is_none());
    }
}
