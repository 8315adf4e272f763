use platform_api::ApiError;
use platform_db::Constraint;
use sea_orm::DbErr;
use thiserror::Error;
use tracing::debug;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    /// Malformed or missing input, caught before touching the database.
    #[error("{0}")]
    Validation(String),
    /// Uniqueness or referential-integrity violation reported by the database.
    #[error("{0}")]
    Conflict(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl HrError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    /// Map a failed insert/update on `table`. `unique` lists the columns
    /// carrying a unique index so the conflict can name the offending field.
    pub(crate) fn from_write(table: &'static str, unique: &[&'static str], err: DbErr) -> Self {
        match platform_db::constraint_violation(&err) {
            Some(Constraint::Unique(detail)) => {
                debug!(table, %detail, "unique constraint rejected write");
                match unique_column(table, unique, &detail) {
                    Some(column) => Self::Conflict(format!("{table} {column} is already in use")),
                    None => Self::Conflict(format!("{table} conflicts with an existing record")),
                }
            }
            Some(Constraint::ForeignKey(detail)) => {
                debug!(table, %detail, "foreign key rejected write");
                Self::Conflict(format!("{table} references a record that does not exist"))
            }
            None => Self::Database(err),
        }
    }

    /// Map a failed delete of `table` row `id`.
    pub(crate) fn from_delete(table: &'static str, id: i32, err: DbErr) -> Self {
        match platform_db::constraint_violation(&err) {
            Some(Constraint::ForeignKey(detail)) => {
                debug!(table, id, %detail, "foreign key rejected delete");
                Self::Conflict(format!("{table} {id} is still referenced by other records"))
            }
            Some(Constraint::Unique(_)) | None => Self::Database(err),
        }
    }
}

// Postgres reports the index name (`uq_job_code`), SQLite the column
// (`job.code`).
fn unique_column(table: &str, unique: &[&'static str], detail: &str) -> Option<&'static str> {
    unique.iter().copied().find(|column| {
        detail.contains(&format!("uq_{table}_{column}"))
            || detail.contains(&format!("{table}.{column}"))
    })
}

impl From<HrError> for ApiError {
    fn from(value: HrError) -> Self {
        match value {
            HrError::Validation(message) => ApiError::Validation(message),
            HrError::Conflict(message) => ApiError::Conflict(message),
            err @ HrError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            err @ (HrError::PasswordHash(_) | HrError::Database(_)) => {
                ApiError::internal(anyhow::Error::new(err))
            }
        }
    }
}
