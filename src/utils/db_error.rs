//! Classification of sqlx errors into [`StoreError`].

use crate::domain::repositories::StoreError;

/// Name of the unique constraint on `short_links.code`.
pub const CODE_UNIQUE_CONSTRAINT: &str = "short_links_code_key";

/// Returns true if the error is a unique violation on the short code.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CODE_UNIQUE_CONSTRAINT))
}

/// Maps an insert failure for `code` to a store error.
pub fn classify_insert_error(e: sqlx::Error, code: &str) -> StoreError {
    if is_unique_violation_on_code(&e) {
        StoreError::UniqueViolation(code.to_string())
    } else {
        StoreError::Unavailable(e.to_string())
    }
}

/// Maps a read failure to a store error.
pub fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_unavailable() {
        let err = classify_insert_error(sqlx::Error::PoolTimedOut, "aB3xY9");

        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_is_not_unique_violation() {
        assert!(!is_unique_violation_on_code(&sqlx::Error::RowNotFound));
    }
}
