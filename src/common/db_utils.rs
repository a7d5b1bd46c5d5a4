// src/common/db_utils.rs

// Código SQLSTATE de violação de constraint EXCLUDE (ex: bookings_no_overlap)
const EXCLUSION_VIOLATION: &str = "23P01";

/// Verdadeiro quando o erro veio de uma constraint UNIQUE.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Verdadeiro quando o erro veio de uma constraint de exclusão (sobreposição de intervalos).
pub(crate) fn is_exclusion_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(EXCLUSION_VIOLATION),
        _ => false,
    }
}

/// Verdadeiro quando o erro veio de uma FOREIGN KEY (ex: usuário inexistente).
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_foreign_key_violation(),
        _ => false,
    }
}
