use chrono::{NaiveDateTime, Utc};
use sea_orm::{DbErr, SqlErr};

/// Current UTC time as stored in timestamp columns.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Whether a write failed on a unique index rather than for another reason.
pub fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
