use quiz_core::model::{Flashcard, SetId};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn position_to_i64(position: usize) -> Result<i64, StorageError> {
    i64::try_from(position).map_err(|_| StorageError::Serialization("position overflow".into()))
}

pub(crate) fn map_flashcard_row(row: &sqlx::sqlite::SqliteRow) -> Result<Flashcard, StorageError> {
    let front: String = row.try_get("front").map_err(ser)?;
    let back: String = row.try_get("back").map_err(ser)?;
    Ok(Flashcard::new(front, back))
}

pub(crate) fn map_set_id_row(row: &sqlx::sqlite::SqliteRow) -> Result<SetId, StorageError> {
    let raw: String = row.try_get("set_id").map_err(ser)?;
    SetId::new(raw).map_err(ser)
}
