use quiz_core::model::{Flashcard, SetId, UserId};

use super::{
    SqliteRepository,
    mapping::{map_flashcard_row, map_set_id_row, position_to_i64},
};
use crate::repository::{FlashcardRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl FlashcardRepository for SqliteRepository {
    async fn upsert_set(
        &self,
        user: &UserId,
        set: &SetId,
        cards: &[Flashcard],
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO flashcard_sets (user_id, set_id, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id, set_id) DO UPDATE SET
                updated_at = excluded.updated_at
            ",
        )
        .bind(user.as_str())
        .bind(set.as_str())
        .bind(self.clock.now())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        // Replace wholesale so positions stay dense.
        sqlx::query("DELETE FROM flashcards WHERE user_id = ?1 AND set_id = ?2")
            .bind(user.as_str())
            .bind(set.as_str())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        for (position, card) in cards.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO flashcards (user_id, set_id, position, front, back)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ",
            )
            .bind(user.as_str())
            .bind(set.as_str())
            .bind(position_to_i64(position)?)
            .bind(card.front())
            .bind(card.back())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn list_flashcards(
        &self,
        user: &UserId,
        set: &SetId,
    ) -> Result<Vec<Flashcard>, StorageError> {
        let exists = sqlx::query("SELECT 1 FROM flashcard_sets WHERE user_id = ?1 AND set_id = ?2")
            .bind(user.as_str())
            .bind(set.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        if exists.is_none() {
            return Err(StorageError::NotFound);
        }

        let rows = sqlx::query(
            r"
            SELECT front, back
            FROM flashcards
            WHERE user_id = ?1 AND set_id = ?2
            ORDER BY position ASC
            ",
        )
        .bind(user.as_str())
        .bind(set.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut cards = Vec::with_capacity(rows.len());
        for row in rows {
            cards.push(map_flashcard_row(&row)?);
        }
        Ok(cards)
    }

    async fn list_sets(&self, user: &UserId) -> Result<Vec<SetId>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT set_id
            FROM flashcard_sets
            WHERE user_id = ?1
            ORDER BY set_id ASC
            ",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_set_id_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use quiz_core::Clock;
    use quiz_core::time::fixed_now;
    use sqlx::Row;

    async fn updated_at(repo: &SqliteRepository, set: &SetId) -> DateTime<Utc> {
        sqlx::query("SELECT updated_at FROM flashcard_sets WHERE set_id = ?1")
            .bind(set.as_str())
            .fetch_one(&repo.pool)
            .await
            .unwrap()
            .try_get("updated_at")
            .unwrap()
    }

    #[tokio::test]
    async fn upsert_stamps_sets_with_repository_clock() {
        let repo = SqliteRepository::connect("sqlite:file:memdb_clock?mode=memory&cache=shared")
            .await
            .unwrap()
            .with_clock(Clock::fixed(fixed_now()));
        repo.migrate().await.unwrap();
        let user = UserId::new("u1").unwrap();
        let set = SetId::new("s1").unwrap();

        repo.upsert_set(&user, &set, &[]).await.unwrap();
        assert_eq!(updated_at(&repo, &set).await, fixed_now());

        let later = repo.clone().with_clock(Clock::fixed(fixed_now() + Duration::hours(1)));
        later.upsert_set(&user, &set, &[]).await.unwrap();
        assert_eq!(updated_at(&repo, &set).await, fixed_now() + Duration::hours(1));
    }
}
