// Mood repository — read-only reference data.

use serde::{Deserialize, Serialize};

use super::Store;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mood {
    pub id: i64,
    pub label: String,
}

impl Store {
    pub async fn list_moods(&self) -> Result<Vec<Mood>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Mood>("SELECT m.id, m.label FROM moods m ORDER BY m.id")
            .fetch_all(&mut conn)
            .await
    }

    pub async fn mood_by_id(&self, id: i64) -> Result<Option<Mood>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Mood>("SELECT m.id, m.label FROM moods m WHERE m.id = ?1")
            .bind(id)
            .fetch_optional(&mut conn)
            .await
    }
}
