// Entry repository.
//
// Entries always come back with their mood attached by value, resolved via
// join at read time. Writes take the client-facing payload shape.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{Mood, Store};

/// A journal entry with its mood attached
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: i64,
    pub concept: String,
    pub entry: String,
    pub date: String,
    pub mood_id: i64,
    pub mood: Mood,
}

/// Client-supplied entry fields, used for create and update
#[derive(Debug, Clone, Deserialize)]
pub struct EntryPayload {
    pub concept: String,
    pub entry: String,
    pub date: String,
    pub mood_id: i64,
}

const SELECT_JOINED: &str = "SELECT e.id, e.concept, e.entry, e.date, e.mood_id, m.label AS mood_label \
     FROM entries e JOIN moods m ON m.id = e.mood_id";

fn entry_from_row(row: &SqliteRow) -> Result<Entry, sqlx::Error> {
    let mood_id: i64 = row.try_get("mood_id")?;
    Ok(Entry {
        id: row.try_get("id")?,
        concept: row.try_get("concept")?,
        entry: row.try_get("entry")?,
        date: row.try_get("date")?,
        mood_id,
        mood: Mood {
            id: mood_id,
            label: row.try_get("mood_label")?,
        },
    })
}

impl Store {
    pub async fn list_entries(&self) -> Result<Vec<Entry>, sqlx::Error> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query(SELECT_JOINED).fetch_all(&mut conn).await?;
        rows.iter().map(entry_from_row).collect()
    }

    pub async fn entry_by_id(&self, id: i64) -> Result<Option<Entry>, sqlx::Error> {
        let mut conn = self.connect().await?;
        let row = sqlx::query(
            "SELECT e.id, e.concept, e.entry, e.date, e.mood_id, m.label AS mood_label \
             FROM entries e JOIN moods m ON m.id = e.mood_id WHERE e.id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;
        row.as_ref().map(entry_from_row).transpose()
    }

    pub async fn entries_by_mood(&self, mood_id: i64) -> Result<Vec<Entry>, sqlx::Error> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query(
            "SELECT e.id, e.concept, e.entry, e.date, e.mood_id, m.label AS mood_label \
             FROM entries e JOIN moods m ON m.id = e.mood_id WHERE e.mood_id = ?1",
        )
        .bind(mood_id)
        .fetch_all(&mut conn)
        .await?;
        rows.iter().map(entry_from_row).collect()
    }

    /// Substring search over the entry text
    pub async fn search_entries(&self, term: &str) -> Result<Vec<Entry>, sqlx::Error> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query(
            "SELECT e.id, e.concept, e.entry, e.date, e.mood_id, m.label AS mood_label \
             FROM entries e JOIN moods m ON m.id = e.mood_id WHERE e.entry LIKE ?1",
        )
        .bind(format!("%{term}%"))
        .fetch_all(&mut conn)
        .await?;
        rows.iter().map(entry_from_row).collect()
    }

    /// Insert an entry and return the stored row, mood attached
    pub async fn create_entry(&self, payload: &EntryPayload) -> Result<Entry, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result =
            sqlx::query("INSERT INTO entries (concept, entry, date, mood_id) VALUES (?1, ?2, ?3, ?4)")
                .bind(&payload.concept)
                .bind(&payload.entry)
                .bind(&payload.date)
                .bind(payload.mood_id)
                .execute(&mut conn)
                .await?;
        let id = result.last_insert_rowid();

        // Re-read through the join so the response carries the mood
        let row = sqlx::query(
            "SELECT e.id, e.concept, e.entry, e.date, e.mood_id, m.label AS mood_label \
             FROM entries e JOIN moods m ON m.id = e.mood_id WHERE e.id = ?1",
        )
        .bind(id)
        .fetch_one(&mut conn)
        .await?;
        entry_from_row(&row)
    }

    /// Returns false when no row with the given id exists
    pub async fn update_entry(&self, id: i64, payload: &EntryPayload) -> Result<bool, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            "UPDATE entries SET concept = ?1, entry = ?2, date = ?3, mood_id = ?4 WHERE id = ?5",
        )
        .bind(&payload.concept)
        .bind(&payload.entry)
        .bind(&payload.date)
        .bind(payload.mood_id)
        .bind(id)
        .execute(&mut conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deleting a missing row is a no-op, never an error
    pub async fn delete_entry(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query("DELETE FROM entries WHERE id = ?1")
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fixture() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("journal.sqlite3"));
        store.bootstrap().await.unwrap();
        (store, dir)
    }

    fn payload(concept: &str, text: &str, mood_id: i64) -> EntryPayload {
        EntryPayload {
            concept: concept.to_string(),
            entry: text.to_string(),
            date: "2024-01-01".to_string(),
            mood_id,
        }
    }

    #[tokio::test]
    async fn test_create_attaches_mood() {
        let (store, _dir) = fixture().await;
        let created = store
            .create_entry(&payload("rust", "learned ownership", 1))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.mood.id, 1);
        assert_eq!(created.mood.label, "happy");
    }

    #[tokio::test]
    async fn test_list_joins_each_row() {
        let (store, _dir) = fixture().await;
        store
            .create_entry(&payload("rust", "borrow checker", 1))
            .await
            .unwrap();
        store
            .create_entry(&payload("sql", "joins", 2))
            .await
            .unwrap();

        let entries = store.list_entries().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].mood.label, "happy");
        assert_eq!(entries[1].mood.label, "sad");
    }

    #[tokio::test]
    async fn test_update_missing_row_reports_failure() {
        let (store, _dir) = fixture().await;
        let updated = store.update_entry(99, &payload("x", "y", 1)).await.unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_noop() {
        let (store, _dir) = fixture().await;
        store.delete_entry(99).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_matches_substring() {
        let (store, _dir) = fixture().await;
        store
            .create_entry(&payload("hydration", "drank more water today", 4))
            .await
            .unwrap();
        store
            .create_entry(&payload("code", "wrote a parser", 1))
            .await
            .unwrap();

        let hits = store.search_entries("water").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].concept, "hydration");

        assert!(store.search_entries("coffee").await.unwrap().is_empty());
    }
}
