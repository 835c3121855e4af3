// Location repository.

use serde::{Deserialize, Serialize};

use super::Store;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationPayload {
    pub name: String,
    pub address: String,
}

impl Store {
    pub async fn list_locations(&self) -> Result<Vec<Location>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Location>("SELECT l.id, l.name, l.address FROM locations l")
            .fetch_all(&mut conn)
            .await
    }

    pub async fn location_by_id(&self, id: i64) -> Result<Option<Location>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Location>(
            "SELECT l.id, l.name, l.address FROM locations l WHERE l.id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await
    }

    pub async fn create_location(&self, payload: LocationPayload) -> Result<Location, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query("INSERT INTO locations (name, address) VALUES (?1, ?2)")
            .bind(&payload.name)
            .bind(&payload.address)
            .execute(&mut conn)
            .await?;
        Ok(Location {
            id: result.last_insert_rowid(),
            name: payload.name,
            address: payload.address,
        })
    }

    pub async fn update_location(
        &self,
        id: i64,
        payload: &LocationPayload,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query("UPDATE locations SET name = ?1, address = ?2 WHERE id = ?3")
            .bind(&payload.name)
            .bind(&payload.address)
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_location(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query("DELETE FROM locations WHERE id = ?1")
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
