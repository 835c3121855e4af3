// Animal repository.

use serde::{Deserialize, Serialize};

use super::Store;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Animal {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub status: String,
    pub location_id: i64,
    pub customer_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimalPayload {
    pub name: String,
    pub breed: String,
    pub status: String,
    pub location_id: i64,
    pub customer_id: i64,
}

impl Store {
    pub async fn list_animals(&self) -> Result<Vec<Animal>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Animal>(
            "SELECT a.id, a.name, a.breed, a.status, a.location_id, a.customer_id FROM animals a",
        )
        .fetch_all(&mut conn)
        .await
    }

    pub async fn animal_by_id(&self, id: i64) -> Result<Option<Animal>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Animal>(
            "SELECT a.id, a.name, a.breed, a.status, a.location_id, a.customer_id \
             FROM animals a WHERE a.id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await
    }

    pub async fn animals_by_location(&self, location_id: i64) -> Result<Vec<Animal>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Animal>(
            "SELECT a.id, a.name, a.breed, a.status, a.location_id, a.customer_id \
             FROM animals a WHERE a.location_id = ?1",
        )
        .bind(location_id)
        .fetch_all(&mut conn)
        .await
    }

    pub async fn create_animal(&self, payload: AnimalPayload) -> Result<Animal, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            "INSERT INTO animals (name, breed, status, location_id, customer_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&payload.name)
        .bind(&payload.breed)
        .bind(&payload.status)
        .bind(payload.location_id)
        .bind(payload.customer_id)
        .execute(&mut conn)
        .await?;
        Ok(Animal {
            id: result.last_insert_rowid(),
            name: payload.name,
            breed: payload.breed,
            status: payload.status,
            location_id: payload.location_id,
            customer_id: payload.customer_id,
        })
    }

    pub async fn update_animal(
        &self,
        id: i64,
        payload: &AnimalPayload,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            "UPDATE animals SET name = ?1, breed = ?2, status = ?3, location_id = ?4, \
             customer_id = ?5 WHERE id = ?6",
        )
        .bind(&payload.name)
        .bind(&payload.breed)
        .bind(&payload.status)
        .bind(payload.location_id)
        .bind(payload.customer_id)
        .bind(id)
        .execute(&mut conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_animal(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query("DELETE FROM animals WHERE id = ?1")
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
