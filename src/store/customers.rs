// Customer repository.

use serde::{Deserialize, Serialize};

use super::Store;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub address: String,
    pub email: String,
}

const SELECT: &str = "SELECT c.id, c.name, c.address, c.email FROM customers c";

impl Store {
    pub async fn list_customers(&self) -> Result<Vec<Customer>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Customer>(SELECT)
            .fetch_all(&mut conn)
            .await
    }

    pub async fn customer_by_id(&self, id: i64) -> Result<Option<Customer>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Customer>(
            "SELECT c.id, c.name, c.address, c.email FROM customers c WHERE c.id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await
    }

    /// Exact-match filter on the email column
    pub async fn customers_by_email(&self, email: &str) -> Result<Vec<Customer>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Customer>(
            "SELECT c.id, c.name, c.address, c.email FROM customers c WHERE c.email = ?1",
        )
        .bind(email)
        .fetch_all(&mut conn)
        .await
    }

    pub async fn create_customer(&self, payload: CustomerPayload) -> Result<Customer, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query("INSERT INTO customers (name, address, email) VALUES (?1, ?2, ?3)")
            .bind(&payload.name)
            .bind(&payload.address)
            .bind(&payload.email)
            .execute(&mut conn)
            .await?;
        Ok(Customer {
            id: result.last_insert_rowid(),
            name: payload.name,
            address: payload.address,
            email: payload.email,
        })
    }

    pub async fn update_customer(
        &self,
        id: i64,
        payload: &CustomerPayload,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result =
            sqlx::query("UPDATE customers SET name = ?1, address = ?2, email = ?3 WHERE id = ?4")
                .bind(&payload.name)
                .bind(&payload.address)
                .bind(&payload.email)
                .bind(id)
                .execute(&mut conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_customer(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
