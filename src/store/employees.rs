// Employee repository.

use serde::{Deserialize, Serialize};

use super::Store;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub location_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployeePayload {
    pub name: String,
    pub address: String,
    pub location_id: i64,
}

impl Store {
    pub async fn list_employees(&self) -> Result<Vec<Employee>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Employee>(
            "SELECT e.id, e.name, e.address, e.location_id FROM employees e",
        )
        .fetch_all(&mut conn)
        .await
    }

    pub async fn employee_by_id(&self, id: i64) -> Result<Option<Employee>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Employee>(
            "SELECT e.id, e.name, e.address, e.location_id FROM employees e WHERE e.id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await
    }

    pub async fn employees_by_location(
        &self,
        location_id: i64,
    ) -> Result<Vec<Employee>, sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query_as::<_, Employee>(
            "SELECT e.id, e.name, e.address, e.location_id FROM employees e \
             WHERE e.location_id = ?1",
        )
        .bind(location_id)
        .fetch_all(&mut conn)
        .await
    }

    pub async fn create_employee(&self, payload: EmployeePayload) -> Result<Employee, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result =
            sqlx::query("INSERT INTO employees (name, address, location_id) VALUES (?1, ?2, ?3)")
                .bind(&payload.name)
                .bind(&payload.address)
                .bind(payload.location_id)
                .execute(&mut conn)
                .await?;
        Ok(Employee {
            id: result.last_insert_rowid(),
            name: payload.name,
            address: payload.address,
            location_id: payload.location_id,
        })
    }

    pub async fn update_employee(
        &self,
        id: i64,
        payload: &EmployeePayload,
    ) -> Result<bool, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result =
            sqlx::query("UPDATE employees SET name = ?1, address = ?2, location_id = ?3 WHERE id = ?4")
                .bind(&payload.name)
                .bind(&payload.address)
                .bind(payload.location_id)
                .bind(id)
                .execute(&mut conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_employee(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
