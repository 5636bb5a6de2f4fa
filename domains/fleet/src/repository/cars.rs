//! Car repository backed by PostgreSQL

use async_trait::async_trait;
use garage_common::{PageBounds, RepositoryError};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::domain::entities::{Car, CarPatch, CarWithUser, NewCar, User};
use crate::repository::{constraint_error, CarStore, RepoResult};

const CAR_COLUMNS: &str = "id, name, color, brand, year, plate, user_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgCarStore {
    pool: PgPool,
}

impl PgCarStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for PgCarStore {
    async fn page_with_user(&self, bounds: PageBounds) -> RepoResult<Vec<CarWithUser>> {
        let cars = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(bounds.limit())
        .bind(bounds.offset())
        .fetch_all(&self.pool)
        .await?;

        // Eager-load the page's owners in one batched query
        let owner_ids: Vec<i64> = cars.iter().map(|car| car.user_id).collect();
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at, updated_at
             FROM users WHERE id = ANY($1)",
        )
        .bind(&owner_ids)
        .fetch_all(&self.pool)
        .await?;

        let by_id: HashMap<i64, User> = users.into_iter().map(|user| (user.id, user)).collect();

        // Every car references an existing user (enforced by the FK), so a
        // missing owner here means the row vanished mid-request; skip it.
        Ok(cars
            .into_iter()
            .filter_map(|car| {
                by_id.get(&car.user_id).cloned().map(|user| CarWithUser { car, user })
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    async fn create(&self, attrs: NewCar) -> RepoResult<Car> {
        let car = sqlx::query_as::<_, Car>(&format!(
            "INSERT INTO cars (name, color, brand, year, plate, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CAR_COLUMNS}"
        ))
        .bind(&attrs.name)
        .bind(&attrs.color)
        .bind(&attrs.brand)
        .bind(&attrs.year)
        .bind(&attrs.plate)
        .bind(attrs.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_error)?;

        Ok(car)
    }

    async fn update(&self, id: i64, patch: CarPatch) -> RepoResult<Car> {
        let car = sqlx::query_as::<_, Car>(&format!(
            "UPDATE cars
             SET name = COALESCE($2, name),
                 color = COALESCE($3, color),
                 brand = COALESCE($4, brand),
                 year = COALESCE($5, year),
                 plate = COALESCE($6, plate),
                 user_id = COALESCE($7, user_id),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {CAR_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.color)
        .bind(patch.brand)
        .bind(patch.year)
        .bind(patch.plate)
        .bind(patch.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(constraint_error)?;

        car.ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
