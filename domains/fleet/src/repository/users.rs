//! User repository backed by PostgreSQL

use async_trait::async_trait;
use garage_common::{PageBounds, RepositoryError};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::domain::entities::{Car, NewUser, User, UserPatch, UserWithCars};
use crate::repository::{constraint_error, RepoResult, UserStore};

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn page_with_cars(&self, bounds: PageBounds) -> RepoResult<Vec<UserWithCars>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(bounds.limit())
        .bind(bounds.offset())
        .fetch_all(&self.pool)
        .await?;

        // Eager-load the page's cars in one batched query
        let ids: Vec<i64> = users.iter().map(|user| user.id).collect();
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, name, color, brand, year, plate, user_id, created_at, updated_at
             FROM cars WHERE user_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_owner: HashMap<i64, Vec<Car>> = HashMap::new();
        for car in cars {
            by_owner.entry(car.user_id).or_default().push(car);
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let cars = by_owner.remove(&user.id).unwrap_or_default();
                UserWithCars { user, cars }
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, attrs: NewUser) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&attrs.name)
        .bind(&attrs.email)
        .bind(&attrs.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(constraint_error)?;

        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = COALESCE($2, name),
                 email = COALESCE($3, email),
                 password_hash = COALESCE($4, password_hash),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(constraint_error)?;

        user.ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
