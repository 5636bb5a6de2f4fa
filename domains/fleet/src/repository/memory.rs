//! In-memory store implementation
//!
//! Plays the role the real schema plays in production: unique email/plate,
//! required owner reference, cascade delete. Backs the integration tests so
//! they run without a database.

use async_trait::async_trait;
use chrono::Utc;
use garage_common::{PageBounds, RepositoryError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::{
    Car, CarPatch, CarWithUser, NewCar, NewUser, User, UserPatch, UserWithCars,
};
use crate::repository::{CarStore, RepoResult, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    cars: BTreeMap<i64, Car>,
    last_user_id: i64,
    last_car_id: i64,
}

/// Shared in-memory tables implementing both store traits
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_email() -> RepositoryError {
    RepositoryError::Conflict(
        "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
    )
}

fn duplicate_plate() -> RepositoryError {
    RepositoryError::Conflict(
        "duplicate key value violates unique constraint \"cars_plate_key\"".to_string(),
    )
}

fn missing_owner() -> RepositoryError {
    RepositoryError::Conflict(
        "insert or update on table \"cars\" violates foreign key constraint \"cars_user_id_fkey\""
            .to_string(),
    )
}

fn page<T: Clone>(rows: impl Iterator<Item = T>, bounds: PageBounds) -> Vec<T> {
    rows.skip(bounds.offset() as usize)
        .take(bounds.limit() as usize)
        .collect()
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn page_with_cars(&self, bounds: PageBounds) -> RepoResult<Vec<UserWithCars>> {
        let tables = self.tables.lock().unwrap();
        Ok(page(tables.users.values().cloned(), bounds)
            .into_iter()
            .map(|user| {
                let cars = tables
                    .cars
                    .values()
                    .filter(|car| car.user_id == user.id)
                    .cloned()
                    .collect();
                UserWithCars { user, cars }
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.tables.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, attrs: NewUser) -> RepoResult<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.values().any(|user| user.email == attrs.email) {
            return Err(duplicate_email());
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.last_user_id,
            name: attrs.name,
            email: attrs.email,
            password_hash: attrs.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> RepoResult<User> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(email) = &patch.email {
            if tables
                .users
                .values()
                .any(|user| user.id != id && &user.email == email)
            {
                return Err(duplicate_email());
            }
        }

        let user = tables.users.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        // Cascade, as the schema's ON DELETE CASCADE does
        tables.cars.retain(|_, car| car.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl CarStore for MemoryStore {
    async fn page_with_user(&self, bounds: PageBounds) -> RepoResult<Vec<CarWithUser>> {
        let tables = self.tables.lock().unwrap();
        Ok(page(tables.cars.values().cloned(), bounds)
            .into_iter()
            .filter_map(|car| {
                tables
                    .users
                    .get(&car.user_id)
                    .cloned()
                    .map(|user| CarWithUser { car, user })
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Car>> {
        Ok(self.tables.lock().unwrap().cars.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Car>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .cars
            .values()
            .filter(|car| car.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, attrs: NewCar) -> RepoResult<Car> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.contains_key(&attrs.user_id) {
            return Err(missing_owner());
        }
        if tables.cars.values().any(|car| car.plate == attrs.plate) {
            return Err(duplicate_plate());
        }

        tables.last_car_id += 1;
        let now = Utc::now();
        let car = Car {
            id: tables.last_car_id,
            name: attrs.name,
            color: attrs.color,
            brand: attrs.brand,
            year: attrs.year,
            plate: attrs.plate,
            user_id: attrs.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.cars.insert(car.id, car.clone());
        Ok(car)
    }

    async fn update(&self, id: i64, patch: CarPatch) -> RepoResult<Car> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(plate) = &patch.plate {
            if tables
                .cars
                .values()
                .any(|car| car.id != id && &car.plate == plate)
            {
                return Err(duplicate_plate());
            }
        }
        if let Some(user_id) = patch.user_id {
            if !tables.users.contains_key(&user_id) {
                return Err(missing_owner());
            }
        }

        let car = tables.cars.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        if let Some(name) = patch.name {
            car.name = name;
        }
        if let Some(color) = patch.color {
            car.color = color;
        }
        if let Some(brand) = patch.brand {
            car.brand = brand;
        }
        if let Some(year) = patch.year {
            car.year = year;
        }
        if let Some(plate) = patch.plate {
            car.plate = plate;
        }
        if let Some(user_id) = patch.user_id {
            car.user_id = user_id;
        }
        car.updated_at = Utc::now();
        Ok(car.clone())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.cars.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
