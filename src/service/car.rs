//! Car operations: full CRUD plus search.

use crate::domain::car::{parse_car_update, parse_new_car, Car, CarFilter};
use crate::domain::page::Page;
use crate::error::OpError;
use crate::storage;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_car(pool: &PgPool, body: Value) -> Result<Car, OpError> {
    let car = parse_new_car(&body)?;
    storage::car::create(pool, &car).await
}

pub async fn read_car(pool: &PgPool, id: Uuid) -> Result<Car, OpError> {
    storage::car::read(pool, id)
        .await?
        .ok_or_else(|| OpError::NotFound(format!("car {id}")))
}

pub async fn update_car(pool: &PgPool, body: Value) -> Result<Car, OpError> {
    let update = parse_car_update(&body)?;
    storage::car::update(pool, &update)
        .await?
        .ok_or_else(|| OpError::NotFound(format!("car {}", update.id)))
}

pub async fn delete_car(pool: &PgPool, id: Uuid) -> Result<(), OpError> {
    if storage::car::delete(pool, id).await? {
        Ok(())
    } else {
        Err(OpError::NotFound(format!("car {id}")))
    }
}

pub async fn search_cars(pool: &PgPool, filter: &CarFilter) -> Result<Page<Car>, OpError> {
    storage::car::search(pool, filter).await
}
