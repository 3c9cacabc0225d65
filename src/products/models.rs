use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
}
