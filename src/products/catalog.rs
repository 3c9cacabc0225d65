use sqlx::PgPool;

use crate::error::AppError;
use super::models::{Product, ProductCreate};

#[derive(Clone)]
pub struct ProductCatalog {
    pool: PgPool,
}

impl ProductCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn create(&self, product: &ProductCreate) -> Result<Product, AppError> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, price
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
