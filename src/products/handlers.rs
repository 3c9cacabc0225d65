use actix_web::{web, HttpResponse};
use tracing::info;

use crate::AppState;
use crate::error::{AppError, DatabaseError};
use super::models::ProductCreate;

pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = state.products.list().await?;
    Ok(HttpResponse::Ok().json(products))
}

pub async fn get_product(
    path: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let product = state
        .products
        .get(id)
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;
    Ok(HttpResponse::Ok().json(product))
}

pub async fn create_product(
    body: web::Json<ProductCreate>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let product = state.products.create(&body).await?;
    info!("Created product {} ({})", product.id, product.name);
    Ok(HttpResponse::Created().json(product))
}
