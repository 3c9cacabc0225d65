//! Static demo item endpoints.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;

const MAX_ITEM_ID: u32 = 1_000_000;

pub async fn list_items() -> HttpResponse {
    HttpResponse::Ok().json(json!(["item1", "item2"]))
}

pub async fn get_item(path: web::Path<u32>) -> Result<HttpResponse, AppError> {
    let item_id = path.into_inner();
    if item_id >= MAX_ITEM_ID {
        return Err(AppError::ValidationError(format!(
            "item id must be below {}",
            MAX_ITEM_ID
        )));
    }
    Ok(HttpResponse::Ok().json(json!({
        "item": { "id": item_id },
    })))
}
