pub mod auth;
pub mod config;
pub mod error;
pub mod items;
pub mod products;
pub mod store;

use std::sync::Arc;

use actix_web::HttpResponse;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{SessionStore, UserStore};
pub use products::ProductCatalog;
use store::Store;

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all request handlers.
///
/// Both backing connections are lazy: the key-value store connects on
/// the first auth operation, the database pool on the first query, so
/// constructing the state never performs I/O.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub users: UserStore,
    pub sessions: SessionStore,
    pub products: ProductCatalog,
    pub db_pool: PgPool,
}

impl AppState {
    pub fn new(config: Settings) -> Result<Self> {
        let store = Store::new(&config.store.url);
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect_lazy(&config.database.url)?;

        Ok(Self {
            users: UserStore::new(store.clone()),
            sessions: SessionStore::new(store, config.session.ttl_seconds),
            products: ProductCatalog::new(db_pool.clone()),
            db_pool,
            config: Arc::new(config),
        })
    }
}
