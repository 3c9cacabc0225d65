//! Key-value store client for user and session records.
//!
//! Holds one `ConnectionManager` per process, created lazily on first
//! use. The manager multiplexes all in-flight requests over a single
//! connection and is safe to clone per call site.

use redis::aio::ConnectionManager;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::AppError;

#[derive(Clone)]
pub struct Store {
    url: String,
    manager: Arc<OnceCell<ConnectionManager>>,
}

impl Store {
    /// Create a handle without connecting; the connection is
    /// established on the first store operation.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            manager: Arc::new(OnceCell::new()),
        }
    }

    /// Get the shared connection manager, initializing it exactly once
    /// even under concurrent first callers.
    pub async fn connection(&self) -> Result<ConnectionManager, AppError> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                info!("Connecting to key-value store");
                let client = redis::Client::open(self.url.as_str())?;
                let manager = ConnectionManager::new(client).await?;
                Ok::<_, AppError>(manager)
            })
            .await?;
        Ok(manager.clone())
    }
}
