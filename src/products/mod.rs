//! Small product catalog over the relational database.

pub mod catalog;
pub mod handlers;
pub mod models;

pub use catalog::ProductCatalog;
pub use models::{Product, ProductCreate};
