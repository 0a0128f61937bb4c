//! Products catalog: CRUD over a PostgreSQL `products` table, exposed as JSON over HTTP.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod routes;
pub mod schema;
pub mod server;
pub mod service;
pub mod sql;
pub mod state;

pub use config::ServiceConfig;
pub use error::{AppError, ConfigError};
pub use model::{ProductCreate, ProductField, ProductRead, ProductUpdate};
pub use routes::{common_routes, common_routes_with_ready, product_routes};
pub use schema::ensure_tables;
pub use server::{app_router, serve};
pub use service::{MemoryProductRepository, PgProductRepository, ProductRepository};
pub use state::AppState;
