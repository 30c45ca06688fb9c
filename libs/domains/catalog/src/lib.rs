//! Product Catalog Domain
//!
//! CRUD and search over the `products` table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← one transaction per call, update merge, not-found policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← transactional storage (PostgreSQL or in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, ProductInput, query params
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, InMemoryProductRepository, ProductService};
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{NameQuery, PriceRangeQuery, Product, ProductInput};
pub use postgres::{PgProductRepository, PgProductTransaction, ensure_schema};
pub use repository::{
    InMemoryProductRepository, InMemoryTransaction, ProductRepository, ProductTransaction, TxAccess,
};
pub use service::ProductService;
