//! # SchoolHub DB
//!
//! Connection pool setup and the two provider seams the API talks to:
//!
//! - [`IdentityProvider`]: identity records and profile rows.
//! - [`SchoolStore`]: school data, read with its joins and created one row at a time.
//!
//! [`PgProvider`] implements both against PostgreSQL. With the `test-utils`
//! feature, [`MemoryProvider`] implements both in memory.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use schoolhub_db::{PgProvider, init_db_pool};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let provider = Arc::new(PgProvider::new(pool));
//! ```

use sqlx::postgres::PgPoolOptions;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod provider;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryProvider;
pub use postgres::PgProvider;
pub use provider::{IdentityProvider, SchoolStore};

pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
///
/// Call once at startup and share the pool through application state.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}
