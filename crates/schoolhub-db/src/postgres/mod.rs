//! PostgreSQL-backed providers.
//!
//! Queries are built at runtime with `sqlx::query_as`. Embedded relations are
//! assembled in SQL with `jsonb_build_object` / `to_jsonb` and decoded into
//! `sqlx::types::Json` columns, so a joined read is a single round trip.

mod identity;
mod store;

use sqlx::PgPool;

#[derive(Clone)]
pub struct PgProvider {
    pool: PgPool,
}

impl PgProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
