//! # SchoolHub API
//!
//! A school-management backend built with Rust, Axum and PostgreSQL: role
//! dashboards for students, teachers, parents and admins, create/read
//! endpoints for school records, and cookie sessions that refresh themselves.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session resolution and the access policy
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Login, registration, logout, session snapshot
//! │   ├── dashboard/   # Per-role dashboard data
//! │   ├── pages/       # Public and dashboard page views
//! │   ├── contact/     # Public contact form
//! │   └── ...          # students, teachers, classes, assignments, grades,
//! │                    # attendance, payments, events, blog
//! └── utils/           # Cookies and email
//! ```
//!
//! Each feature module has a `controller.rs` (handlers and OpenAPI metadata)
//! and a `router.rs`; modules with logic beyond a pass-through also have a
//! `service.rs`. Entities and DTOs live in `schoolhub-models`, data access
//! behind the `IdentityProvider` and `SchoolStore` traits in `schoolhub-db`.
//!
//! ## Request flow
//!
//! 1. [`middleware::session::session_middleware`] resolves the caller from a
//!    bearer token or the session cookies, refreshing an expired access token
//!    from the refresh cookie, and redirects page requests as needed.
//! 2. A policy extractor from [`middleware::policy`] rejects the request with
//!    401 or 403 before the body is read.
//! 3. The handler forwards the query to the store and returns JSON.
//!
//! ## Roles
//!
//! | Role | Dashboard | Can create |
//! |------|-----------|------------|
//! | Admin | `/dashboard/admin` | everything |
//! | Teacher | `/dashboard/teacher` | assignments, grades, attendance, payments |
//! | Parent | `/dashboard/parent` | payments |
//! | Student | `/dashboard/student` | payments |
//!
//! ## API Documentation
//!
//! - Swagger UI: `/swagger-ui`
//! - Scalar: `/scalar`
//! - OpenAPI JSON: `/api-docs/openapi.json`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use schoolhub_auth;
pub use schoolhub_config;
pub use schoolhub_core;
pub use schoolhub_db;
pub use schoolhub_models;
