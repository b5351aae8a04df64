//! Request middleware and the extractors built on it.
//!
//! - [`session`]: resolves the caller from cookies or a bearer token,
//!   refreshes expired sessions and redirects page requests
//! - [`policy`]: the access table and per-endpoint extractors that enforce it
//!
//! ```ignore
//! use crate::middleware::policy::CreateGrades;
//!
//! async fn create_grade(_access: CreateGrades, JsonBody(dto): JsonBody<CreateGradeDto>) {
//!     // only teachers and admins reach this point
//! }
//! ```

pub mod policy;
pub mod session;
