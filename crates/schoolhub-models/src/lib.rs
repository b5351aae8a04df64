//! # SchoolHub Models
//!
//! Entities, request/response DTOs and enums shared by the API, the data
//! providers and the CLI.
//!
//! Joined reads are modelled as an entity flattened next to its embedded
//! relations, so `StudentWithRelations` serializes as a student row with
//! `profiles` and `classes` objects alongside.

pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod blog;
pub mod classes;
pub mod contact;
pub mod dashboard;
pub mod events;
pub mod grades;
pub mod parents;
pub mod payments;
pub mod profiles;
pub mod roles;
pub mod students;
pub mod teachers;

pub use auth::{AuthUser, SessionUser, UserMetadata, resolve_role};
pub use profiles::Profile;
pub use roles::UserRole;
