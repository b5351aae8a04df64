//! # SchoolHub Core
//!
//! Foundational types shared by every SchoolHub crate:
//!
//! - [`errors`]: the application error type and its HTTP rendering
//! - [`password`]: password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::{AppError, hash_password, verify_password};
//!
//! let error = AppError::forbidden("Forbidden".to_string());
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_dummy_password, verify_password};
