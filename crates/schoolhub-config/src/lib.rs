//! # SchoolHub Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing and lifetimes
//! - [`session`]: session cookie names and the registration redirect base URL
//! - [`cors`]: allowed origins
//! - [`email`]: SMTP settings and the contact notification address
//! - [`server`]: bind address
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::{CorsConfig, EmailConfig, JwtConfig, ServerConfig, SessionConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let session_config = SessionConfig::from_env();
//! ```

pub mod cors;
pub mod email;
pub mod jwt;
pub mod server;
pub mod session;

pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
