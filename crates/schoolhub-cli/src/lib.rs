//! # SchoolHub CLI
//!
//! Administration and seeding utilities used by the `schoolhub-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use schoolhub_cli::seeder::{SeedConfig, seed_all};
//!
//! let summary = seed_all(&pool, SeedConfig::default()).await?;
//! println!("{} students", summary.students);
//! ```

pub mod admin;
pub mod seeder;
