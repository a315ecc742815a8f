//! Shared building blocks for the cake API crates: logging setup and
//! small wire types that are not owned by any single domain.

pub mod types;
pub mod utils;
