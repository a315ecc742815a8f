//! Service layer for the cake resource.
//! - Separates business rules (existence checks, ordering, projection) from data access.
//! - Persistence is reached only through `cake::repository::CakeRepository`.
//! - Framework-free: the HTTP crate maps `errors::ServiceError` to status codes.

pub mod errors;
pub mod cake;
