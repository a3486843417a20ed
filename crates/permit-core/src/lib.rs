//! Permit Core: domain models, error taxonomy and repository traits
//! shared by every crate in the workspace.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{ItemFailure, PermitError, PermitResult};
