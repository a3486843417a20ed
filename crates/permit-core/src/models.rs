//! Domain models for the work permit system.
//!
//! Rows are owned by the remote data service; these types mirror its
//! PascalCase column names on the wire.

pub mod audit;
pub mod document;
pub mod permit;
pub mod reference;
pub mod user;
pub mod wire;
