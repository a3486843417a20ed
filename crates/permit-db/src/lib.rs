//! Permit Data: client for the remote data service and repository
//! implementations.
//!
//! This crate provides:
//! - The rate-limited, caching, retrying client ([`DataClient`])
//! - The HTTP transport behind it ([`HttpTransport`], [`Transport`])
//! - Configuration and error types ([`DataServiceConfig`], [`DataError`])
//! - Repository implementations for the `permit-core` traits

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod repository;
pub mod response;
pub mod retry;
pub mod state;
pub mod transport;

pub use client::{CacheMode, DataClient};
pub use config::DataServiceConfig;
pub use error::DataError;
pub use payload::{Params, Payload, Target};
pub use retry::RetryPolicy;
pub use state::{ClientState, LocalClientState};
pub use transport::{HttpTransport, RawResponse, Transport};
