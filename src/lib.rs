//! V7 Go: layered client for the V7 Go project and entity API
//!
//! A transport, a paginator, a long-running-operation waiter and a template-import
//! retrier, composed into domain operations and a thin CLI.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod operations;
pub mod pagination;
pub mod template_import;
pub mod transport;
pub mod types;
pub mod waiter;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use error::V7Error;
pub use operations::V7Client;
