//! Core types and provider adapter for finmcp.
//!
//! This crate owns the market-data provider adapter: it normalizes the
//! upstream quote-summary responses into stable domain records and maps every
//! provider fault into the `NetworkFailure`/`NotFound`/`UpstreamFormatError`
//! taxonomy consumed by the MCP layer.

pub mod error;
pub mod models;
pub mod provider;
pub mod ticker;
pub mod transport;
