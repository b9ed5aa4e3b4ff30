//! MCP tool modules.
//!
//! Tools are grouped by domain: quote lookups (profile, price) and financial
//! statement / key-metric access.

pub mod financials;
pub mod quotes;
