// src/lib.rs
// pattern-server - Fabric and custom prompt patterns over MCP

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod mcp;
pub mod ops;
pub mod store;

pub use error::{PatternError, Result};
