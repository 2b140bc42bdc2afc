// src/mcp/tools/mod.rs
// MCP tool implementations

pub mod patterns;
