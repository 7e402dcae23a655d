//! # Infrastructure Layer
//!
//! Handles interactions with external systems: the MCP framework and its transports.

pub mod mcp;
