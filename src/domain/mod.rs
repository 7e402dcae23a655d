//! # Domain Layer
//!
//! Core definitions, types, errors and traits of the python runner.
//! Independent of the MCP framework, serving as the contract for the other layers.

pub mod config;
pub mod error;
pub mod paths;
pub mod traits;
pub mod types;
