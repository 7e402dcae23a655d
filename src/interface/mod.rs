//! # Interface Layer
//!
//! How an operator drives the server: command-line flags.

pub mod cli;
