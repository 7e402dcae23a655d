//! # Application Layer
//!
//! The execution core of the runner: dedenting snippets, relaying them to an
//! interpreter, and the logging setup shared by every transport.

pub mod dedent;
pub mod logging;
pub mod relay;
