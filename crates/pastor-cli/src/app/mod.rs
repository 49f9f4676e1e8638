//! Application-level utilities for the Pastor CLI.
//!
//! This module provides:
//! - Path resolution for config and database files
//! - The per-invocation context with lazy config loading

mod context;
mod resolver;

pub use context::{take_inline_password, AppContext};

