//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so hosts and integration tests
//! can write `blockfall::core::GameSession` and friends. The terminal runner's
//! environment configuration lives in [`config`].

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_stats as stats;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::Config;
