//! Airgraph CLI library.
//!
//! Argument parsing helpers and output rendering for the `airgraph-cli`
//! binary.

pub mod args;
pub mod output;
