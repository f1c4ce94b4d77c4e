//! evalia-cli library root.
//!
//! The binary is a thin clap layer; configuration and the interactive
//! wizard live here so integration tests can drive them directly.

pub mod config;
pub mod generate;
pub mod interactive;
