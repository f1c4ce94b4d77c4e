//! evalia-rewrite
//!
//! Text improvement of long-form report fields through the Anthropic
//! Messages API.

pub mod batch;
pub mod client;
pub mod error;
pub mod prompt;

pub use batch::{RewriteSummary, improve_fields};
pub use client::{AnthropicClient, RewriteConfig, TextImprover};
pub use error::RewriteError;
