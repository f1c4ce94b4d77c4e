//! evalia-export
//!
//! Paginated PDF rendering of the evaluation report.

pub mod error;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod report;
pub mod styles;

pub use error::ExportError;
pub use layout::{LaidOutDocument, LayoutEngine};
pub use pdf::{RenderedDocument, SUGGESTED_FILENAME};
pub use report::{layout_report, render_report};
pub use styles::PageStyle;
