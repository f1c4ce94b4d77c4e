//! evalia-core
//!
//! The intake record, its field metadata, and the pure text transforms
//! applied before layout. No I/O: this is the shared vocabulary of the
//! evaluation wizard, the rewrite client and the report exporter.

pub mod error;
pub mod fields;
pub mod record;
pub mod rut;
pub mod sanitize;
pub mod wizard;

pub use fields::{Field, FieldKind, Section};
pub use record::{CompletedRecord, FieldValue, Record};
