use evalia_core::sanitize::is_sanitized;
use evalia_core::{Field, Record};
use tracing::{info, warn};

use crate::client::TextImprover;
use crate::error::RewriteError;

/// Outcome of an improvement pass over several fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewriteSummary {
    /// Fields whose value was replaced by the improved text.
    pub improved: Vec<Field>,
    /// Fields left untouched (field, error message).
    pub failed: Vec<(Field, String)>,
}

impl RewriteSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Whether a field may be sent to the rewrite service.
///
/// Only the long prose fields that are sanitized before rendering qualify,
/// since the sanitizer removes whatever commentary the model adds.
pub fn is_improvable(field: Field) -> bool {
    is_sanitized(field)
}

/// Run each selected field through `improver`, one at a time.
///
/// A failure on one field is recorded in the summary and never stops the
/// others; the failed field keeps its original text.
pub fn improve_fields(
    record: &mut Record,
    fields: &[Field],
    improver: &dyn TextImprover,
) -> RewriteSummary {
    let mut summary = RewriteSummary::default();

    for &field in fields {
        match improve_one(record, field, improver) {
            Ok(text) => {
                record.set(field, text);
                summary.improved.push(field);
            }
            Err(e) => {
                warn!(field = field.key(), error = %e, "field not improved");
                summary.failed.push((field, e.to_string()));
            }
        }
    }

    info!(
        improved = summary.improved.len(),
        failed = summary.failed.len(),
        "text improvement finished"
    );
    summary
}

fn improve_one(
    record: &Record,
    field: Field,
    improver: &dyn TextImprover,
) -> Result<String, RewriteError> {
    if !is_improvable(field) {
        return Err(RewriteError::NotImprovable(field.key()));
    }
    let text = record.text(field);
    if text.trim().is_empty() {
        return Err(RewriteError::EmptyText);
    }
    improver.improve(&text)
}
