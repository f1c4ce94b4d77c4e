//! From a captured record to files on disk.
//!
//! Text improvement is best effort: when the service cannot be reached, or
//! is not configured, every selected field keeps its text and the report is
//! still written.

use std::path::Path;

use evalia_core::{Field, Record};
use evalia_export::{RenderedDocument, render_report};
use evalia_rewrite::{AnthropicClient, RewriteError, RewriteSummary, improve_fields};
use eyre::WrapErr;
use tracing::{info, warn};

use crate::config::EvaliaConfig;

/// Improve `fields` in place with the configured service.
///
/// `api_key` is the already resolved key (see
/// [`EvaliaConfig::resolved_api_key`]).
pub fn improve_record(
    record: &mut Record,
    fields: &[Field],
    config: &EvaliaConfig,
    api_key: Option<String>,
) -> RewriteSummary {
    if fields.is_empty() {
        return RewriteSummary::default();
    }

    let client = api_key
        .ok_or(RewriteError::MissingApiKey)
        .and_then(|key| AnthropicClient::new(config.rewrite_config(key)));

    match client {
        Ok(client) => improve_fields(record, fields, &client),
        Err(e) => {
            warn!(error = %e, "text improvement unavailable");
            RewriteSummary {
                improved: Vec::new(),
                failed: fields.iter().map(|f| (*f, e.to_string())).collect(),
            }
        }
    }
}

pub fn save_record(record: &Record, path: &Path) -> eyre::Result<()> {
    std::fs::write(path, record.to_json()?)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "record saved");
    Ok(())
}

pub fn write_report(record: &Record, output: &Path) -> eyre::Result<RenderedDocument> {
    let rendered = render_report(record)?;
    std::fs::write(output, &rendered.bytes)
        .wrap_err_with(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), pages = rendered.page_count, "report written");
    Ok(rendered)
}
