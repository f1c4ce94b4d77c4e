//! Cleanup of prose fields that may have passed through the rewrite service.
//!
//! The rewrite model sometimes wraps its answer in lead-ins or commentary.
//! Those are known literal phrases, removed independently of each other.
//! When nothing is left, a fixed sentence stands in for the field.

use tracing::debug;

use crate::fields::Field;
use crate::record::CompletedRecord;

/// Literal phrases removed from sanitized fields.
pub static BOILERPLATE_PHRASES: &[&str] = &[
    "Aquí está el texto corregido y mejorado:",
    "El texto se puede reformular",
    "Esta versión reformulada",
    "Informe Psicológico",
    "La redacción es más clara",
    "A continuación, presento una versión revisada",
];

/// Fields subject to sanitizing, with the sentence used when they end up empty.
pub static PLACEHOLDERS: &[(Field, &str)] = &[
    (Field::PerinatalHistory, "Sin antecedentes relevantes."),
    (
        Field::ProblemOrigins,
        "Se identifican factores relacionados con hábitos alimenticios inadecuados.",
    ),
    (
        Field::ReasonsToChange,
        "Mejorar calidad de vida y estado de salud general.",
    ),
    (Field::Observations, "Sin observaciones relevantes que destacar."),
];

pub fn placeholder_for(field: Field) -> Option<&'static str> {
    PLACEHOLDERS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, text)| *text)
}

/// Whether the field goes through [`clean_text`] before rendering.
pub fn is_sanitized(field: Field) -> bool {
    placeholder_for(field).is_some()
}

/// Remove every boilerplate phrase and trim.
pub fn strip_boilerplate(text: &str) -> String {
    let mut cleaned = text.to_string();
    for phrase in BOILERPLATE_PHRASES {
        if cleaned.contains(phrase) {
            cleaned = cleaned.replace(phrase, "");
        }
    }
    cleaned.trim().to_string()
}

/// Strip boilerplate and fall back to the field's placeholder when empty.
pub fn clean_text(field: Field, text: &str) -> String {
    let cleaned = strip_boilerplate(text);
    if cleaned.is_empty()
        && let Some(placeholder) = placeholder_for(field)
    {
        debug!(field = field.key(), "substituting placeholder");
        return placeholder.to_string();
    }
    cleaned
}

/// Apply [`clean_text`] to every sanitized field of a completed record.
pub fn sanitize_record(record: &mut CompletedRecord) {
    for (field, _) in PLACEHOLDERS {
        let cleaned = clean_text(*field, record.get(*field));
        record.replace(*field, cleaned);
    }
}
