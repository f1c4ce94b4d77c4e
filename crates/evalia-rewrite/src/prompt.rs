//! Prompt for the rewrite request.

const REWRITE_INSTRUCTION: &str = "\
Por favor, corrige errores gramaticales y mejora la redacción del siguiente \
texto para un informe psicológico, manteniendo toda la información original \
pero haciéndolo más profesional y claro:";

/// Embed the clinician's text in the fixed rewrite instruction.
pub fn build_prompt(text: &str) -> String {
    format!("{REWRITE_INSTRUCTION}\n\n{text}")
}
