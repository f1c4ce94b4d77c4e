use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("layout failed: {0}")]
    Layout(String),

    #[error("character {character:?} cannot be encoded in the report fonts (in {text:?})")]
    Unencodable { character: char, text: String },

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}
