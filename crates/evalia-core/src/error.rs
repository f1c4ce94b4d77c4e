use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field {field} is not captured on wizard step {step}")]
    FieldNotInStep { field: &'static str, step: u8 },
}
