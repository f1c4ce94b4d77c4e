use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewriteError {
    /// The service answered with a non-success status.
    #[error("Error al procesar el texto: {status} - {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("Error al conectar con la API: {0}")]
    Transport(String),

    #[error("respuesta de la API no válida: {0}")]
    ResponseParse(String),

    #[error("no hay texto para mejorar")]
    EmptyText,

    #[error("no hay clave de API configurada (defina ANTHROPIC_API_KEY o ejecute `evalia config set --api-key`)")]
    MissingApiKey,

    #[error("el campo {0} no admite mejora de texto")]
    NotImprovable(&'static str),

    #[error("error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
}
