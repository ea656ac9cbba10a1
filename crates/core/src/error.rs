#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {entity} '{name}'")]
    NotFound { entity: &'static str, name: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
