use serde::{Deserialize, Serialize};

/// Sobre común de todas las respuestas del backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
}

/// Error de validación del backend (express-validator usa `msg`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FieldError {
    pub fn text(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .filter(|text| !text.is_empty())
    }
}

impl<T> ApiEnvelope<T> {
    /// Errores de campo unidos en un solo mensaje, o `message` si no hay
    pub fn error_message(&self) -> Option<String> {
        let joined = self
            .errors
            .iter()
            .flatten()
            .filter_map(FieldError::text)
            .collect::<Vec<_>>()
            .join(", ");
        if !joined.is_empty() {
            return Some(joined);
        }
        self.message.clone().filter(|msg| !msg.is_empty())
    }
}
