// ============================================================================
// ERRORES DEL CLIENTE
// ============================================================================
// Todos los errores se recuperan en la vista actual: ninguno es fatal.
// ============================================================================

use thiserror::Error;

pub const CONNECTION_ERROR_MESSAGE: &str = "Error de conexión. Intenta de nuevo.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Tu sesión no es válida. Inicia sesión de nuevo.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Validación local: bloquea la llamada de red
    #[error("{0}")]
    Validation(String),

    /// Token ausente o rechazado por el backend
    #[error("{0}")]
    Auth(String),

    /// Fetch rechazado o respuesta no-2xx sin cuerpo legible
    #[error("network error: {0}")]
    Network(String),

    /// Respuesta no-2xx con `{message}` o `{errors: [...]}`
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Almacenamiento del navegador no disponible o escritura rechazada
    #[error("storage error: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn missing_session() -> Self {
        Self::Auth(SESSION_EXPIRED_MESSAGE.to_string())
    }

    /// Texto que se muestra en línea en la vista
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Auth(msg) => msg.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::Network(_) | Self::Storage(_) => CONNECTION_ERROR_MESSAGE.to_string(),
        }
    }

    /// El error obliga a volver al login
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<gloo_net::Error> for ClientError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<AllocationError> for ClientError {
    fn from(err: AllocationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Errores de la asignación de puntos de recogida
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("Por favor selecciona la cantidad de cupos")]
    NoSeatCount,

    #[error("La cantidad de cupos debe estar entre 1 y {max}")]
    SeatCountOutOfRange { requested: u32, max: u32 },

    #[error("Punto de recogida inválido ({index}) para el cupo {seat}")]
    InvalidIndex { seat: usize, index: usize },

    #[error("El cupo {seat} no existe")]
    InvalidSeat { seat: usize },

    #[error("Por favor selecciona todos los puntos de recogida")]
    Incomplete,

    #[error("La reserva ya fue enviada")]
    AlreadySubmitted,
}
