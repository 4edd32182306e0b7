use serde::{Deserialize, Serialize};
use crate::models::Role;

pub const DEFAULT_DISPLAY_NAME: &str = "Usuario";

/// Identidad autenticada tal como queda en el storage del navegador
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub display_name: String,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role, display_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            role,
            display_name: display_name.into(),
        }
    }

    /// Valor del header `Authorization`
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
