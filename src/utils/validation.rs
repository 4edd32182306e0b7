// ============================================================================
// VALIDACIÓN DE FORMULARIOS - reglas comunes a todas las vistas
// ============================================================================

use regex::Regex;
use crate::error::ClientError;

pub const MSG_FILL_ALL_FIELDS: &str = "Por favor, completa todos los campos";
pub const MSG_INVALID_EMAIL: &str = "Por favor, ingresa un correo electrónico válido";

lazy_static::lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("email regex is valid");
    static ref DIGITS_RE: Regex = Regex::new(r"^\d+$").expect("digits regex is valid");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Correo con el dominio institucional exacto (`usuario@dominio`)
pub fn is_institutional_email(email: &str, domain: &str) -> bool {
    match Regex::new(&format!(r"^[^\s@]+@{}$", regex::escape(domain))) {
        Ok(re) => re.is_match(email),
        Err(e) => {
            log::error!("❌ [VALIDATION] Dominio institucional inválido '{}': {}", domain, e);
            false
        }
    }
}

pub fn is_digits_only(value: &str) -> bool {
    DIGITS_RE.is_match(value)
}

/// Todos los campos con contenido (tras recortar espacios)
pub fn require_filled(fields: &[&str], message: &str) -> Result<(), ClientError> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(ClientError::validation(message));
    }
    Ok(())
}

/// Longitud mínima en caracteres, no en bytes
pub fn require_min_chars(value: &str, min: usize, message: &str) -> Result<(), ClientError> {
    if value.chars().count() < min {
        return Err(ClientError::validation(message));
    }
    Ok(())
}

pub fn password_too_short_message(min: usize) -> String {
    format!("La contraseña debe tener al menos {} caracteres", min)
}
