use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "https://wheels-final-project.onrender.com/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub booking_config: BookingConfig,
    pub form_config: FormConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            environment: "production".to_string(),
            enable_logging: true,
            booking_config: BookingConfig::default(),
            form_config: FormConfig::default(),
        }
    }
}

/// Límites de reservas y publicación de viajes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Máximo de cupos que un pasajero puede reservar en una sola solicitud
    pub max_seats_per_booking: u32,
    /// Máximo de asientos que un conductor puede publicar por viaje
    pub max_trip_seats: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_seats_per_booking: 4,
            max_trip_seats: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub min_password_length: usize,
    pub min_phone_length: usize,
    pub min_plate_length: usize,
    /// Dominio obligatorio del correo en el registro
    pub institutional_email_domain: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_password_length: 6,
            min_phone_length: 10,
            min_plate_length: 5,
            institutional_email_domain: "unisabana.edu.co".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: option_env!("API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("production").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            booking_config: BookingConfig {
                max_seats_per_booking: option_env!("MAX_SEATS_PER_BOOKING")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.booking_config.max_seats_per_booking),
                max_trip_seats: option_env!("MAX_TRIP_SEATS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.booking_config.max_trip_seats),
            },
            form_config: FormConfig {
                min_password_length: option_env!("MIN_PASSWORD_LENGTH")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.form_config.min_password_length),
                institutional_email_domain: option_env!("INSTITUTIONAL_EMAIL_DOMAIN")
                    .map(str::to_string)
                    .unwrap_or(defaults.form_config.institutional_email_domain.clone()),
                ..defaults.form_config
            },
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_booking_limits() {
        let config = AppConfig::default();
        assert_eq!(config.booking_config.max_seats_per_booking, 4);
        assert_eq!(config.booking_config.max_trip_seats, 5);
        assert_eq!(config.form_config.min_password_length, 6);
    }
}
