use serde::{Deserialize, Serialize};

/// Rol del usuario. Se normaliza una sola vez al leerlo del backend o del
/// storage; el resto del código nunca compara strings de rol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    Rider,
    Driver,
}

impl Role {
    /// `"driver"` / `"conductor"` → Driver; cualquier otro valor → Rider
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "driver" | "conductor" => Role::Driver,
            _ => Role::Rider,
        }
    }

    /// Valor que espera el backend y que leen las páginas legacy
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Rider => "pasajero",
            Role::Driver => "conductor",
        }
    }

    pub fn is_driver(&self) -> bool {
        matches!(self, Role::Driver)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::normalize(&raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_wire().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}
