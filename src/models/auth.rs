use serde::{Deserialize, Serialize};
use crate::models::{Role, Session};

/// Usuario tal como lo devuelve el backend (`data.user`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    #[serde(rename = "idUniversidad", default, skip_serializing_if = "Option::is_none")]
    pub id_universidad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    /// Se guarda tal cual llega para no perder valores como `"ambos"`
    #[serde(default)]
    pub rol: String,
    #[serde(rename = "conductorRegistrado", default)]
    pub conductor_registrado: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }

    pub fn role(&self) -> Role {
        Role::normalize(&self.rol)
    }

    /// Usuarios que pueden tener un vehículo asociado en su perfil
    pub fn may_have_vehicle(&self) -> bool {
        self.role().is_driver() || self.rol.eq_ignore_ascii_case("ambos")
    }

    pub fn to_session(&self, token: &str) -> Session {
        Session::new(token, self.role(), self.full_name())
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub correo: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub nombre: String,
    pub apellido: String,
    #[serde(rename = "idUniversidad")]
    pub id_universidad: String,
    pub correo: String,
    pub password: String,
    pub telefono: String,
    pub rol: Role,
}

/// `data` de login y registro
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// `data` de `/auth/me`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserPayload {
    pub user: User,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ProfileUpdate {
    pub nombre: String,
    pub apellido: String,
    pub telefono: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct PasswordChange {
    #[serde(rename = "passwordActual")]
    pub password_actual: String,
    #[serde(rename = "passwordNuevo")]
    pub password_nuevo: String,
    #[serde(rename = "confirmarPassword")]
    pub confirmar_password: String,
}

/// `data` de `/auth/check-driver-status`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct DriverStatus {
    #[serde(rename = "tieneVehiculo", default)]
    pub tiene_vehiculo: bool,
    #[serde(rename = "conductorRegistrado", default)]
    pub conductor_registrado: bool,
}
