// ============================================================================
// PROFILE VIEWMODEL - ver y editar el perfil
// ============================================================================

use std::rc::Rc;
use serde::Serialize;
use crate::config::{FormConfig, CONFIG};
use crate::error::ClientError;
use crate::models::{PasswordChange, ProfileUpdate, User, Vehicle, ViewId};
use crate::services::ApiClient;
use crate::state::{AppState, SubmitState};
use crate::stores::SessionStore;

pub const PROFILE_UPDATED_MESSAGE: &str = "Info updated successfully!";

/// Formulario de edición. Los campos de contraseña son opcionales en bloque.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    /// Formulario precargado con el usuario (contraseñas vacías)
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.nombre.clone(),
            last_name: user.apellido.clone(),
            phone: user.telefono.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    fn wants_password_change(&self) -> bool {
        !self.current_password.is_empty() || !self.new_password.is_empty() || !self.confirm_password.is_empty()
    }

    pub fn validate(&self, rules: &FormConfig) -> Result<(ProfileUpdate, Option<PasswordChange>), ClientError> {
        if self.first_name.is_empty() || self.last_name.is_empty() || self.phone.is_empty() {
            return Err(ClientError::validation("Please fill in all required fields"));
        }

        let update = ProfileUpdate {
            nombre: self.first_name.clone(),
            apellido: self.last_name.clone(),
            telefono: self.phone.clone(),
        };

        if !self.wants_password_change() {
            return Ok((update, None));
        }

        if self.current_password.is_empty() {
            return Err(ClientError::validation("Current password is required to change password"));
        }
        if self.new_password.is_empty() {
            return Err(ClientError::validation("New password is required"));
        }
        if self.confirm_password.is_empty() {
            return Err(ClientError::validation("Please confirm your new password"));
        }
        if self.new_password != self.confirm_password {
            return Err(ClientError::validation("New passwords do not match"));
        }
        if self.new_password.chars().count() < rules.min_password_length {
            return Err(ClientError::validation(format!(
                "New password must be at least {} characters long",
                rules.min_password_length
            )));
        }

        Ok((
            update,
            Some(PasswordChange {
                password_actual: self.current_password.clone(),
                password_nuevo: self.new_password.clone(),
                confirmar_password: self.confirm_password.clone(),
            }),
        ))
    }
}

/// Datos de la vista de perfil
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileData {
    pub user: User,
    pub vehicle: Option<Vehicle>,
}

/// ViewModel de perfil - SOLO lógica de negocio
pub struct ProfileViewModel {
    api: ApiClient,
    store: Rc<SessionStore>,
}

impl ProfileViewModel {
    pub fn new(api: ApiClient, store: Rc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.api.clone(), Rc::clone(&state.store))
    }

    /// Usuario desde `/auth/me` y su vehículo si puede tener uno
    pub async fn load(&self) -> Result<ProfileData, ClientError> {
        let session = self.store.require()?;
        let user = self.api.me(&session.token).await?;
        self.store.save_user(&user);

        let vehicle = if user.may_have_vehicle() || user.conductor_registrado {
            self.api.my_vehicle(&session.token).await.unwrap_or_else(|e| {
                log::warn!("⚠️ [PROFILE] No se pudo cargar el vehículo: {}", e);
                None
            })
        } else {
            None
        };

        Ok(ProfileData { user, vehicle })
    }

    /// Guarda el perfil y, si se pidió, cambia la contraseña. Vuelve a la vista de perfil.
    pub async fn save(&self, form: &ProfileForm, control: &SubmitState) -> Result<ViewId, ClientError> {
        let (update, password) = form.validate(&CONFIG.form_config)?;
        let _guard = control.begin()?;
        let session = self.store.require()?;

        self.api.update_profile(&session.token, &update).await?;
        if let Some(change) = &password {
            self.api.change_password(&session.token, change).await?;
        }

        if let Some(mut user) = self.store.stored_user() {
            user.nombre = update.nombre;
            user.apellido = update.apellido;
            user.telefono = Some(update.telefono);
            self.store.save_user(&user);
        }

        Ok(ViewId::ProfileView)
    }
}
