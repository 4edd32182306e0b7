// ============================================================================
// VEHICLE VIEWMODEL - registro de vehículo (paso a conductor)
// ============================================================================

use std::rc::Rc;
use crate::config::{FormConfig, CONFIG};
use crate::error::ClientError;
use crate::models::{Vehicle, VehicleForm, ViewId};
use crate::services::{ApiClient, VehiclePhotos};
use crate::state::{AppState, SubmitState};
use crate::stores::SessionStore;

/// Formulario normalizado (placa en mayúsculas) y validado
pub fn validate_vehicle(form: &VehicleForm, rules: &FormConfig) -> Result<VehicleForm, ClientError> {
    let form = form.normalized();
    if form.license_plate.chars().count() < rules.min_plate_length {
        return Err(ClientError::validation("Por favor, ingresa una placa válida"));
    }
    if form.make.is_empty() {
        return Err(ClientError::validation("Por favor, ingresa la marca del vehículo"));
    }
    if form.model.is_empty() {
        return Err(ClientError::validation("Por favor, ingresa el modelo del vehículo"));
    }
    if !form.capacity.is_some_and(|capacity| capacity > 0) {
        return Err(ClientError::validation("Por favor, selecciona la capacidad del vehículo"));
    }
    Ok(form)
}

/// ViewModel de vehículos - SOLO lógica de negocio
pub struct VehicleViewModel {
    api: ApiClient,
    store: Rc<SessionStore>,
}

impl VehicleViewModel {
    pub fn new(api: ApiClient, store: Rc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.api.clone(), Rc::clone(&state.store))
    }

    /// Registra el vehículo, refresca el usuario y reescribe el rol en
    /// ambas áreas. Destino: dashboard de conductor.
    pub async fn register(
        &self,
        form: &VehicleForm,
        photos: &VehiclePhotos,
        control: &SubmitState,
    ) -> Result<ViewId, ClientError> {
        let form = validate_vehicle(form, &CONFIG.form_config)?;
        let _guard = control.begin()?;
        let session = self.store.require()?;

        self.api.register_vehicle(&session.token, &form, photos).await?;
        log::info!("✅ [VEHICLE] Vehículo registrado: {}", form.license_plate);

        match self.api.me(&session.token).await {
            Ok(user) => {
                self.store.save_user(&user);
                self.store.set_role(user.role());
            }
            Err(e) => {
                log::warn!("⚠️ [VEHICLE] No se pudo actualizar el usuario: {}", e);
                self.mark_driver_registered();
            }
        }

        Ok(ViewId::DriverDashboard)
    }

    pub async fn my_vehicle(&self) -> Result<Option<Vehicle>, ClientError> {
        let session = self.store.require()?;
        self.api.my_vehicle(&session.token).await
    }

    /// Sin respuesta de `/auth/me`: se marca el usuario guardado a mano
    fn mark_driver_registered(&self) {
        if let Some(mut user) = self.store.stored_user() {
            user.conductor_registrado = true;
            self.store.save_user(&user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> VehicleForm {
        VehicleForm {
            license_plate: " abc123 ".into(),
            make: "Mazda".into(),
            model: "3".into(),
            capacity: Some(4),
        }
    }

    fn message(form: VehicleForm) -> String {
        validate_vehicle(&form, &FormConfig::default()).unwrap_err().user_message()
    }

    #[test]
    fn valid_form_is_normalized() {
        let valid = validate_vehicle(&form(), &FormConfig::default()).unwrap();
        assert_eq!(valid.license_plate, "ABC123");
    }

    #[test]
    fn vehicle_rules() {
        assert_eq!(message(VehicleForm { license_plate: " ab1 ".into(), ..form() }), "Por favor, ingresa una placa válida");
        assert_eq!(message(VehicleForm { make: "  ".into(), ..form() }), "Por favor, ingresa la marca del vehículo");
        assert_eq!(message(VehicleForm { model: String::new(), ..form() }), "Por favor, ingresa el modelo del vehículo");
        assert_eq!(
            message(VehicleForm { capacity: None, ..form() }),
            "Por favor, selecciona la capacidad del vehículo"
        );
    }

    #[test]
    fn manual_fallback_marks_stored_user() {
        let store = Rc::new(SessionStore::in_memory());
        let user: crate::models::User = serde_json::from_str(
            r#"{"nombre":"Ana","apellido":"Gómez","correo":"ana@unisabana.edu.co","rol":"pasajero"}"#,
        )
        .unwrap();
        store.persist_user(&user, "tok");

        let vm = VehicleViewModel::new(ApiClient::with_base_url("http://localhost:4000/api"), Rc::clone(&store));
        vm.mark_driver_registered();
        assert!(store.stored_user().unwrap().conductor_registrado);
    }
}
