// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN
// ============================================================================
// Login, registro, logout y cambio a conductor.
// Devuelve la vista destino, la vista actualiza el DOM.
// ============================================================================

use std::rc::Rc;
use crate::config::{FormConfig, CONFIG};
use crate::error::ClientError;
use crate::models::{DriverStatus, LoginRequest, RegisterRequest, Role, Session, User, ViewId};
use crate::services::ApiClient;
use crate::state::{AppState, SubmitState};
use crate::stores::SessionStore;
use crate::utils::validation::{self, MSG_FILL_ALL_FIELDS, MSG_INVALID_EMAIL};
use crate::viewmodels::RoleRouter;

/// Formulario de login
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn validate(&self, rules: &FormConfig) -> Result<LoginRequest, ClientError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ClientError::validation(MSG_FILL_ALL_FIELDS));
        }
        if !validation::is_valid_email(&self.email) {
            return Err(ClientError::validation(MSG_INVALID_EMAIL));
        }
        validation::require_min_chars(
            &self.password,
            rules.min_password_length,
            &validation::password_too_short_message(rules.min_password_length),
        )?;

        Ok(LoginRequest {
            correo: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Formulario de registro de pasajero
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub university_id: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl RegisterForm {
    /// El registro siempre crea pasajeros; el cambio a conductor es posterior
    pub fn validate(&self, rules: &FormConfig) -> Result<RegisterRequest, ClientError> {
        let fields = [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.university_id.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.password.as_str(),
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ClientError::validation(MSG_FILL_ALL_FIELDS));
        }
        if !validation::is_institutional_email(&self.email, &rules.institutional_email_domain) {
            return Err(ClientError::validation(format!(
                "Por favor, ingresa un correo @{} válido",
                rules.institutional_email_domain
            )));
        }
        if !validation::is_digits_only(&self.university_id) {
            return Err(ClientError::validation("El ID universitario debe contener solo números"));
        }
        validation::require_min_chars(
            &self.phone,
            rules.min_phone_length,
            "Por favor, ingresa un número de teléfono válido",
        )?;
        validation::require_min_chars(
            &self.password,
            rules.min_password_length,
            &validation::password_too_short_message(rules.min_password_length),
        )?;

        Ok(RegisterRequest {
            nombre: self.first_name.clone(),
            apellido: self.last_name.clone(),
            id_universidad: self.university_id.clone(),
            correo: self.email.clone(),
            password: self.password.clone(),
            telefono: self.phone.clone(),
            rol: Role::Rider,
        })
    }
}

/// ViewModel de sesión - SOLO lógica de negocio
pub struct SessionViewModel {
    api: ApiClient,
    store: Rc<SessionStore>,
}

impl SessionViewModel {
    pub fn new(api: ApiClient, store: Rc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.api.clone(), Rc::clone(&state.store))
    }

    /// Login: guarda la sesión en ambas áreas y devuelve el dashboard del rol
    pub async fn login(&self, form: &LoginForm, control: &SubmitState) -> Result<ViewId, ClientError> {
        let request = form.validate(&CONFIG.form_config)?;
        let _guard = control.begin()?;

        if form.remember_me {
            self.store.remember_email(Some(&form.email));
        } else {
            self.store.remember_email(None);
        }

        let payload = self.api.login(&request).await?;
        let session = self.store.persist_user(&payload.user, &payload.token);

        log::info!("✅ [AUTH] Login exitoso: {} ({})", session.display_name, session.role);
        Ok(RoleRouter::route_for(session.role))
    }

    /// Registro de pasajero; queda con sesión iniciada
    pub async fn register(&self, form: &RegisterForm, control: &SubmitState) -> Result<ViewId, ClientError> {
        let request = form.validate(&CONFIG.form_config)?;

        let _guard = control.begin()?;
        let payload = self.api.register(&request).await?;
        let session = self.store.persist_user(&payload.user, &payload.token);

        log::info!("✅ [AUTH] Usuario registrado: {}", session.display_name);
        Ok(RoleRouter::route_for(session.role))
    }

    /// Logout: borra la sesión de ambas áreas
    pub fn logout(&self) -> ViewId {
        self.store.clear();
        log::info!("👋 [AUTH] Sesión cerrada");
        ViewId::Login
    }

    pub fn require_session(&self) -> Result<Session, ClientError> {
        self.store.require()
    }

    /// Visitante con sesión en home/login/registro: dashboard de su rol
    pub fn redirect_if_authenticated(&self) -> Option<ViewId> {
        self.store
            .resolve()
            .map(|session| RoleRouter::route_for(session.role))
    }

    /// Pantalla "¿Cómo quieres usar UTravel?"
    pub fn select_role(&self, role: Role) -> ViewId {
        self.store.set_selected_role(role);
        log::info!("🎭 [AUTH] Rol seleccionado: {}", role);
        ViewId::Login
    }

    /// Usuario actualizado desde `/auth/me`. Si falla, el guardado en storage.
    pub async fn refresh_identity(&self) -> Result<User, ClientError> {
        let session = self.require_session()?;
        match self.api.me(&session.token).await {
            Ok(user) => {
                self.store.save_user(&user);
                Ok(user)
            }
            Err(err) if err.requires_login() => Err(err),
            Err(err) => {
                log::warn!("⚠️ [AUTH] No se pudo refrescar el usuario: {}", err);
                self.store.stored_user().ok_or(err)
            }
        }
    }

    /// "Quiero ser conductor": con vehículo pasa al dashboard de conductor,
    /// sin vehículo (o si la consulta falla) al registro de vehículo
    pub async fn become_driver(&self) -> Result<ViewId, ClientError> {
        let session = self.require_session()?;
        match self.api.my_vehicle(&session.token).await {
            Ok(Some(vehicle)) => {
                log::info!("🚙 [AUTH] Vehículo {} encontrado, cambiando a conductor", vehicle.placa);
                self.store.set_role(Role::Driver);
                Ok(ViewId::DriverDashboard)
            }
            Ok(None) => Ok(ViewId::RegisterVehicle),
            Err(err) if err.requires_login() => Err(err),
            Err(err) => {
                log::warn!("⚠️ [AUTH] Error verificando vehículo: {}", err);
                Ok(ViewId::RegisterVehicle)
            }
        }
    }

    pub async fn check_driver_status(&self) -> Result<DriverStatus, ClientError> {
        let session = self.require_session()?;
        self.api.check_driver_status(&session.token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MSG_BUSY;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;

    fn rules() -> FormConfig {
        FormConfig::default()
    }

    fn register_form() -> RegisterForm {
        RegisterForm {
            first_name: "Juan".into(),
            last_name: "Rodriguez".into(),
            university_id: "123456".into(),
            email: "juanrodri@unisabana.edu.co".into(),
            phone: "3001234567".into(),
            password: "secret1".into(),
        }
    }

    fn view_model() -> SessionViewModel {
        SessionViewModel::new(
            ApiClient::with_base_url("http://localhost:4000/api"),
            Rc::new(SessionStore::in_memory()),
        )
    }

    #[test]
    fn login_form_rules() {
        let form = LoginForm { email: "ana@unisabana.edu.co".into(), password: "123456".into(), remember_me: false };
        assert_eq!(form.validate(&rules()).unwrap().correo, "ana@unisabana.edu.co");

        let empty = LoginForm::default();
        assert_eq!(empty.validate(&rules()).unwrap_err().user_message(), MSG_FILL_ALL_FIELDS);

        let bad_email = LoginForm { email: "ana".into(), ..form.clone() };
        assert_eq!(bad_email.validate(&rules()).unwrap_err().user_message(), MSG_INVALID_EMAIL);

        let short = LoginForm { password: "123".into(), ..form };
        assert_eq!(
            short.validate(&rules()).unwrap_err().user_message(),
            "La contraseña debe tener al menos 6 caracteres"
        );
    }

    #[test]
    fn registration_always_requests_rider_role() {
        let request = register_form().validate(&rules()).unwrap();
        assert_eq!(request.rol, Role::Rider);
        assert_eq!(request.id_universidad, "123456");
    }

    #[test]
    fn registration_rules() {
        let gmail = RegisterForm { email: "juan@gmail.com".into(), ..register_form() };
        assert_eq!(
            gmail.validate(&rules()).unwrap_err().user_message(),
            "Por favor, ingresa un correo @unisabana.edu.co válido"
        );

        let id = RegisterForm { university_id: "12a".into(), ..register_form() };
        assert_eq!(
            id.validate(&rules()).unwrap_err().user_message(),
            "El ID universitario debe contener solo números"
        );

        let phone = RegisterForm { phone: "300123".into(), ..register_form() };
        assert_eq!(
            phone.validate(&rules()).unwrap_err().user_message(),
            "Por favor, ingresa un número de teléfono válido"
        );

        let missing = RegisterForm { last_name: String::new(), ..register_form() };
        assert_eq!(missing.validate(&rules()).unwrap_err().user_message(), MSG_FILL_ALL_FIELDS);
    }

    #[test]
    fn logout_and_guards() {
        let vm = view_model();
        assert!(vm.require_session().unwrap_err().requires_login());
        assert_eq!(vm.redirect_if_authenticated(), None);

        vm.store.persist(&Session::new("tok", Role::Driver, "Ana"));
        assert_eq!(vm.redirect_if_authenticated(), Some(ViewId::DriverDashboard));

        assert_eq!(vm.logout(), ViewId::Login);
        assert!(vm.require_session().is_err());
    }

    #[test]
    fn selected_role_survives_logout() {
        let vm = view_model();
        assert_eq!(vm.select_role(Role::Driver), ViewId::Login);
        vm.logout();
        assert_eq!(vm.store.selected_role(), Some(Role::Driver));
    }

    fn offline_view_model() -> (Rc<MemoryStorage>, Rc<MemoryStorage>, SessionViewModel) {
        let local = Rc::new(MemoryStorage::new());
        let session = Rc::new(MemoryStorage::new());
        let store = SessionStore::new(local.clone(), session.clone());
        let vm = SessionViewModel::new(ApiClient::with_base_url("http://127.0.0.1:0"), Rc::new(store));
        (local, session, vm)
    }

    #[test]
    fn invalid_login_never_touches_storage() {
        let (local, session, vm) = offline_view_model();
        let control = SubmitState::new();
        let form = LoginForm { email: "ana".into(), password: "123456".into(), remember_me: true };

        let err = block_on(vm.login(&form, &control)).unwrap_err();
        assert_eq!(err, ClientError::Validation(MSG_INVALID_EMAIL.to_string()));
        assert!(local.is_empty());
        assert!(session.is_empty());
        assert!(!control.is_in_flight());
    }

    #[test]
    fn login_while_in_flight_is_ignored() {
        let (local, session, vm) = offline_view_model();
        let control = SubmitState::new();
        let _pending = control.begin().unwrap();
        let form = LoginForm { email: "ana@unisabana.edu.co".into(), password: "123456".into(), remember_me: true };

        let err = block_on(vm.login(&form, &control)).unwrap_err();
        assert_eq!(err.user_message(), MSG_BUSY);
        assert!(local.is_empty());
        assert!(session.is_empty());
        assert!(control.is_in_flight());
    }

    #[test]
    fn register_rejects_before_any_request() {
        let (local, _, vm) = offline_view_model();
        let control = SubmitState::new();

        let gmail = RegisterForm { email: "juan@gmail.com".into(), ..register_form() };
        assert!(matches!(block_on(vm.register(&gmail, &control)), Err(ClientError::Validation(_))));

        let _pending = control.begin().unwrap();
        let err = block_on(vm.register(&register_form(), &control)).unwrap_err();
        assert_eq!(err.user_message(), MSG_BUSY);
        assert!(local.is_empty());
    }
}
