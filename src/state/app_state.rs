// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::{Session, ViewId};
use crate::services::ApiClient;
use crate::state::SubmitState;
use crate::stores::SessionStore;
use crate::viewmodels::RoleRouter;

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub store: Rc<SessionStore>,
    pub api: ApiClient,

    // UI State
    pub current_view: Rc<RefCell<ViewId>>,
    pub error_message: Rc<RefCell<Option<String>>>,
    pub success_message: Rc<RefCell<Option<String>>>,

    // Un SubmitState por cada botón que dispara una petición
    pub login_submit: SubmitState,
    pub register_submit: SubmitState,
    pub booking_submit: SubmitState,
    pub trip_submit: SubmitState,
    pub vehicle_submit: SubmitState,
    pub profile_submit: SubmitState,
}

impl AppState {
    pub fn new(store: SessionStore, api: ApiClient) -> Self {
        let initial = RoleRouter::landing_view(store.resolve().as_ref());
        Self {
            store: Rc::new(store),
            api,
            current_view: Rc::new(RefCell::new(initial)),
            error_message: Rc::new(RefCell::new(None)),
            success_message: Rc::new(RefCell::new(None)),
            login_submit: SubmitState::new(),
            register_submit: SubmitState::new(),
            booking_submit: SubmitState::new(),
            trip_submit: SubmitState::new(),
            vehicle_submit: SubmitState::new(),
            profile_submit: SubmitState::new(),
        }
    }

    /// Estado sobre el storage real del navegador
    pub fn browser() -> Self {
        Self::new(SessionStore::browser(), ApiClient::new())
    }

    pub fn session(&self) -> Option<Session> {
        self.store.resolve()
    }

    /// Obtener vista actual
    pub fn get_view(&self) -> ViewId {
        *self.current_view.borrow()
    }

    /// Navega a `requested` aplicando la guarda de sesión; devuelve la vista final
    pub fn navigate(&self, requested: ViewId) -> ViewId {
        let view = RoleRouter::guard(requested, self.session().as_ref());
        *self.current_view.borrow_mut() = view;
        self.clear_messages();
        log::info!("🧭 [ROUTER] {}", view.hash());
        view
    }

    /// Establecer mensaje de error (texto ya preparado para la vista)
    pub fn set_error(&self, message: Option<String>) {
        *self.error_message.borrow_mut() = message;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error_message.borrow().clone()
    }

    pub fn set_success(&self, message: Option<String>) {
        *self.success_message.borrow_mut() = message;
    }

    pub fn get_success(&self) -> Option<String> {
        self.success_message.borrow().clone()
    }

    pub fn clear_messages(&self) {
        self.set_error(None);
        self.set_success(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn state() -> AppState {
        AppState::new(SessionStore::in_memory(), ApiClient::with_base_url("http://localhost:4000/api"))
    }

    #[test]
    fn starts_at_home_without_session() {
        let state = state();
        assert_eq!(state.get_view(), ViewId::Home);
        assert_eq!(state.navigate(ViewId::DriverDashboard), ViewId::Login);
    }

    #[test]
    fn navigation_follows_session_role() {
        let state = state();
        state.store.persist(&Session::new("tok", Role::Driver, "Ana"));
        assert_eq!(state.navigate(ViewId::Login), ViewId::DriverDashboard);
        assert_eq!(state.navigate(ViewId::ProfileEdit), ViewId::ProfileEdit);
        assert_eq!(state.get_view(), ViewId::ProfileEdit);
    }

    #[test]
    fn navigation_clears_messages() {
        let state = state();
        state.set_error(Some("Error de conexión. Intenta de nuevo.".into()));
        state.navigate(ViewId::Register);
        assert_eq!(state.get_error(), None);
    }
}
