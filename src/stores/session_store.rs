// ============================================================================
// SESSION STORE - sesión persistida en localStorage + sessionStorage
// ============================================================================
// La sesión se escribe en las dos áreas con nombres de clave distintos.
// Lectura: primero localStorage, después sessionStorage.
// ============================================================================

use std::rc::Rc;
use crate::error::ClientError;
use crate::models::{Role, Session, User, DEFAULT_DISPLAY_NAME};
use crate::utils::constants::*;
use crate::utils::storage::{load_json, save_json, KeyValueStore, MemoryStorage, WebStorage};

pub struct SessionStore {
    local: Rc<dyn KeyValueStore>,
    session: Rc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(local: Rc<dyn KeyValueStore>, session: Rc<dyn KeyValueStore>) -> Self {
        Self { local, session }
    }

    /// Store sobre el storage real del navegador
    pub fn browser() -> Self {
        Self::new(Rc::new(WebStorage::local()), Rc::new(WebStorage::session()))
    }

    /// Store en memoria (tests, o navegador sin storage)
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()), Rc::new(MemoryStorage::new()))
    }

    pub fn local(&self) -> &dyn KeyValueStore {
        self.local.as_ref()
    }

    pub fn session(&self) -> &dyn KeyValueStore {
        self.session.as_ref()
    }

    // ========================================================================
    // LECTURA
    // ========================================================================

    /// Sesión actual. `None` si ninguna área tiene token.
    pub fn resolve(&self) -> Option<Session> {
        let token = self.first_present(LOCAL_TOKEN, SESSION_AUTH_TOKEN)?;
        let role = self
            .first_present(LOCAL_USER_ROLE, SESSION_USER_ROLE)
            .map(|raw| Role::normalize(&raw))
            .unwrap_or_default();
        let display_name = self
            .first_present(LOCAL_USER_NAME, SESSION_USER_NAME)
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        Some(Session::new(token, role, display_name))
    }

    pub fn is_authenticated(&self) -> bool {
        self.resolve().is_some()
    }

    /// Sesión o `ClientError::Auth` (la vista redirige al login)
    pub fn require(&self) -> Result<Session, ClientError> {
        self.resolve().ok_or_else(ClientError::missing_session)
    }

    /// Usuario completo guardado en el login (`user` en localStorage)
    pub fn stored_user(&self) -> Option<User> {
        load_json(self.local.as_ref(), LOCAL_USER)
    }

    fn first_present(&self, local_key: &str, session_key: &str) -> Option<String> {
        non_empty(self.local.get(local_key)).or_else(|| non_empty(self.session.get(session_key)))
    }

    // ========================================================================
    // ESCRITURA
    // ========================================================================

    /// Escribe token, rol y nombre en ambas áreas. Un área bloqueada solo se
    /// registra en el log: la otra sigue sirviendo la sesión.
    pub fn persist(&self, session: &Session) {
        let role = session.role.as_wire();
        self.write_local(LOCAL_TOKEN, &session.token);
        self.write_local(LOCAL_USER_ROLE, role);
        self.write_local(LOCAL_USER_NAME, &session.display_name);

        self.write_session(SESSION_AUTH_TOKEN, &session.token);
        self.write_session(SESSION_USER_ROLE, role);
        self.write_session(SESSION_USER_NAME, &session.display_name);

        log::info!("💾 [SESSION] Sesión guardada (rol: {})", role);
    }

    /// Sesión a partir de la respuesta de login/registro, más los datos del
    /// usuario que leen las páginas legacy
    pub fn persist_user(&self, user: &User, token: &str) -> Session {
        let session = user.to_session(token);
        self.persist(&session);
        self.save_user(user);

        self.write_session(SESSION_IS_LOGGED_IN, "true");
        if let Some(id) = user.id.as_deref() {
            self.write_session(SESSION_USER_ID, id);
        }
        if let Some(university_id) = user.id_universidad.as_deref() {
            self.write_session(SESSION_UNIVERSITY_ID, university_id);
        }
        if let Some(phone) = user.telefono.as_deref() {
            self.write_session(SESSION_USER_PHONE, phone);
        }

        session
    }

    /// Actualiza `user`, correo y nombre sin tocar el token
    pub fn save_user(&self, user: &User) {
        if let Err(e) = save_json(self.local.as_ref(), LOCAL_USER, user) {
            log::warn!("⚠️ [SESSION] No se pudo guardar el usuario: {}", e);
        }
        self.write_local(LOCAL_USER_EMAIL, &user.correo);
        self.write_session(SESSION_USER_EMAIL, &user.correo);

        let name = user.full_name();
        self.write_local(LOCAL_USER_NAME, &name);
        self.write_session(SESSION_USER_NAME, &name);
    }

    /// Reescribe el rol en ambas áreas y en el `user` guardado
    pub fn set_role(&self, role: Role) {
        self.write_local(LOCAL_USER_ROLE, role.as_wire());
        self.write_session(SESSION_USER_ROLE, role.as_wire());
        if let Some(mut user) = self.stored_user() {
            user.rol = role.as_wire().to_string();
            if let Err(e) = save_json(self.local.as_ref(), LOCAL_USER, &user) {
                log::warn!("⚠️ [SESSION] No se pudo actualizar el usuario: {}", e);
            }
        }
        log::info!("🔄 [SESSION] Rol actualizado: {}", role);
    }

    /// Logout: borra todas las claves de sesión de ambas áreas.
    /// `rememberedEmail` y `selectedRole` se conservan.
    pub fn clear(&self) {
        for key in LOCAL_SESSION_KEYS {
            self.local.remove(key);
        }
        for key in SESSION_SESSION_KEYS {
            self.session.remove(key);
        }
        log::info!("🗑️ [SESSION] Sesión eliminada");
    }

    // ========================================================================
    // PREFERENCIAS
    // ========================================================================

    pub fn remembered_email(&self) -> Option<String> {
        non_empty(self.local.get(LOCAL_REMEMBERED_EMAIL))
    }

    /// "Recordarme": guarda el correo o lo olvida
    pub fn remember_email(&self, email: Option<&str>) {
        match email {
            Some(email) => self.write_local(LOCAL_REMEMBERED_EMAIL, email),
            None => self.local.remove(LOCAL_REMEMBERED_EMAIL),
        }
    }

    pub fn selected_role(&self) -> Option<Role> {
        non_empty(self.local.get(LOCAL_SELECTED_ROLE)).map(|raw| Role::normalize(&raw))
    }

    pub fn set_selected_role(&self, role: Role) {
        self.write_local(LOCAL_SELECTED_ROLE, role.as_wire());
    }

    fn write_local(&self, key: &str, value: &str) {
        if let Err(e) = self.local.set(key, value) {
            log::warn!("⚠️ [SESSION] localStorage '{}': {}", key, e);
        }
    }

    fn write_session(&self, key: &str, value: &str) {
        if let Err(e) = self.session.set(key, value) {
            log::warn!("⚠️ [SESSION] sessionStorage '{}': {}", key, e);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stores() -> (Rc<MemoryStorage>, Rc<MemoryStorage>, SessionStore) {
        let local = Rc::new(MemoryStorage::new());
        let session = Rc::new(MemoryStorage::new());
        let store = SessionStore::new(local.clone(), session.clone());
        (local, session, store)
    }

    fn user(rol: &str) -> User {
        User {
            id: Some("u1".into()),
            nombre: "Juan".into(),
            apellido: "Rodriguez".into(),
            correo: "juanrodri@unisabana.edu.co".into(),
            id_universidad: Some("123456".into()),
            telefono: Some("3001234567".into()),
            rol: rol.into(),
            conductor_registrado: false,
            foto: None,
        }
    }

    #[test]
    fn empty_storage_has_no_session() {
        let (_, _, store) = stores();
        assert_eq!(store.resolve(), None);
        assert!(!store.is_authenticated());
        assert!(store.require().unwrap_err().requires_login());
    }

    #[test]
    fn persist_writes_both_areas() {
        let (local, session, store) = stores();
        store.persist(&Session::new("tok", Role::Driver, "Juan Rodriguez"));

        assert_eq!(local.get(LOCAL_TOKEN).as_deref(), Some("tok"));
        assert_eq!(local.get(LOCAL_USER_ROLE).as_deref(), Some("conductor"));
        assert_eq!(session.get(SESSION_AUTH_TOKEN).as_deref(), Some("tok"));
        assert_eq!(session.get(SESSION_USER_NAME).as_deref(), Some("Juan Rodriguez"));

        let resolved = store.resolve().unwrap();
        assert_eq!(resolved.role, Role::Driver);
        assert_eq!(resolved.display_name, "Juan Rodriguez");
    }

    #[test]
    fn local_area_wins_over_session_area() {
        let (local, session, store) = stores();
        local.set(LOCAL_TOKEN, "local-tok").unwrap();
        session.set(SESSION_AUTH_TOKEN, "session-tok").unwrap();
        session.set(SESSION_USER_ROLE, "driver").unwrap();

        let resolved = store.resolve().unwrap();
        assert_eq!(resolved.token, "local-tok");
        // rol solo en sessionStorage: se usa ese
        assert_eq!(resolved.role, Role::Driver);
        assert_eq!(resolved.display_name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn session_area_alone_authenticates() {
        let (_, session, store) = stores();
        session.set(SESSION_AUTH_TOKEN, "legacy").unwrap();
        let resolved = store.resolve().unwrap();
        assert_eq!(resolved.token, "legacy");
        assert_eq!(resolved.role, Role::Rider);
    }

    #[test]
    fn clear_then_role_only_is_not_a_session() {
        let (local, session, store) = stores();
        store.persist_user(&user("conductor"), "tok");
        store.clear();
        assert_eq!(store.resolve(), None);
        assert!(session.is_empty());

        local.set(LOCAL_USER_ROLE, "conductor").unwrap();
        session.set(SESSION_USER_ROLE, "conductor").unwrap();
        assert_eq!(store.resolve(), None);
    }

    #[test]
    fn clear_keeps_preferences() {
        let (_, _, store) = stores();
        store.remember_email(Some("juanrodri@unisabana.edu.co"));
        store.set_selected_role(Role::Driver);
        store.persist_user(&user("pasajero"), "tok");
        store.clear();

        assert_eq!(store.remembered_email().as_deref(), Some("juanrodri@unisabana.edu.co"));
        assert_eq!(store.selected_role(), Some(Role::Driver));

        store.remember_email(None);
        assert_eq!(store.remembered_email(), None);
    }

    #[test]
    fn persist_user_stores_legacy_fields() {
        let (_, session, store) = stores();
        let resolved = store.persist_user(&user("pasajero"), "tok");
        assert_eq!(resolved.role, Role::Rider);

        assert_eq!(session.get(SESSION_IS_LOGGED_IN).as_deref(), Some("true"));
        assert_eq!(session.get(SESSION_UNIVERSITY_ID).as_deref(), Some("123456"));
        assert_eq!(session.get(SESSION_USER_PHONE).as_deref(), Some("3001234567"));
        assert_eq!(store.stored_user().unwrap().correo, "juanrodri@unisabana.edu.co");
    }

    #[test]
    fn set_role_rewrites_both_areas() {
        let (local, session, store) = stores();
        store.persist_user(&user("pasajero"), "tok");
        store.set_role(Role::Driver);
        assert_eq!(local.get(LOCAL_USER_ROLE).as_deref(), Some("conductor"));
        assert_eq!(session.get(SESSION_USER_ROLE).as_deref(), Some("conductor"));
        assert_eq!(store.stored_user().unwrap().role(), Role::Driver);
    }

    #[test]
    fn unavailable_storage_degrades_to_no_session() {
        let store = SessionStore::new(
            Rc::new(MemoryStorage::unavailable()),
            Rc::new(MemoryStorage::unavailable()),
        );
        store.persist(&Session::new("tok", Role::Rider, "Ana"));
        assert_eq!(store.resolve(), None);
    }

    #[test]
    fn one_blocked_area_still_serves_the_session() {
        let session = Rc::new(MemoryStorage::new());
        let store = SessionStore::new(Rc::new(MemoryStorage::unavailable()), session.clone());
        store.persist(&Session::new("tok", Role::Driver, "Ana"));
        assert_eq!(store.resolve().unwrap().token, "tok");
    }
}
