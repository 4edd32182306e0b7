// ============================================================================
// ROLE ROUTER - rol → dashboard
// ============================================================================

use crate::models::{Role, Session, ViewId};

pub struct RoleRouter;

impl RoleRouter {
    /// Dashboard de cada rol. Total: nunca falla.
    pub fn route_for(role: Role) -> ViewId {
        match role {
            Role::Driver => ViewId::DriverDashboard,
            Role::Rider => ViewId::RiderDashboard,
        }
    }

    /// Igual que `route_for` con el rol tal como viene del storage o del backend
    pub fn route_for_raw(raw: &str) -> ViewId {
        Self::route_for(Role::normalize(raw))
    }

    /// Destino al abrir la app: con sesión va al dashboard de su rol
    pub fn landing_view(session: Option<&Session>) -> ViewId {
        match session {
            Some(session) => Self::route_for(session.role),
            None => ViewId::Home,
        }
    }

    /// Vista solicitada una vez aplicada la sesión:
    /// - vistas protegidas sin sesión → login
    /// - home/login/registro con sesión → dashboard del rol
    pub fn guard(requested: ViewId, session: Option<&Session>) -> ViewId {
        match (session, requested.requires_session()) {
            (None, true) => {
                log::warn!("🔒 [ROUTER] {} requiere sesión, redirigiendo a login", requested.path());
                ViewId::Login
            }
            (Some(session), false) => Self::route_for(session.role),
            _ => requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_roles_route_to_dashboards() {
        assert_eq!(RoleRouter::route_for_raw("conductor"), ViewId::DriverDashboard);
        assert_eq!(RoleRouter::route_for_raw("driver"), ViewId::DriverDashboard);
        assert_eq!(RoleRouter::route_for_raw("pasajero"), ViewId::RiderDashboard);
        assert_eq!(RoleRouter::route_for_raw("unknown"), ViewId::RiderDashboard);
        assert_eq!(RoleRouter::route_for_raw(""), ViewId::RiderDashboard);
    }

    #[test]
    fn guard_redirects_by_session() {
        let driver = Session::new("tok", Role::Driver, "Ana");
        assert_eq!(RoleRouter::guard(ViewId::ProfileEdit, None), ViewId::Login);
        assert_eq!(RoleRouter::guard(ViewId::Login, None), ViewId::Login);
        assert_eq!(RoleRouter::guard(ViewId::Login, Some(&driver)), ViewId::DriverDashboard);
        assert_eq!(RoleRouter::guard(ViewId::Home, Some(&driver)), ViewId::DriverDashboard);
        assert_eq!(RoleRouter::guard(ViewId::ProfileView, Some(&driver)), ViewId::ProfileView);
    }

    #[test]
    fn landing_without_session_is_home() {
        assert_eq!(RoleRouter::landing_view(None), ViewId::Home);
        let rider = Session::new("tok", Role::Rider, "Ana");
        assert_eq!(RoleRouter::landing_view(Some(&rider)), ViewId::RiderDashboard);
    }
}
