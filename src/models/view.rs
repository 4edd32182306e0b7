use serde::{Deserialize, Serialize};

/// Vistas de la SPA (hash routing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewId {
    Home,
    Login,
    Register,
    RegisterVehicle,
    RiderDashboard,
    DriverDashboard,
    ProfileView,
    ProfileEdit,
}

impl ViewId {
    pub const ALL: [ViewId; 8] = [
        ViewId::Home,
        ViewId::Login,
        ViewId::Register,
        ViewId::RegisterVehicle,
        ViewId::RiderDashboard,
        ViewId::DriverDashboard,
        ViewId::ProfileView,
        ViewId::ProfileEdit,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ViewId::Home => "/",
            ViewId::Login => "/login",
            ViewId::Register => "/register",
            ViewId::RegisterVehicle => "/register/vehicle",
            ViewId::RiderDashboard => "/dashboard/rider",
            ViewId::DriverDashboard => "/dashboard/driver",
            ViewId::ProfileView => "/profile/view",
            ViewId::ProfileEdit => "/profile/edit",
        }
    }

    /// Hash para `location.hash`
    pub fn hash(&self) -> String {
        format!("#{}", self.path())
    }

    pub fn from_hash(hash: &str) -> Option<Self> {
        let path = hash.trim_start_matches('#');
        let path = if path.is_empty() { "/" } else { path };
        Self::ALL.into_iter().find(|view| view.path() == path)
    }

    /// Vistas que exigen sesión
    pub fn requires_session(&self) -> bool {
        !matches!(self, ViewId::Home | ViewId::Login | ViewId::Register)
    }
}
