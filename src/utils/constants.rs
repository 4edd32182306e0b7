// ============================================================================
// CLAVES DE STORAGE
// ============================================================================
// Las páginas legacy y la SPA leen nombres distintos en cada área: la sesión
// se escribe en ambas.
// ============================================================================

// localStorage (área de acceso rápido, la que lee la SPA)
pub const LOCAL_TOKEN: &str = "token";
pub const LOCAL_USER: &str = "user";
pub const LOCAL_USER_ROLE: &str = "userRole";
pub const LOCAL_USER_NAME: &str = "userName";
pub const LOCAL_USER_EMAIL: &str = "userEmail";

// Preferencias que sobreviven al logout
pub const LOCAL_REMEMBERED_EMAIL: &str = "rememberedEmail";
pub const LOCAL_SELECTED_ROLE: &str = "selectedRole";

// Borradores de registro de las páginas legacy
pub const LOCAL_REGISTRATION_DATA: &str = "registrationData";
pub const LOCAL_VEHICLE_DATA: &str = "vehicleData";

// sessionStorage (lo leen las páginas legacy)
pub const SESSION_AUTH_TOKEN: &str = "authToken";
pub const SESSION_USER_ROLE: &str = "userRole";
pub const SESSION_USER_NAME: &str = "userName";
pub const SESSION_USER_EMAIL: &str = "userEmail";
pub const SESSION_IS_LOGGED_IN: &str = "isLoggedIn";
pub const SESSION_UNIVERSITY_ID: &str = "universityId";
pub const SESSION_USER_PHONE: &str = "userPhone";
pub const SESSION_USER_ID: &str = "userId";

/// Claves de sesión en localStorage que borra el logout
pub const LOCAL_SESSION_KEYS: &[&str] = &[
    LOCAL_TOKEN,
    LOCAL_USER,
    LOCAL_USER_ROLE,
    LOCAL_USER_NAME,
    LOCAL_USER_EMAIL,
    LOCAL_REGISTRATION_DATA,
    LOCAL_VEHICLE_DATA,
];

/// Claves de sesión en sessionStorage que borra el logout
pub const SESSION_SESSION_KEYS: &[&str] = &[
    SESSION_AUTH_TOKEN,
    SESSION_USER_ROLE,
    SESSION_USER_NAME,
    SESSION_USER_EMAIL,
    SESSION_IS_LOGGED_IN,
    SESSION_UNIVERSITY_ID,
    SESSION_USER_PHONE,
    SESSION_USER_ID,
];
