// ============================================================================
// UTRAVEL PWA - NÚCLEO DEL CLIENTE (RUST → WASM)
// ============================================================================
// Arquitectura MVVM:
// - ViewModels: Lógica UI, devuelven la vista destino
// - Services: SOLO comunicación API
// - Stores: Sesión persistida (localStorage + sessionStorage)
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod stores;
pub mod state;
pub mod utils;
pub mod viewmodels;

use std::cell::RefCell;
use std::rc::Rc;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::config::CONFIG;
use crate::error::ClientError;
use crate::models::{Booking, Role, Trip, TripFilters, VehicleForm, ViewId, Waypoints};
use crate::services::VehiclePhotos;
use crate::state::AppState;
use crate::viewmodels::{
    intermediate_only, BookingAttempt, BookingPhase, BookingViewModel, LoginForm, ProfileForm,
    ProfileViewModel, RegisterForm, RoleRouter, RoutePointEditor, RouteSequence, SessionViewModel,
    TripForm, TripSummary, TripViewModel, VehicleViewModel, MSG_BOOKING_CANCELLED,
    MSG_BOOKING_CONFIRMED, MSG_BOOKING_CREATED, MSG_TRIP_CREATED,
};

// Estado global de la app (un solo hilo: el hilo UI del navegador)
thread_local! {
    static APP: RefCell<Option<AppState>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(Config::default());
    }
    log::info!("🚀 UTravel PWA ({})", CONFIG.environment);

    let state = AppState::browser();
    log::info!("🧭 [ROUTER] Vista inicial: {}", state.get_view().hash());
    APP.with(|cell| *cell.borrow_mut() = Some(state));

    Ok(())
}

/// Estado global; si `main` no corrió todavía se crea sobre el storage del navegador
fn app_state() -> AppState {
    APP.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(AppState::browser)
            .clone()
    })
}

/// `ruta` tal como llega desde JS: string, array, null o undefined.
/// Misma normalización que la respuesta del backend.
fn waypoints_from_js(ruta: JsValue) -> Waypoints {
    serde_wasm_bindgen::from_value(ruta).unwrap_or_else(|e| {
        log::warn!("⚠️ [ROUTE] ruta ilegible: {}", e);
        Waypoints::Absent
    })
}

/// Strings de un array JS; cualquier otro valor se ignora
fn strings_from_js(value: &JsValue) -> Vec<String> {
    if !js_sys::Array::is_array(value) {
        return Vec::new();
    }
    js_sys::Array::from(value)
        .iter()
        .filter_map(|item| item.as_string())
        .collect()
}

fn to_js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| to_js_error(e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| to_js_error(e.to_string()))
}

/// Error de un flujo: queda como mensaje en línea y rechaza la promesa con
/// ese mismo texto. Sin sesión válida se cierra la sesión y se va al login.
fn fail(state: &AppState, tag: &str, err: ClientError) -> JsValue {
    log::error!("❌ [{}] {}", tag, err);
    if err.requires_login() {
        let view = SessionViewModel::from_state(state).logout();
        state.navigate(view);
    }
    let message = err.user_message();
    state.set_error(Some(message.clone()));
    to_js_error(message)
}

fn succeed(state: &AppState, message: &str) -> JsValue {
    state.set_success(Some(message.to_string()));
    JsValue::from_str(message)
}

// ============================================================================
// FUNCIONES PURAS
// ============================================================================

/// `"A → B → C → D"`
#[wasm_bindgen]
pub fn format_route(origin: &str, destination: &str, ruta: JsValue) -> String {
    RouteSequence::format(origin, destination, &waypoints_from_js(ruta)).summary()
}

/// `"1. A\n2. B\n3. C\n4. D"`
#[wasm_bindgen]
pub fn format_route_detailed(origin: &str, destination: &str, ruta: JsValue) -> String {
    RouteSequence::format(origin, destination, &waypoints_from_js(ruta)).detailed()
}

/// Puntos de recogida disponibles (solo intermedios)
#[wasm_bindgen]
pub fn intermediate_points(ruta: JsValue) -> js_sys::Array {
    intermediate_only(&waypoints_from_js(ruta))
        .iter()
        .map(|point| JsValue::from_str(point))
        .collect()
}

/// Hash del dashboard de un rol (`"conductor"` → `"#/dashboard/driver"`)
#[wasm_bindgen]
pub fn view_for_role(role: &str) -> String {
    RoleRouter::route_for_raw(role).hash()
}

#[wasm_bindgen(js_name = price_label)]
pub fn price_label_js(price: f64) -> String {
    utils::price_label(price)
}

/// Tarjeta de viaje lista para pintar
#[wasm_bindgen]
pub fn trip_summary(trip: JsValue) -> Result<JsValue, JsValue> {
    let trip: Trip = from_js(trip)?;
    to_js(&TripSummary::from_trip(&trip))
}

// ============================================================================
// NAVEGACIÓN Y SESIÓN
// ============================================================================

/// Vista actual (hash)
#[wasm_bindgen]
pub fn current_view() -> String {
    app_state().get_view().hash()
}

/// Navega al hash pedido aplicando la guarda de sesión; devuelve el hash final
#[wasm_bindgen]
pub fn navigate(hash: &str) -> String {
    let requested = ViewId::from_hash(hash).unwrap_or(ViewId::Home);
    app_state().navigate(requested).hash()
}

#[wasm_bindgen]
pub fn select_role(role: &str) -> String {
    let state = app_state();
    let view = SessionViewModel::from_state(&state).select_role(Role::normalize(role));
    state.navigate(view).hash()
}

#[wasm_bindgen]
pub fn logout() -> String {
    let state = app_state();
    let view = SessionViewModel::from_state(&state).logout();
    state.navigate(view).hash()
}

/// Mensaje de error en línea de la vista actual
#[wasm_bindgen]
pub fn error_message() -> Option<String> {
    app_state().get_error()
}

#[wasm_bindgen]
pub fn success_message() -> Option<String> {
    app_state().get_success()
}

// ============================================================================
// SESIÓN (async)
// ============================================================================
// Cada flujo resuelve con el hash destino (o el mensaje de éxito / los datos)
// y rechaza con el mensaje a mostrar en línea.

/// Login desde el formulario; resuelve con el hash del dashboard o rechaza
/// con el mensaje a mostrar
#[wasm_bindgen]
pub async fn login(email: String, password: String, remember_me: bool) -> Result<String, JsValue> {
    let state = app_state();
    let form = LoginForm { email, password, remember_me };
    let view_model = SessionViewModel::from_state(&state);

    match view_model.login(&form, &state.login_submit).await {
        Ok(view) => Ok(state.navigate(view).hash()),
        Err(err) => Err(fail(&state, "AUTH", err)),
    }
}

#[wasm_bindgen]
pub async fn register(
    first_name: String,
    last_name: String,
    university_id: String,
    email: String,
    phone: String,
    password: String,
) -> Result<String, JsValue> {
    let state = app_state();
    let form = RegisterForm { first_name, last_name, university_id, email, phone, password };

    match SessionViewModel::from_state(&state).register(&form, &state.register_submit).await {
        Ok(view) => Ok(state.navigate(view).hash()),
        Err(err) => Err(fail(&state, "AUTH", err)),
    }
}

/// "Quiero ser conductor"
#[wasm_bindgen]
pub async fn become_driver() -> Result<String, JsValue> {
    let state = app_state();
    match SessionViewModel::from_state(&state).become_driver().await {
        Ok(view) => Ok(state.navigate(view).hash()),
        Err(err) => Err(fail(&state, "AUTH", err)),
    }
}

#[wasm_bindgen]
pub async fn check_driver_status() -> Result<JsValue, JsValue> {
    let state = app_state();
    match SessionViewModel::from_state(&state).check_driver_status().await {
        Ok(status) => to_js(&status),
        Err(err) => Err(fail(&state, "AUTH", err)),
    }
}

// ============================================================================
// VIAJES
// ============================================================================

/// Búsqueda del pasajero; sin `status` se buscan viajes activos
#[wasm_bindgen]
pub async fn search_trips(origin: String, seats: String, status: Option<String>) -> Result<JsValue, JsValue> {
    let state = app_state();
    let filters = TripFilters {
        origen: origin,
        cupos: seats,
        estado: status.unwrap_or_else(|| TripFilters::default().estado),
    };
    match TripViewModel::from_state(&state).search(&filters).await {
        Ok(trips) => to_js(&trips),
        Err(err) => Err(fail(&state, "TRIPS", err)),
    }
}

#[wasm_bindgen]
pub async fn my_trips() -> Result<JsValue, JsValue> {
    let state = app_state();
    match TripViewModel::from_state(&state).my_trips().await {
        Ok(trips) => to_js(&trips),
        Err(err) => Err(fail(&state, "TRIPS", err)),
    }
}

/// "Publicar viaje"; `route_points` son los campos del editor de puntos
#[wasm_bindgen]
pub async fn create_trip(
    origin: String,
    destination: String,
    departure_time: String,
    seats: String,
    fare: String,
    route_points: JsValue,
) -> Result<String, JsValue> {
    let state = app_state();
    let form = TripForm {
        origin,
        destination,
        departure_time,
        seats,
        fare,
        route: RoutePointEditor::from_points(strings_from_js(&route_points)),
    };
    match TripViewModel::from_state(&state).create(&form, &state.trip_submit).await {
        Ok(_) => {
            succeed(&state, MSG_TRIP_CREATED);
            Ok(MSG_TRIP_CREATED.to_string())
        }
        Err(err) => Err(fail(&state, "TRIPS", err)),
    }
}

// ============================================================================
// RESERVAS
// ============================================================================

#[derive(Serialize)]
struct SlotView {
    seat: usize,
    waypoint: Option<String>,
}

/// Intento de reserva sobre un viaje (modal "Seleccionar Viaje").
/// La vista pinta a partir de este objeto y nunca valida por su cuenta.
#[wasm_bindgen(js_name = BookingAttempt)]
pub struct BookingAttemptHandle {
    attempt: Rc<RefCell<BookingAttempt>>,
}

#[wasm_bindgen(js_class = BookingAttempt)]
impl BookingAttemptHandle {
    /// Rechaza viajes llenos
    #[wasm_bindgen(constructor)]
    pub fn new(trip: JsValue) -> Result<BookingAttemptHandle, JsValue> {
        let trip: Trip = from_js(trip)?;
        let attempt = BookingAttempt::open(&trip).map_err(|err| to_js_error(err.user_message()))?;
        Ok(Self { attempt: Rc::new(RefCell::new(attempt)) })
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.attempt.borrow().phase().as_str().to_string()
    }

    /// Habilita el botón "Confirmar reserva"
    pub fn is_complete(&self) -> bool {
        self.attempt.borrow().phase() == BookingPhase::AllSlotsAssigned
    }

    pub fn seat_options(&self) -> Vec<u32> {
        self.attempt.borrow().seat_options()
    }

    pub fn pickup_points(&self) -> js_sys::Array {
        self.attempt
            .borrow()
            .pickup_points()
            .iter()
            .map(|point| JsValue::from_str(point))
            .collect()
    }

    /// `undefined` vuelve al estado sin cantidad elegida
    pub fn choose_seat_count(&self, count: Option<u32>) -> Result<(), JsValue> {
        self.attempt
            .borrow_mut()
            .choose_seat_count(count)
            .map_err(|err| to_js_error(err.to_string()))
    }

    pub fn assign_pickup(&self, seat_index: usize, choice_index: usize) -> Result<(), JsValue> {
        self.attempt
            .borrow_mut()
            .assign_pickup(seat_index, choice_index)
            .map_err(|err| to_js_error(err.to_string()))
    }

    pub fn clear_pickup(&self, seat_index: usize) -> Result<(), JsValue> {
        self.attempt
            .borrow_mut()
            .clear_pickup(seat_index)
            .map_err(|err| to_js_error(err.to_string()))
    }

    /// `[{seat, waypoint}]` con el número de cupo 1-indexado
    pub fn slots(&self) -> Result<JsValue, JsValue> {
        let slots: Vec<SlotView> = self
            .attempt
            .borrow()
            .slots()
            .iter()
            .map(|slot| SlotView { seat: slot.seat_number(), waypoint: slot.waypoint.clone() })
            .collect();
        to_js(&slots)
    }

    pub fn total_price(&self) -> f64 {
        self.attempt.borrow().total_price()
    }

    pub fn total_label(&self) -> String {
        utils::price_label(self.total_price())
    }

    /// Envía la reserva; resuelve con el mensaje de éxito
    pub fn submit(&self) -> js_sys::Promise {
        let cell = Rc::clone(&self.attempt);
        wasm_bindgen_futures::future_to_promise(async move {
            let state = app_state();
            // Copia: el RefCell no queda prestado durante la petición
            let mut attempt = cell.borrow().clone();
            let view_model = BookingViewModel::from_state(&state);
            match view_model.submit(&mut attempt, &state.booking_submit).await {
                Ok(()) => {
                    *cell.borrow_mut() = attempt;
                    Ok(succeed(&state, MSG_BOOKING_CREATED))
                }
                Err(err) => Err(fail(&state, "BOOKING", err)),
            }
        })
    }
}

#[wasm_bindgen]
pub async fn my_bookings() -> Result<JsValue, JsValue> {
    let state = app_state();
    match BookingViewModel::from_state(&state).my_bookings().await {
        Ok(bookings) => to_js(&bookings),
        Err(err) => Err(fail(&state, "BOOKING", err)),
    }
}

#[wasm_bindgen]
pub async fn trip_bookings(trip_id: String) -> Result<JsValue, JsValue> {
    let state = app_state();
    match BookingViewModel::from_state(&state).bookings_for_trip(&trip_id).await {
        Ok(bookings) => to_js(&bookings),
        Err(err) => Err(fail(&state, "BOOKING", err)),
    }
}

#[wasm_bindgen]
pub async fn cancel_booking(booking: JsValue) -> Result<String, JsValue> {
    let state = app_state();
    let booking: Booking = from_js(booking)?;
    match BookingViewModel::from_state(&state).cancel(&booking).await {
        Ok(()) => {
            succeed(&state, MSG_BOOKING_CANCELLED);
            Ok(MSG_BOOKING_CANCELLED.to_string())
        }
        Err(err) => Err(fail(&state, "BOOKING", err)),
    }
}

#[wasm_bindgen]
pub async fn confirm_booking(booking: JsValue) -> Result<String, JsValue> {
    let state = app_state();
    let booking: Booking = from_js(booking)?;
    match BookingViewModel::from_state(&state).confirm(&booking).await {
        Ok(()) => {
            succeed(&state, MSG_BOOKING_CONFIRMED);
            Ok(MSG_BOOKING_CONFIRMED.to_string())
        }
        Err(err) => Err(fail(&state, "BOOKING", err)),
    }
}

// ============================================================================
// PERFIL Y VEHÍCULO
// ============================================================================

/// `{user, vehicle}` para la vista de perfil
#[wasm_bindgen]
pub async fn load_profile() -> Result<JsValue, JsValue> {
    let state = app_state();
    match ProfileViewModel::from_state(&state).load().await {
        Ok(profile) => to_js(&profile),
        Err(err) => Err(fail(&state, "PROFILE", err)),
    }
}

#[wasm_bindgen]
pub async fn save_profile(
    first_name: String,
    last_name: String,
    phone: String,
    current_password: String,
    new_password: String,
    confirm_password: String,
) -> Result<String, JsValue> {
    let state = app_state();
    let form = ProfileForm { first_name, last_name, phone, current_password, new_password, confirm_password };
    match ProfileViewModel::from_state(&state).save(&form, &state.profile_submit).await {
        Ok(view) => {
            let hash = state.navigate(view).hash();
            succeed(&state, viewmodels::profile_viewmodel::PROFILE_UPDATED_MESSAGE);
            Ok(hash)
        }
        Err(err) => Err(fail(&state, "PROFILE", err)),
    }
}

#[wasm_bindgen]
pub async fn register_vehicle(
    license_plate: String,
    make: String,
    model: String,
    capacity: Option<u32>,
    vehicle_photo: Option<web_sys::File>,
    soat_photo: Option<web_sys::File>,
) -> Result<String, JsValue> {
    let state = app_state();
    let form = VehicleForm { license_plate, make, model, capacity };
    let photos = VehiclePhotos { vehicle: vehicle_photo, soat: soat_photo };
    match VehicleViewModel::from_state(&state).register(&form, &photos, &state.vehicle_submit).await {
        Ok(view) => Ok(state.navigate(view).hash()),
        Err(err) => Err(fail(&state, "VEHICLE", err)),
    }
}
