// ============================================================================
// TRIP VIEWMODEL - búsqueda (pasajero) y publicación (conductor) de viajes
// ============================================================================

use std::rc::Rc;
use serde::Serialize;
use crate::config::{BookingConfig, CONFIG};
use crate::error::ClientError;
use crate::models::{NewTrip, Trip, TripFilters, TRIP_STATUS_ACTIVE};
use crate::services::ApiClient;
use crate::state::{AppState, SubmitState};
use crate::stores::SessionStore;
use crate::utils::format::{price_label, seats_label};
use crate::utils::validation;
use crate::viewmodels::route_formatter::RouteSequence;

const MSG_REQUIRED_FIELDS: &str = "Por favor completa todos los campos obligatorios";
const MSG_INVALID_FARE: &str = "El precio debe ser mayor a 0";
pub const MSG_TRIP_CREATED: &str = "¡Viaje creado exitosamente!";

/// Editor de puntos intermedios del formulario del conductor.
/// Siempre tiene al menos un campo.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePointEditor {
    points: Vec<String>,
}

impl Default for RoutePointEditor {
    fn default() -> Self {
        Self { points: vec![String::new()] }
    }
}

impl RoutePointEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor precargado; una lista vacía deja el campo en blanco inicial
    pub fn from_points(points: Vec<String>) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        Self { points }
    }

    pub fn points(&self) -> &[String] {
        &self.points
    }

    pub fn add(&mut self) {
        self.points.push(String::new());
    }

    /// Solo elimina mientras quede más de un campo
    pub fn remove(&mut self, index: usize) -> bool {
        if self.points.len() <= 1 || index >= self.points.len() {
            return false;
        }
        self.points.remove(index);
        true
    }

    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        if let Some(point) = self.points.get_mut(index) {
            *point = value.into();
        }
    }

    /// Puntos con contenido, recortados y unidos con `", "`
    pub fn to_ruta(&self) -> String {
        self.points
            .iter()
            .map(|point| point.trim())
            .filter(|point| !point.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Formulario "Publicar viaje". Asientos y precio llegan como texto del input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripForm {
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub seats: String,
    pub fare: String,
    pub route: RoutePointEditor,
}

impl TripForm {
    pub fn validate(&self, limits: &BookingConfig) -> Result<NewTrip, ClientError> {
        validation::require_filled(
            &[
                self.origin.as_str(),
                self.destination.as_str(),
                self.departure_time.as_str(),
                self.seats.as_str(),
                self.fare.as_str(),
            ],
            MSG_REQUIRED_FIELDS,
        )?;

        let seats_message = format!("La cantidad de asientos debe estar entre 1 y {}", limits.max_trip_seats);
        let seats: u32 = self
            .seats
            .trim()
            .parse()
            .map_err(|_| ClientError::validation(seats_message.as_str()))?;
        if !(1..=limits.max_trip_seats).contains(&seats) {
            return Err(ClientError::validation(seats_message));
        }

        let fare: f64 = self
            .fare
            .trim()
            .parse()
            .map_err(|_| ClientError::validation(MSG_INVALID_FARE))?;
        if !fare.is_finite() || fare <= 0.0 {
            return Err(ClientError::validation(MSG_INVALID_FARE));
        }

        Ok(NewTrip {
            origen: self.origin.trim().to_string(),
            destino: self.destination.trim().to_string(),
            ruta: self.route.to_ruta(),
            hora: self.departure_time.trim().to_string(),
            asientos_disponibles: seats,
            asientos_totales: seats,
            precio: fare,
            estado: TRIP_STATUS_ACTIVE.to_string(),
        })
    }
}

/// Datos listos para pintar la tarjeta de un viaje
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub id: String,
    pub route: String,
    pub route_detailed: String,
    pub departure: String,
    pub seats: String,
    pub price: String,
    pub status: String,
    pub blocked: bool,
    pub driver: Option<String>,
    pub vehicle: Option<String>,
}

impl TripSummary {
    pub fn from_trip(trip: &Trip) -> Self {
        let route = RouteSequence::format(&trip.origen, &trip.destino, &trip.ruta);
        Self {
            id: trip.id.clone(),
            route: route.summary(),
            route_detailed: route.detailed(),
            departure: trip.hora.clone(),
            seats: seats_label(trip.asientos_disponibles),
            price: price_label(trip.precio),
            status: trip.status_label(),
            blocked: trip.is_blocked(),
            driver: trip
                .conductor
                .as_ref()
                .map(|driver| format!("{} {}", driver.nombre, driver.apellido).trim().to_string()),
            vehicle: trip
                .vehiculo
                .as_ref()
                .map(|vehicle| format!("{} {} ({})", vehicle.marca, vehicle.modelo, vehicle.placa)),
        }
    }
}

/// ViewModel de viajes - SOLO lógica de negocio
pub struct TripViewModel {
    api: ApiClient,
    store: Rc<SessionStore>,
}

impl TripViewModel {
    pub fn new(api: ApiClient, store: Rc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.api.clone(), Rc::clone(&state.store))
    }

    pub async fn search(&self, filters: &TripFilters) -> Result<Vec<Trip>, ClientError> {
        let session = self.store.require()?;
        let trips = self.api.search_trips(&session.token, filters).await?;
        log::info!("🔍 [TRIPS] {} viajes encontrados", trips.len());
        Ok(trips)
    }

    /// Publica el viaje; el formulario se limpia solo si el backend lo acepta
    pub async fn create(&self, form: &TripForm, control: &SubmitState) -> Result<NewTrip, ClientError> {
        let trip = form.validate(&CONFIG.booking_config)?;
        let _guard = control.begin()?;
        let session = self.store.require()?;

        self.api.create_trip(&session.token, &trip).await?;
        log::info!("✅ [TRIPS] Viaje creado: {} → {}", trip.origen, trip.destino);
        Ok(trip)
    }

    pub async fn my_trips(&self) -> Result<Vec<Trip>, ClientError> {
        let session = self.store.require()?;
        self.api.my_trips(&session.token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriverSummary, Role, Session, Waypoints, TRIP_STATUS_FULL};
    use crate::state::MSG_BUSY;
    use futures::executor::block_on;

    fn form() -> TripForm {
        let mut route = RoutePointEditor::new();
        route.set(0, " Calle 80 ");
        route.add();
        route.add();
        route.set(2, "Portal Norte");
        TripForm {
            origin: "Chía".into(),
            destination: "Universidad de La Sabana".into(),
            departure_time: "07:30".into(),
            seats: "3".into(),
            fare: "8000".into(),
            route,
        }
    }

    #[test]
    fn editor_keeps_at_least_one_point() {
        let mut editor = RoutePointEditor::new();
        assert_eq!(editor.points().len(), 1);
        assert!(!editor.remove(0));

        editor.add();
        assert!(editor.remove(0));
        assert_eq!(editor.points().len(), 1);
        assert!(!editor.remove(5));
    }

    #[test]
    fn editor_from_page_points() {
        assert_eq!(RoutePointEditor::from_points(Vec::new()), RoutePointEditor::new());
        let editor = RoutePointEditor::from_points(vec!["Calle 80".into(), " ".into(), "Portal Norte".into()]);
        assert_eq!(editor.to_ruta(), "Calle 80, Portal Norte");
    }

    #[test]
    fn valid_form_builds_new_trip() {
        let trip = form().validate(&BookingConfig::default()).unwrap();
        assert_eq!(trip.ruta, "Calle 80, Portal Norte");
        assert_eq!(trip.asientos_disponibles, 3);
        assert_eq!(trip.asientos_totales, 3);
        assert_eq!(trip.precio, 8000.0);
        assert_eq!(trip.estado, "activo");
    }

    #[test]
    fn form_rules() {
        let limits = BookingConfig::default();

        let missing = TripForm { departure_time: " ".into(), ..form() };
        assert_eq!(missing.validate(&limits).unwrap_err().user_message(), MSG_REQUIRED_FIELDS);

        for seats in ["0", "6", "dos"] {
            let bad = TripForm { seats: seats.into(), ..form() };
            assert_eq!(
                bad.validate(&limits).unwrap_err().user_message(),
                "La cantidad de asientos debe estar entre 1 y 5"
            );
        }

        for fare in ["0", "-100", "gratis"] {
            let bad = TripForm { fare: fare.into(), ..form() };
            assert_eq!(bad.validate(&limits).unwrap_err().user_message(), MSG_INVALID_FARE);
        }
    }

    #[test]
    fn summary_for_trip_card() {
        let trip = Trip {
            id: "t1".into(),
            origen: "A".into(),
            destino: "D".into(),
            ruta: Waypoints::Text("B, C".into()),
            hora: "07:00".into(),
            asientos_disponibles: 0,
            asientos_totales: Some(4),
            precio: 15000.0,
            estado: Some(TRIP_STATUS_FULL.into()),
            conductor: Some(DriverSummary { nombre: "Juan".into(), apellido: "Rodriguez".into(), ..Default::default() }),
            vehiculo: None,
        };
        let summary = TripSummary::from_trip(&trip);
        assert_eq!(summary.route, "A → B → C → D");
        assert_eq!(summary.price, "$15.000");
        assert_eq!(summary.status, "LLENO");
        assert_eq!(summary.seats, "0 cupos");
        assert!(summary.blocked);
        assert_eq!(summary.driver.as_deref(), Some("Juan Rodriguez"));
    }

    #[test]
    fn create_stops_before_the_request() {
        let store = SessionStore::in_memory();
        store.persist(&Session::new("tok", Role::Driver, "Juan"));
        let vm = TripViewModel::new(ApiClient::with_base_url("http://127.0.0.1:0"), Rc::new(store));
        let control = SubmitState::new();

        let bad = TripForm { fare: "0".into(), ..form() };
        assert_eq!(block_on(vm.create(&bad, &control)).unwrap_err().user_message(), MSG_INVALID_FARE);
        assert!(!control.is_in_flight());

        let _pending = control.begin().unwrap();
        assert_eq!(block_on(vm.create(&form(), &control)).unwrap_err().user_message(), MSG_BUSY);
    }

    #[test]
    fn listing_trips_requires_a_session() {
        let vm = TripViewModel::new(ApiClient::with_base_url("http://127.0.0.1:0"), Rc::new(SessionStore::in_memory()));
        assert!(block_on(vm.my_trips()).unwrap_err().requires_login());
        assert!(block_on(vm.search(&TripFilters::default())).unwrap_err().requires_login());
    }
}
