// ============================================================================
// BOOKING VIEWMODEL - reserva de cupos y gestión de reservas
// ============================================================================
// Lógica de negocio de reservas. Devuelve valores, la vista actualiza el DOM.
// ============================================================================

use std::rc::Rc;
use crate::config::CONFIG;
use crate::error::{AllocationError, ClientError};
use crate::models::{Booking, JoinTripRequest, PickupPointRequest, PickupSlot, Trip};
use crate::services::ApiClient;
use crate::state::{AppState, SubmitState};
use crate::stores::SessionStore;
use crate::viewmodels::route_formatter::intermediate_only;
use crate::viewmodels::seat_allocator;

pub const MSG_BOOKING_CREATED: &str = "¡Reserva realizada exitosamente!";
pub const MSG_BOOKING_CANCELLED: &str = "Reserva cancelada exitosamente";
pub const MSG_BOOKING_CONFIRMED: &str = "Reserva confirmada exitosamente";
pub const MSG_TRIP_FULL: &str = "Este viaje está lleno";

/// Fase de un intento de reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPhase {
    NoSeatCountChosen,
    SeatCountChosen,
    SlotsPartiallyAssigned,
    AllSlotsAssigned,
    Submitted,
}

impl BookingPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingPhase::NoSeatCountChosen => "no_seat_count",
            BookingPhase::SeatCountChosen => "seat_count_chosen",
            BookingPhase::SlotsPartiallyAssigned => "partially_assigned",
            BookingPhase::AllSlotsAssigned => "all_assigned",
            BookingPhase::Submitted => "submitted",
        }
    }
}

/// Un intento de reserva sobre un viaje (el modal "Seleccionar Viaje")
#[derive(Debug, Clone, PartialEq)]
pub struct BookingAttempt {
    trip_id: String,
    fare: f64,
    seats_available: u32,
    max_per_booking: u32,
    pickup_points: Vec<String>,
    seat_count: Option<u32>,
    slots: Vec<PickupSlot>,
    submitted: bool,
}

impl BookingAttempt {
    pub fn new(trip: &Trip) -> Self {
        Self::with_limit(trip, CONFIG.booking_config.max_seats_per_booking)
    }

    /// Abre el intento solo si el viaje se puede seleccionar
    pub fn open(trip: &Trip) -> Result<Self, ClientError> {
        if trip.is_blocked() {
            return Err(ClientError::validation(MSG_TRIP_FULL));
        }
        Ok(Self::new(trip))
    }

    pub fn with_limit(trip: &Trip, max_per_booking: u32) -> Self {
        Self {
            trip_id: trip.id.clone(),
            fare: trip.precio,
            seats_available: trip.asientos_disponibles,
            max_per_booking,
            pickup_points: intermediate_only(&trip.ruta),
            seat_count: None,
            slots: Vec::new(),
            submitted: false,
        }
    }

    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    /// Puntos intermedios del viaje, en orden
    pub fn pickup_points(&self) -> &[String] {
        &self.pickup_points
    }

    pub fn slots(&self) -> &[PickupSlot] {
        &self.slots
    }

    pub fn seat_count(&self) -> Option<u32> {
        self.seat_count
    }

    pub fn phase(&self) -> BookingPhase {
        if self.submitted {
            return BookingPhase::Submitted;
        }
        if self.seat_count.is_none() {
            return BookingPhase::NoSeatCountChosen;
        }
        match seat_allocator::assigned_count(&self.slots) {
            0 => BookingPhase::SeatCountChosen,
            n if n == self.slots.len() => BookingPhase::AllSlotsAssigned,
            _ => BookingPhase::SlotsPartiallyAssigned,
        }
    }

    /// Opciones del selector de cupos: `1..=min(disponibles, máximo)`
    pub fn seat_options(&self) -> Vec<u32> {
        (1..=self.seats_available.min(self.max_per_booking)).collect()
    }

    /// Cambiar la cantidad descarta todas las asignaciones previas
    pub fn choose_seat_count(&mut self, count: Option<u32>) -> Result<(), AllocationError> {
        if self.submitted {
            return Err(AllocationError::AlreadySubmitted);
        }
        let Some(count) = count else {
            self.seat_count = None;
            self.slots.clear();
            return Ok(());
        };

        let max = self.seats_available.min(self.max_per_booking);
        if count == 0 || count > max {
            return Err(AllocationError::SeatCountOutOfRange { requested: count, max });
        }

        self.slots = seat_allocator::allocate(count, &self.pickup_points)?;
        self.seat_count = Some(count);
        Ok(())
    }

    pub fn assign_pickup(&mut self, seat_index: usize, choice_index: usize) -> Result<(), AllocationError> {
        if self.submitted {
            return Err(AllocationError::AlreadySubmitted);
        }
        seat_allocator::assign(&mut self.slots, seat_index, choice_index, &self.pickup_points)
    }

    pub fn clear_pickup(&mut self, seat_index: usize) -> Result<(), AllocationError> {
        if self.submitted {
            return Err(AllocationError::AlreadySubmitted);
        }
        seat_allocator::unassign(&mut self.slots, seat_index)
    }

    /// Tarifa × cupos; 0 mientras no haya cantidad elegida
    pub fn total_price(&self) -> f64 {
        self.seat_count.map_or(0.0, |count| self.fare * f64::from(count))
    }

    /// Cuerpo de `POST /trips/{id}/join`. Solo con todos los cupos asignados.
    pub fn to_request(&self) -> Result<JoinTripRequest, AllocationError> {
        match self.phase() {
            BookingPhase::Submitted => Err(AllocationError::AlreadySubmitted),
            BookingPhase::NoSeatCountChosen => Err(AllocationError::NoSeatCount),
            BookingPhase::SeatCountChosen | BookingPhase::SlotsPartiallyAssigned => {
                Err(AllocationError::Incomplete)
            }
            BookingPhase::AllSlotsAssigned => Ok(JoinTripRequest {
                num_cupos: self.seat_count.unwrap_or_default(),
                pickup_points: self
                    .slots
                    .iter()
                    .filter_map(|slot| slot.waypoint.clone())
                    .map(|punto_nombre| PickupPointRequest { punto_nombre })
                    .collect(),
            }),
        }
    }

    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }
}

/// ViewModel de reservas - SOLO lógica de negocio
pub struct BookingViewModel {
    api: ApiClient,
    store: Rc<SessionStore>,
}

impl BookingViewModel {
    pub fn new(api: ApiClient, store: Rc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(state.api.clone(), Rc::clone(&state.store))
    }

    /// Envía la reserva. El control queda deshabilitado hasta que termine.
    pub async fn submit(&self, attempt: &mut BookingAttempt, control: &SubmitState) -> Result<(), ClientError> {
        let request = attempt.to_request()?;
        let _guard = control.begin()?;
        let session = self.store.require()?;

        self.api.join_trip(&session.token, attempt.trip_id(), &request).await?;
        attempt.mark_submitted();
        log::info!("✅ [BOOKING] Reserva creada: {} cupos", request.num_cupos);
        Ok(())
    }

    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ClientError> {
        let session = self.store.require()?;
        let bookings = self.api.my_bookings(&session.token).await?;
        log::info!("📋 [BOOKING] {} reservas", bookings.len());
        Ok(bookings)
    }

    /// Cancelar (pasajero): solo reservas pendientes o confirmadas
    pub async fn cancel(&self, booking: &Booking) -> Result<(), ClientError> {
        if !booking.can_cancel() {
            return Err(ClientError::validation("Esta reserva ya no se puede cancelar"));
        }
        let session = self.store.require()?;
        self.api.cancel_booking(&session.token, &booking.id).await
    }

    /// Reservas de un viaje propio (conductor)
    pub async fn bookings_for_trip(&self, trip_id: &str) -> Result<Vec<Booking>, ClientError> {
        let session = self.store.require()?;
        self.api.trip_bookings(&session.token, trip_id).await
    }

    /// Confirmar (conductor): solo reservas pendientes
    pub async fn confirm(&self, booking: &Booking) -> Result<(), ClientError> {
        if !booking.can_confirm() {
            return Err(ClientError::validation("Solo se pueden confirmar reservas pendientes"));
        }
        let session = self.store.require()?;
        self.api.confirm_booking(&session.token, &booking.id).await
    }
}
