use serde::{Deserialize, Serialize};
use crate::models::Trip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pendiente,
    Confirmada,
    Cancelada,
    #[serde(other)]
    Desconocido,
}

impl BookingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pendiente => "PENDIENTE",
            BookingStatus::Confirmada => "CONFIRMADA",
            BookingStatus::Cancelada => "CANCELADA",
            BookingStatus::Desconocido => "DESCONOCIDO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PassengerSummary {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
}

/// Reserva, vista por el pasajero (`viaje`) o por el conductor (`pasajero`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub estado: BookingStatus,
    #[serde(rename = "cuposReservados", default)]
    pub cupos_reservados: u32,
    #[serde(rename = "puntoRecogida", default, skip_serializing_if = "Option::is_none")]
    pub punto_recogida: Option<String>,
    #[serde(rename = "precioTotal", default)]
    pub precio_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viaje: Option<Trip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pasajero: Option<PassengerSummary>,
}

impl Booking {
    /// El pasajero puede cancelar reservas pendientes o confirmadas
    pub fn can_cancel(&self) -> bool {
        matches!(self.estado, BookingStatus::Pendiente | BookingStatus::Confirmada)
    }

    /// El conductor solo confirma reservas pendientes
    pub fn can_confirm(&self) -> bool {
        self.estado == BookingStatus::Pendiente
    }
}

/// `data` de `/bookings/my-bookings` y `/bookings/trip/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BookingsPayload {
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

/// Un punto de recogida por cupo. `waypoint == None` significa sin asignar:
/// el índice 0 es una elección válida y no se confunde con "vacío".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupSlot {
    pub seat_index: usize,
    pub waypoint: Option<String>,
}

impl PickupSlot {
    pub fn unassigned(seat_index: usize) -> Self {
        Self { seat_index, waypoint: None }
    }

    pub fn is_assigned(&self) -> bool {
        self.waypoint.as_deref().is_some_and(|label| !label.is_empty())
    }

    /// Número de cupo mostrado al usuario (1-indexado)
    pub fn seat_number(&self) -> usize {
        self.seat_index + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupPointRequest {
    #[serde(rename = "puntoNombre")]
    pub punto_nombre: String,
}

/// Cuerpo de `POST /trips/{id}/join`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinTripRequest {
    #[serde(rename = "numCupos")]
    pub num_cupos: u32,
    #[serde(rename = "pickupPoints")]
    pub pickup_points: Vec<PickupPointRequest>,
}
