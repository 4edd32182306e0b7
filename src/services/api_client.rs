// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP y decodifica el sobre
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

use crate::config::CONFIG;
use crate::error::ClientError;
use crate::models::{
    ApiEnvelope, AuthPayload, Booking, BookingsPayload, DriverStatus, JoinTripRequest, LoginRequest,
    NewTrip, PasswordChange, ProfileUpdate, RegisterRequest, Trip, TripFilters, TripsPayload, User,
    UserPayload, Vehicle, VehicleForm, VehiclePayload,
};
use crate::services::envelope::{decode_envelope, into_data};

/// Fotos opcionales del registro de vehículo
#[derive(Default)]
pub struct VehiclePhotos {
    pub vehicle: Option<File>,
    pub soat: Option<File>,
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.api_base_url.clone(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.header("Authorization", &format!("Bearer {}", token))
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<ApiEnvelope<T>, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        decode_envelope(status, &body)
    }

    async fn send<T: DeserializeOwned>(request: Request) -> Result<ApiEnvelope<T>, ClientError> {
        let response = request.send().await?;
        Self::read(response).await
    }

    // ========================================================================
    // AUTH
    // ========================================================================

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ClientError> {
        log::info!("🔐 [AUTH] Login: {}", request.correo);
        let request = Request::post(&self.url("/auth/login")).json(request)?;
        into_data(Self::send(request).await?)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ClientError> {
        log::info!("📝 [AUTH] Registro: {}", request.correo);
        let request = Request::post(&self.url("/auth/register")).json(request)?;
        into_data(Self::send(request).await?)
    }

    pub async fn me(&self, token: &str) -> Result<User, ClientError> {
        let request = Self::authorized(Request::get(&self.url("/auth/me")), token).build()?;
        let payload: UserPayload = into_data(Self::send(request).await?)?;
        Ok(payload.user)
    }

    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<(), ClientError> {
        let request = Self::authorized(Request::put(&self.url("/auth/profile")), token).json(update)?;
        Self::send::<serde_json::Value>(request).await?;
        log::info!("✅ [PROFILE] Perfil actualizado");
        Ok(())
    }

    pub async fn change_password(&self, token: &str, change: &PasswordChange) -> Result<(), ClientError> {
        let request =
            Self::authorized(Request::put(&self.url("/auth/change-password")), token).json(change)?;
        Self::send::<serde_json::Value>(request).await?;
        log::info!("✅ [PROFILE] Contraseña actualizada");
        Ok(())
    }

    pub async fn check_driver_status(&self, token: &str) -> Result<DriverStatus, ClientError> {
        let request =
            Self::authorized(Request::get(&self.url("/auth/check-driver-status")), token).build()?;
        let status: Option<DriverStatus> = Self::send(request).await?.data;
        Ok(status.unwrap_or_default())
    }

    // ========================================================================
    // TRIPS
    // ========================================================================

    pub async fn search_trips(&self, token: &str, filters: &TripFilters) -> Result<Vec<Trip>, ClientError> {
        let pairs = filters.query_pairs();
        log::info!("🔍 [TRIPS] Buscando viajes ({} filtros)", pairs.len());
        let request = Self::authorized(Request::get(&self.url("/trips")), token)
            .query(pairs.iter().map(|(key, value)| (*key, value.as_str())))
            .build()?;
        let payload: Option<TripsPayload> = Self::send(request).await?.data;
        Ok(payload.unwrap_or_default().trips)
    }

    pub async fn create_trip(&self, token: &str, trip: &NewTrip) -> Result<(), ClientError> {
        log::info!("🚗 [TRIPS] Publicando viaje {} → {}", trip.origen, trip.destino);
        let request = Self::authorized(Request::post(&self.url("/trips")), token).json(trip)?;
        Self::send::<serde_json::Value>(request).await?;
        Ok(())
    }

    pub async fn my_trips(&self, token: &str) -> Result<Vec<Trip>, ClientError> {
        let request = Self::authorized(Request::get(&self.url("/trips/my-trips")), token).build()?;
        let payload: Option<TripsPayload> = Self::send(request).await?.data;
        Ok(payload.unwrap_or_default().trips)
    }

    pub async fn join_trip(&self, token: &str, trip_id: &str, join: &JoinTripRequest) -> Result<(), ClientError> {
        log::info!("🎫 [BOOKING] Reservando {} cupos en {}", join.num_cupos, trip_id);
        let path = format!("/trips/{}/join", trip_id);
        let request = Self::authorized(Request::post(&self.url(&path)), token).json(join)?;
        Self::send::<serde_json::Value>(request).await?;
        Ok(())
    }

    // ========================================================================
    // BOOKINGS
    // ========================================================================

    pub async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>, ClientError> {
        let request =
            Self::authorized(Request::get(&self.url("/bookings/my-bookings")), token).build()?;
        let payload: Option<BookingsPayload> = Self::send(request).await?.data;
        Ok(payload.unwrap_or_default().bookings)
    }

    pub async fn trip_bookings(&self, token: &str, trip_id: &str) -> Result<Vec<Booking>, ClientError> {
        let path = format!("/bookings/trip/{}", trip_id);
        let request = Self::authorized(Request::get(&self.url(&path)), token).build()?;
        let payload: Option<BookingsPayload> = Self::send(request).await?.data;
        Ok(payload.unwrap_or_default().bookings)
    }

    pub async fn confirm_booking(&self, token: &str, booking_id: &str) -> Result<(), ClientError> {
        self.update_booking(token, booking_id, "confirm").await
    }

    pub async fn cancel_booking(&self, token: &str, booking_id: &str) -> Result<(), ClientError> {
        self.update_booking(token, booking_id, "cancel").await
    }

    async fn update_booking(&self, token: &str, booking_id: &str, action: &str) -> Result<(), ClientError> {
        log::info!("🎫 [BOOKING] {} {}", action, booking_id);
        let path = format!("/bookings/{}/{}", booking_id, action);
        let request = Self::authorized(Request::put(&self.url(&path)), token).build()?;
        Self::send::<serde_json::Value>(request).await?;
        Ok(())
    }

    // ========================================================================
    // VEHICLES
    // ========================================================================

    /// `POST /vehicles` multipart; el formulario ya viene validado
    pub async fn register_vehicle(
        &self,
        token: &str,
        form: &VehicleForm,
        photos: &VehiclePhotos,
    ) -> Result<(), ClientError> {
        let capacity = form.capacity.unwrap_or_default().to_string();
        let data = FormData::new().map_err(js_error)?;
        data.append_with_str("placa", &form.license_plate).map_err(js_error)?;
        data.append_with_str("marca", &form.make).map_err(js_error)?;
        data.append_with_str("modelo", &form.model).map_err(js_error)?;
        data.append_with_str("capacidad", &capacity).map_err(js_error)?;
        if let Some(photo) = &photos.vehicle {
            data.append_with_blob("fotoVehiculo", photo).map_err(js_error)?;
        }
        if let Some(photo) = &photos.soat {
            data.append_with_blob("fotoSOAT", photo).map_err(js_error)?;
        }

        log::info!("🚙 [VEHICLE] Registrando vehículo {}", form.license_plate);
        let request = Self::authorized(Request::post(&self.url("/vehicles")), token).body(data)?;
        Self::send::<serde_json::Value>(request).await?;
        Ok(())
    }

    /// Vehículo del usuario, `None` si no tiene
    pub async fn my_vehicle(&self, token: &str) -> Result<Option<Vehicle>, ClientError> {
        let request =
            Self::authorized(Request::get(&self.url("/vehicles/my-vehicle")), token).build()?;
        let payload: Option<VehiclePayload> = Self::send(request).await?.data;
        Ok(payload.and_then(|payload| payload.vehiculo))
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> ClientError {
    ClientError::Network(format!("{:?}", err))
}
