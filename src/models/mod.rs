pub mod role;
pub mod session;
pub mod auth;
pub mod trip;
pub mod booking;
pub mod vehicle;
pub mod view;
pub mod envelope;

pub use role::Role;
pub use session::{Session, DEFAULT_DISPLAY_NAME};
pub use auth::{
    AuthPayload, DriverStatus, LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest, User,
    UserPayload,
};
pub use trip::{
    DriverSummary, NewTrip, Trip, TripFilters, TripsPayload, VehicleSummary, Waypoints,
    TRIP_STATUS_ACTIVE, TRIP_STATUS_FULL,
};
pub use booking::{
    Booking, BookingStatus, BookingsPayload, JoinTripRequest, PassengerSummary, PickupPointRequest,
    PickupSlot,
};
pub use vehicle::{Vehicle, VehicleForm, VehiclePayload};
pub use view::ViewId;
pub use envelope::{ApiEnvelope, FieldError};
