pub mod role_router;
pub mod route_formatter;
pub mod seat_allocator;
pub mod booking_viewmodel;
pub mod session_viewmodel;
pub mod trip_viewmodel;
pub mod profile_viewmodel;
pub mod vehicle_viewmodel;

pub use role_router::RoleRouter;
pub use route_formatter::{intermediate_only, RouteSequence};
pub use booking_viewmodel::{
    BookingAttempt, BookingPhase, BookingViewModel, MSG_BOOKING_CANCELLED, MSG_BOOKING_CONFIRMED,
    MSG_BOOKING_CREATED, MSG_TRIP_FULL,
};
pub use session_viewmodel::{LoginForm, RegisterForm, SessionViewModel};
pub use trip_viewmodel::{RoutePointEditor, TripForm, TripSummary, TripViewModel, MSG_TRIP_CREATED};
pub use profile_viewmodel::{ProfileData, ProfileForm, ProfileViewModel};
pub use vehicle_viewmodel::{validate_vehicle, VehicleViewModel};
