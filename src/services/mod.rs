pub mod envelope;
pub mod api_client;

pub use api_client::{ApiClient, VehiclePhotos};
pub use envelope::{decode_envelope, into_data};
