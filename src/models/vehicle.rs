use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    #[serde(default)]
    pub capacidad: u32,
    #[serde(rename = "fotoVehiculo", default, skip_serializing_if = "Option::is_none")]
    pub foto_vehiculo: Option<String>,
    #[serde(rename = "fotoSOAT", default, skip_serializing_if = "Option::is_none")]
    pub foto_soat: Option<String>,
}

/// `data` de `/vehicles/my-vehicle` (el backend usa `vehiculo`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VehiclePayload {
    #[serde(default)]
    pub vehiculo: Option<Vehicle>,
}

/// Campos de texto del formulario de registro de vehículo.
/// Las fotos viajan aparte como `web_sys::File`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VehicleForm {
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub capacity: Option<u32>,
}

impl VehicleForm {
    /// Placa en mayúsculas y campos recortados, como se envían al backend
    pub fn normalized(&self) -> Self {
        Self {
            license_plate: self.license_plate.trim().to_uppercase(),
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            capacity: self.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn my_vehicle_without_vehicle() {
        let payload: VehiclePayload = serde_json::from_str(r#"{"vehiculo": null}"#).unwrap();
        assert!(payload.vehiculo.is_none());
    }

    #[test]
    fn normalized_form_uppercases_plate() {
        let form = VehicleForm {
            license_plate: " abc123 ".into(),
            make: " Mazda ".into(),
            model: "3".into(),
            capacity: Some(4),
        };
        let normalized = form.normalized();
        assert_eq!(normalized.license_plate, "ABC123");
        assert_eq!(normalized.make, "Mazda");
    }
}
