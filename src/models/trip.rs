use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const TRIP_STATUS_ACTIVE: &str = "activo";
pub const TRIP_STATUS_FULL: &str = "lleno";

/// Puntos intermedios (`ruta`) tal como llegan del backend: ausentes,
/// lista o string separado por comas
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Waypoints {
    #[default]
    Absent,
    List(Vec<String>),
    Text(String),
}

impl Waypoints {
    /// Normaliza cualquier valor JSON. De un array solo se conservan los
    /// strings; cualquier otra forma cuenta como ruta ausente.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Waypoints::Absent,
            Value::String(text) => Waypoints::Text(text),
            Value::Array(items) => Waypoints::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(point) => Some(point),
                        _ => None,
                    })
                    .collect(),
            ),
            other => {
                log::warn!("⚠️ [ROUTE] ruta con formato desconocido: {}", other);
                Waypoints::Absent
            }
        }
    }
}

// Una `ruta` malformada no debe invalidar el viaje ni la lista que lo contiene
impl<'de> Deserialize<'de> for Waypoints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Waypoints::from_value)
    }
}

impl From<Vec<String>> for Waypoints {
    fn from(points: Vec<String>) -> Self {
        Waypoints::List(points)
    }
}

impl From<&str> for Waypoints {
    fn from(text: &str) -> Self {
        Waypoints::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DriverSummary {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VehicleSummary {
    #[serde(default)]
    pub marca: String,
    #[serde(default)]
    pub modelo: String,
    #[serde(default)]
    pub placa: String,
}

/// Viaje publicado por un conductor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub origen: String,
    #[serde(default)]
    pub destino: String,
    #[serde(default)]
    pub ruta: Waypoints,
    /// Hora de salida, texto libre del formulario del conductor
    #[serde(default)]
    pub hora: String,
    #[serde(rename = "asientosDisponibles", default)]
    pub asientos_disponibles: u32,
    #[serde(rename = "asientosTotales", default, skip_serializing_if = "Option::is_none")]
    pub asientos_totales: Option<u32>,
    /// Tarifa por cupo
    #[serde(default)]
    pub precio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conductor: Option<DriverSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehiculo: Option<VehicleSummary>,
}

impl Trip {
    /// Viaje lleno: no se puede seleccionar
    pub fn is_blocked(&self) -> bool {
        self.asientos_disponibles == 0 || self.estado.as_deref() == Some(TRIP_STATUS_FULL)
    }

    pub fn status_label(&self) -> String {
        self.estado
            .as_deref()
            .unwrap_or(TRIP_STATUS_ACTIVE)
            .to_uppercase()
    }
}

/// `data` de `/trips` y `/trips/my-trips`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TripsPayload {
    #[serde(default)]
    pub trips: Vec<Trip>,
}

/// Cuerpo de `POST /trips`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrip {
    pub origen: String,
    pub destino: String,
    /// Solo puntos intermedios, unidos con `", "`
    pub ruta: String,
    pub hora: String,
    #[serde(rename = "asientosDisponibles")]
    pub asientos_disponibles: u32,
    #[serde(rename = "asientosTotales")]
    pub asientos_totales: u32,
    pub precio: f64,
    pub estado: String,
}

/// Filtros de búsqueda del pasajero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripFilters {
    #[serde(default)]
    pub origen: String,
    #[serde(default)]
    pub cupos: String,
    #[serde(default)]
    pub estado: String,
}

impl Default for TripFilters {
    fn default() -> Self {
        Self {
            origen: String::new(),
            cupos: String::new(),
            estado: TRIP_STATUS_ACTIVE.to_string(),
        }
    }
}

impl TripFilters {
    /// Parámetros de query; los filtros vacíos se omiten
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("origen", self.origen.trim()),
            ("cupos", self.cupos.trim()),
            ("estado", self.estado.trim()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, value.to_string()))
        .collect()
    }
}
