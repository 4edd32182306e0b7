// ============================================================================
// ROUTE FORMATTER - origen, puntos intermedios, destino
// ============================================================================
// Resumen con flechas y lista numerada salen de la misma secuencia.
// ============================================================================

use crate::models::Waypoints;

/// Puntos intermedios normalizados: la lista se respeta en orden; el texto se
/// separa por comas, se recorta y se descartan los segmentos vacíos.
pub fn intermediate_only(waypoints: &Waypoints) -> Vec<String> {
    match waypoints {
        Waypoints::Absent => Vec::new(),
        Waypoints::List(points) => points.clone(),
        Waypoints::Text(text) => text
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Recorrido completo de un viaje
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSequence {
    stops: Vec<String>,
}

impl RouteSequence {
    pub fn format(origin: &str, destination: &str, waypoints: &Waypoints) -> Self {
        let interior = intermediate_only(waypoints);
        let mut stops = Vec::with_capacity(interior.len() + 2);
        stops.push(origin.to_string());
        stops.extend(interior);
        stops.push(destination.to_string());
        Self { stops }
    }

    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Paradas entre origen y destino
    pub fn interior(&self) -> &[String] {
        &self.stops[1..self.stops.len() - 1]
    }

    /// `"A → B → C → D"`
    pub fn summary(&self) -> String {
        self.stops.join(" → ")
    }

    /// `"1. A\n2. B\n3. C\n4. D"`
    pub fn detailed(&self) -> String {
        self.stops
            .iter()
            .enumerate()
            .map(|(i, stop)| format!("{}. {}", i + 1, stop))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
