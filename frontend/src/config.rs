use crate::inference::InferenceClient;

pub const MAP_CONTAINER_ID: &str = "map-container";

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceUrls {
    pub map_stylesheet: String,
    pub map_script: String,
    pub icon_script: String,
}

impl Default for ResourceUrls {
    fn default() -> Self {
        Self {
            map_stylesheet: "https://unpkg.com/leaflet@1.7.1/dist/leaflet.css".to_string(),
            map_script: "https://unpkg.com/leaflet@1.7.1/dist/leaflet.js".to_string(),
            icon_script: "https://unpkg.com/lucide@latest".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub container_id: String,
    /// `[latitude, longitude]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: String,
    pub max_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: MAP_CONTAINER_ID.to_string(),
            center: [40.73, -73.93],
            zoom: 12,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 18,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub resources: ResourceUrls,
    pub map: MapConfig,
    pub inference: InferenceClient,
}

impl AppConfig {
    /// Defaults, with the inference endpoint taken from `GEOSENSE_INFERENCE_ENDPOINT`
    /// at build time. Without it the dashboard runs the simulated model.
    pub fn from_build_env() -> Self {
        Self {
            resources: ResourceUrls::default(),
            map: MapConfig::default(),
            inference: inference_client_for(option_env!("GEOSENSE_INFERENCE_ENDPOINT")),
        }
    }
}

pub fn inference_client_for(endpoint: Option<&str>) -> InferenceClient {
    match endpoint.map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => InferenceClient::Remote {
            endpoint: endpoint.to_string(),
        },
        _ => InferenceClient::Simulated { latency_ms: 600 },
    }
}
