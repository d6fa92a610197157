use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

/// Record produced by one analysis run, as returned by `/api/inference`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InferenceResult {
    pub summary: String,
    pub metrics: LandCoverMetrics,
    pub change_detection: ChangeDetection,
    #[serde(default)]
    pub geojson_overlay: FeatureCollection,
}

/// Share of the scene per land-cover category, in percent.
///
/// The four values are expected to add up to roughly 100 but nothing enforces it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LandCoverMetrics {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub urban_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub water_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub vegetation_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub barren_land_percent: Option<f64>,
}

impl LandCoverMetrics {
    pub fn get(&self, category: LandCoverCategory) -> Option<f64> {
        match category {
            LandCoverCategory::Urban => self.urban_percent,
            LandCoverCategory::Water => self.water_percent,
            LandCoverCategory::Vegetation => self.vegetation_percent,
            LandCoverCategory::BarrenLand => self.barren_land_percent,
        }
    }

    /// Sum of the categories that are present.
    pub fn total(&self) -> f64 {
        LandCoverCategory::iter().filter_map(|c| self.get(c)).sum()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ChangeDetection {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub vegetation_loss_percent: Option<f64>,
    /// km² per year.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub urban_growth_rate: Option<f64>,
    #[serde(default)]
    pub risk_areas_note: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }
}

impl FeatureCollection {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Value,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Closed set of classification labels a scene is bucketed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum LandCoverCategory {
    Urban,
    Water,
    Vegetation,
    BarrenLand,
}

impl LandCoverCategory {
    /// `urban`, `water`, `vegetation`, `barren_land`
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> String {
        self.key().replace('_', " ")
    }
}

// Numbers stay numbers; anything else in a numeric slot reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// Placeholder record returned in place of a real model call.
pub fn simulated_result() -> InferenceResult {
    InferenceResult {
        summary: "Simulated land-use summary for GeoSenseAI.".to_string(),
        metrics: LandCoverMetrics {
            urban_percent: Some(25.0),
            water_percent: Some(15.0),
            vegetation_percent: Some(45.0),
            barren_land_percent: Some(15.0),
        },
        change_detection: ChangeDetection {
            vegetation_loss_percent: Some(3.2),
            urban_growth_rate: Some(1.1),
            risk_areas_note: "Urban expansion in northern region.".to_string(),
        },
        geojson_overlay: FeatureCollection::default(),
    }
}
