use shared::{LandCoverCategory, LandCoverMetrics};
use strum::IntoEnumIterator;

pub const PLACEHOLDER: &str = "N/A";
pub const GROWTH_UNIT: &str = "km²/year";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Red,
    Blue,
    Green,
    Yellow,
    Neutral,
}

impl Tone {
    pub fn text_class(self) -> &'static str {
        match self {
            Tone::Red => "text-red-600",
            Tone::Blue => "text-blue-600",
            Tone::Green => "text-green-600",
            Tone::Yellow => "text-yellow-600",
            Tone::Neutral => "text-gray-600",
        }
    }

    pub fn border_class(self) -> &'static str {
        match self {
            Tone::Red => "border-red-300",
            Tone::Blue => "border-blue-300",
            Tone::Green => "border-green-300",
            Tone::Yellow => "border-yellow-300",
            Tone::Neutral => "border-gray-300",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricTile {
    pub category: LandCoverCategory,
    pub value: String,
    pub label: String,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub text: String,
    pub tone: Tone,
}

fn fixed(value: Option<f64>, decimals: usize) -> Option<String> {
    value
        .filter(|v| v.is_finite())
        .map(|v| format!("{:.*}", decimals, v))
}

/// `45.0%`, or the placeholder when the value is missing or not a real number.
pub fn format_percent(value: Option<f64>) -> String {
    fixed(value, 1)
        .map(|v| format!("{}%", v))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn category_tone(category: LandCoverCategory) -> Tone {
    match category {
        LandCoverCategory::Urban => Tone::Red,
        LandCoverCategory::Water => Tone::Blue,
        LandCoverCategory::Vegetation => Tone::Green,
        LandCoverCategory::BarrenLand => Tone::Yellow,
    }
}

pub fn metric_tiles(metrics: &LandCoverMetrics) -> Vec<MetricTile> {
    LandCoverCategory::iter()
        .map(|category| MetricTile {
            category,
            value: format_percent(metrics.get(category)),
            label: category.label(),
            tone: category_tone(category),
        })
        .collect()
}

/// Any loss reads red, none or a gain reads green.
pub fn vegetation_loss(value: Option<f64>) -> Reading {
    let tone = match value.filter(|v| v.is_finite()) {
        Some(v) if v > 0.0 => Tone::Red,
        Some(_) => Tone::Green,
        None => Tone::Neutral,
    };
    Reading {
        text: format_percent(value),
        tone,
    }
}

pub fn urban_growth(value: Option<f64>) -> Reading {
    match fixed(value, 2) {
        Some(v) => Reading {
            text: format!("{} {}", v, GROWTH_UNIT),
            tone: Tone::Red,
        },
        None => Reading {
            text: PLACEHOLDER.to_string(),
            tone: Tone::Neutral,
        },
    }
}
