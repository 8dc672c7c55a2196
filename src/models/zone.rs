use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaType {
    Agricultural,
    Industrial,
}

impl AreaType {
    /// Area type implied by a zone file stem such as `agricultural_areas_2024`.
    pub fn from_file_stem(stem: &str) -> Self {
        if stem.contains("agri") {
            AreaType::Agricultural
        } else {
            AreaType::Industrial
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AreaType::Agricultural => "Agricultural Area",
            AreaType::Industrial => "Industrial Area",
        }
    }

    pub fn style(self) -> ZoneStyle {
        let (fill_color, color) = match self {
            AreaType::Agricultural => ("#a3e635", "#65a30d"),
            AreaType::Industrial => ("#60a5fa", "#2563eb"),
        };
        ZoneStyle {
            fill_color,
            fill_opacity: 0.25,
            weight: 2,
            color,
            dash_array: "3",
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaType::Agricultural => f.write_str("agricultural"),
            AreaType::Industrial => f.write_str("industrial"),
        }
    }
}

impl FromStr for AreaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "agricultural" => Ok(AreaType::Agricultural),
            "industrial" => Ok(AreaType::Industrial),
            other => Err(format!("Unknown area type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStyle {
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub weight: u8,
    pub color: &'static str,
    pub dash_array: &'static str,
}

/// Hover style shared by every zone polygon.
pub const HIGHLIGHT_STYLE: ZoneStyle = ZoneStyle {
    fill_color: "",
    fill_opacity: 0.45,
    weight: 4,
    color: "#2563eb",
    dash_array: "",
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default)]
    pub properties: Map<String, JsonValue>,
    #[serde(default)]
    pub geometry: JsonValue,
}

impl Feature {
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(JsonValue::as_str)
    }
}

fn feature_type() -> String {
    "Feature".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

/// One zone file: agricultural or industrial areas for a given year.
#[derive(Debug, Clone)]
pub struct ZoneLayer {
    pub name: String,
    pub area_type: AreaType,
    pub year: i32,
    pub collection: FeatureCollection,
}
