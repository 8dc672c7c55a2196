//! Monitored parameters, their water-quality standards and the contamination
//! levels derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const LOW_COLOR: &str = "#4CAF50";
pub const MODERATE_COLOR: &str = "#FFC107";
pub const HIGH_COLOR: &str = "#F44336";
/// Marker color for parameters without thresholds.
pub const UNCLASSIFIED_MAP_COLOR: &str = "#4575b4";
pub const UNCLASSIFIED_REPORT_COLOR: &str = "#9E9E9E";
pub const MEASURED_CHART_COLOR: &str = "#4285F4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Low,
    Moderate,
    High,
}

impl Level {
    pub fn color(self) -> &'static str {
        match self {
            Level::Low => LOW_COLOR,
            Level::Moderate => MODERATE_COLOR,
            Level::High => HIGH_COLOR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Moderate => "Moderate",
            Level::High => "High",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison applied against a standard's upper bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdRule {
    /// `value <= bound` stays in the lower level (map markers).
    AtOrBelow,
    /// `value < bound` stays in the lower level (reports).
    Below,
}

impl ThresholdRule {
    fn within(self, value: f64, bound: f64) -> bool {
        match self {
            ThresholdRule::AtOrBelow => value <= bound,
            ThresholdRule::Below => value < bound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Standard {
    pub class_a: f64,
    pub class_b: f64,
    pub class_c: f64,
    pub class_d: f64,
    pub low: f64,
    pub moderate: f64,
}

impl Standard {
    pub fn classify(&self, value: f64, rule: ThresholdRule) -> Level {
        if rule.within(value, self.low) {
            Level::Low
        } else if rule.within(value, self.moderate) {
            Level::Moderate
        } else {
            Level::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterGroup {
    Metals,
    WaterQuality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Parameter {
    Iron,
    Lead,
    Chromium,
    Arsenic,
    Zinc,
    Turbidity,
    Chla,
    #[serde(rename = "TSS")]
    Tss,
}

pub const METALS: [Parameter; 5] = [
    Parameter::Iron,
    Parameter::Chromium,
    Parameter::Zinc,
    Parameter::Arsenic,
    Parameter::Lead,
];

pub const WATER_QUALITY: [Parameter; 3] =
    [Parameter::Turbidity, Parameter::Chla, Parameter::Tss];

impl Parameter {
    pub fn all() -> impl Iterator<Item = Parameter> {
        METALS.into_iter().chain(WATER_QUALITY)
    }

    pub fn name(self) -> &'static str {
        match self {
            Parameter::Iron => "Iron",
            Parameter::Lead => "Lead",
            Parameter::Chromium => "Chromium",
            Parameter::Arsenic => "Arsenic",
            Parameter::Zinc => "Zinc",
            Parameter::Turbidity => "Turbidity",
            Parameter::Chla => "Chla",
            Parameter::Tss => "TSS",
        }
    }

    /// Lowercase key used in CSV column names and JSON maps.
    pub fn key(self) -> &'static str {
        match self {
            Parameter::Iron => "iron",
            Parameter::Lead => "lead",
            Parameter::Chromium => "chromium",
            Parameter::Arsenic => "arsenic",
            Parameter::Zinc => "zinc",
            Parameter::Turbidity => "turbidity",
            Parameter::Chla => "chla",
            Parameter::Tss => "tss",
        }
    }

    pub fn group(self) -> ParameterGroup {
        if self.is_metal() {
            ParameterGroup::Metals
        } else {
            ParameterGroup::WaterQuality
        }
    }

    pub fn is_metal(self) -> bool {
        METALS.contains(&self)
    }

    pub fn unit(self) -> &'static str {
        match self {
            Parameter::Turbidity => "NTU",
            Parameter::Chla => "μg/L",
            _ => "mg/L",
        }
    }

    pub fn standard(self) -> Option<Standard> {
        let (class_a, class_b, class_c, class_d, low, moderate) = match self {
            Parameter::Iron => (5.0, 5.0, 7.5, 35.0, 7.5, 35.0),
            Parameter::Lead => (0.02, 0.02, 0.1, 0.2, 0.1, 0.2),
            Parameter::Chromium => (0.02, 0.02, 0.02, 0.04, 0.04, 0.04),
            Parameter::Arsenic => (0.02, 0.02, 0.04, 0.08, 0.04, 0.08),
            Parameter::Zinc => (4.0, 4.0, 4.0, 8.0, 8.0, 8.0),
            _ => return None,
        };
        Some(Standard {
            class_a,
            class_b,
            class_c,
            class_d,
            low,
            moderate,
        })
    }

    pub fn classify(self, value: f64, rule: ThresholdRule) -> Option<Level> {
        self.standard().map(|s| s.classify(value, rule))
    }

    pub fn info(self) -> ParameterInfo {
        match self {
            Parameter::Iron => ParameterInfo::metal(
                "Iron (Fe)",
                "Metal",
                "Essential element but excessive amounts cause water discoloration and bacterial growth.",
                "High levels may cause metallic taste, staining, and in extreme cases, liver damage.",
            ),
            Parameter::Lead => ParameterInfo::metal(
                "Lead (Pb)",
                "Heavy Metal",
                "Toxic heavy metal that accumulates in the body affecting multiple systems.",
                "Causes neurological damage (especially in children) and cardiovascular issues.",
            ),
            Parameter::Chromium => ParameterInfo::metal(
                "Chromium (Cr)",
                "Heavy Metal",
                "Hexavalent chromium is carcinogenic while trivalent is an essential nutrient.",
                "Can cause lung cancer, liver damage, and skin irritation.",
            ),
            Parameter::Arsenic => ParameterInfo::metal(
                "Arsenic (As)",
                "Metalloid",
                "Naturally occurring toxic element that contaminates groundwater in many regions.",
                "Chronic exposure leads to skin lesions, cancer, and cardiovascular disease.",
            ),
            Parameter::Zinc => ParameterInfo::metal(
                "Zinc (Zn)",
                "Essential Metal",
                "Essential nutrient but toxic at high concentrations in aquatic environments.",
                "Excess zinc can cause nausea, vomiting, and impaired immune function.",
            ),
            Parameter::Turbidity => ParameterInfo::water_quality(
                "Turbidity",
                "Physical Parameter",
                "Measures water clarity. High turbidity reduces light penetration and indicates potential contamination.",
                "Higher values suggest more suspended particles which may carry pollutants.",
                "Turbid waters often contain particle-bound metals and reduce treatment effectiveness.",
            ),
            Parameter::Chla => ParameterInfo::water_quality(
                "Chlorophyll-a",
                "Biological Parameter",
                "Indicator of algal biomass. Correlates with nutrient pollution and potential toxin producers.",
                "Elevated levels indicate eutrophication and harmful algal bloom risks.",
                "Algae can bioaccumulate metals and affect their cycling in aquatic systems.",
            ),
            Parameter::Tss => ParameterInfo::water_quality(
                "Total Suspended Solids",
                "Physical Parameter",
                "Measures suspended solids that can transport pollutants and reduce water quality.",
                "High TSS can smother aquatic habitats and indicate erosion or runoff issues.",
                "Many heavy metals adsorb to suspended particles, making TSS a proxy for metal transport.",
            ),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Parameter::all()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown parameter: {wanted}"))
    }
}

impl<'de> Deserialize<'de> for Parameter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Descriptive text shown alongside a parameter in reports and legends.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParameterInfo {
    pub label: &'static str,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_effects: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal_relevance: Option<&'static str>,
}

impl ParameterInfo {
    const fn metal(
        label: &'static str,
        category: &'static str,
        explanation: &'static str,
        health_effects: &'static str,
    ) -> Self {
        Self {
            label,
            category,
            explanation: Some(explanation),
            health_effects: Some(health_effects),
            importance: None,
            interpretation: None,
            metal_relevance: None,
        }
    }

    const fn water_quality(
        label: &'static str,
        category: &'static str,
        importance: &'static str,
        interpretation: &'static str,
        metal_relevance: &'static str,
    ) -> Self {
        Self {
            label,
            category,
            explanation: None,
            health_effects: None,
            importance: Some(importance),
            interpretation: Some(interpretation),
            metal_relevance: Some(metal_relevance),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WaterClass {
    pub class: &'static str,
    pub permissible_use: &'static str,
}

pub const WATER_CLASSES: [WaterClass; 5] = [
    WaterClass {
        class: "AA",
        permissible_use: "Public water supply class I (intended primarily for waters having watersheds which are uninhabited and otherwise protected and which require only approved disinfection to meet the National Standards for Drinking Water (NSDW) of the Philippines)",
    },
    WaterClass {
        class: "A",
        permissible_use: "Public water supply class II (for sources that require complete treatment (coagulation, sedimentation, filtration, and disinfection) to meet NSDW)",
    },
    WaterClass {
        class: "B",
        permissible_use: "Recreational water class I (for primary contact recreation such as bathing, swimming, skin diving, etc.)",
    },
    WaterClass {
        class: "C",
        permissible_use: "Fishery water for the propagation and growth of fish and other aquatic resources",
    },
    WaterClass {
        class: "D",
        permissible_use: "For agriculture, irrigation, livestock watering, etc.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_boundary_depends_on_rule() {
        assert_eq!(
            Parameter::Lead.classify(0.1, ThresholdRule::AtOrBelow),
            Some(Level::Low)
        );
        assert_eq!(
            Parameter::Lead.classify(0.1, ThresholdRule::Below),
            Some(Level::Moderate)
        );
        assert_eq!(
            Parameter::Lead.classify(0.2, ThresholdRule::AtOrBelow),
            Some(Level::Moderate)
        );
        assert_eq!(
            Parameter::Lead.classify(0.2, ThresholdRule::Below),
            Some(Level::High)
        );
    }

    #[test]
    fn collapsed_bands_skip_moderate_in_reports() {
        assert_eq!(
            Parameter::Chromium.classify(0.04, ThresholdRule::AtOrBelow),
            Some(Level::Low)
        );
        assert_eq!(
            Parameter::Chromium.classify(0.04, ThresholdRule::Below),
            Some(Level::High)
        );
        assert_eq!(
            Parameter::Zinc.classify(8.5, ThresholdRule::AtOrBelow),
            Some(Level::High)
        );
    }

    #[test]
    fn water_quality_is_unclassified() {
        assert_eq!(Parameter::Turbidity.classify(1000.0, ThresholdRule::Below), None);
        assert!(Parameter::Tss.standard().is_none());
        assert_eq!(Parameter::Chla.unit(), "μg/L");
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("lead".parse::<Parameter>().unwrap(), Parameter::Lead);
        assert_eq!(" TSS ".parse::<Parameter>().unwrap(), Parameter::Tss);
        assert_eq!("CHLA".parse::<Parameter>().unwrap(), Parameter::Chla);
        assert!("mercury".parse::<Parameter>().is_err());
    }

    #[test]
    fn levels_order_by_severity() {
        let mut levels = vec![Level::Low, Level::High, Level::Moderate];
        levels.sort_by(|a, b| b.cmp(a));
        assert_eq!(levels, vec![Level::High, Level::Moderate, Level::Low]);
    }
}
