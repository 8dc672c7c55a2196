use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::parameter::Parameter;

/// One row of `contamination_prediction.csv`, keyed by header name.
///
/// Numeric cells that are empty or unparseable deserialize to `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingRecord {
    #[serde(default)]
    pub station: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub turbidity_sat: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub chla_sat: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tss_sat: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub turbidity_calibrated: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub chla_calibrated: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub tss_calibrated: Option<f64>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub iron: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub iron_predicted: Option<f64>,
    #[serde(default)]
    pub iron_predicted_class: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub iron_predicted_class_encoded: Option<i32>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub chromium_predicted: Option<f64>,
    #[serde(default)]
    pub chromium_predicted_class: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub chromium_predicted_class_encoded: Option<i32>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub zinc_predicted: Option<f64>,
    #[serde(default)]
    pub zinc_predicted_class: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub zinc_predicted_class_encoded: Option<i32>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub arsenic_predicted: Option<f64>,
    #[serde(default)]
    pub arsenic_predicted_class: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub arsenic_predicted_class_encoded: Option<i32>,

    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub lead_predicted: Option<f64>,
    #[serde(default)]
    pub lead_predicted_class: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub lead_predicted_class_encoded: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WaterQuality {
    pub turbidity: Option<f64>,
    pub chla: Option<f64>,
    pub tss: Option<f64>,
}

impl WaterQuality {
    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Turbidity => self.turbidity,
            Parameter::Chla => self.chla,
            Parameter::Tss => self.tss,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalReading {
    pub value: Option<f64>,
    pub class: Option<String>,
    pub class_encoded: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metals {
    pub iron: MetalReading,
    pub chromium: MetalReading,
    pub zinc: MetalReading,
    pub arsenic: MetalReading,
    pub lead: MetalReading,
}

impl Metals {
    pub fn get(&self, parameter: Parameter) -> Option<&MetalReading> {
        match parameter {
            Parameter::Iron => Some(&self.iron),
            Parameter::Chromium => Some(&self.chromium),
            Parameter::Zinc => Some(&self.zinc),
            Parameter::Arsenic => Some(&self.arsenic),
            Parameter::Lead => Some(&self.lead),
            _ => None,
        }
    }
}

/// A dated station reading with metals and water-quality measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub station: String,
    pub location: Option<String>,
    pub date: NaiveDate,
    /// Date exactly as written in the source file.
    pub original_date: String,
    pub satellite: WaterQuality,
    pub calibrated: WaterQuality,
    pub metals: Metals,
}

impl Reading {
    pub fn from_record(record: ReadingRecord, date: NaiveDate) -> Self {
        let metal = |value: Option<f64>, class: Option<String>, encoded: Option<i32>| {
            MetalReading {
                value,
                class: class.filter(|c| !c.trim().is_empty()),
                class_encoded: encoded,
            }
        };

        Reading {
            station: record.station,
            location: record.location.filter(|l| !l.trim().is_empty()),
            date,
            original_date: record.date,
            satellite: WaterQuality {
                turbidity: record.turbidity_sat,
                chla: record.chla_sat,
                tss: record.tss_sat,
            },
            calibrated: WaterQuality {
                turbidity: record.turbidity_calibrated,
                chla: record.chla_calibrated,
                tss: record.tss_calibrated,
            },
            metals: Metals {
                iron: metal(
                    record.iron.or(record.iron_predicted),
                    record.iron_predicted_class,
                    record.iron_predicted_class_encoded,
                ),
                chromium: metal(
                    record.chromium_predicted,
                    record.chromium_predicted_class,
                    record.chromium_predicted_class_encoded,
                ),
                zinc: metal(
                    record.zinc_predicted,
                    record.zinc_predicted_class,
                    record.zinc_predicted_class_encoded,
                ),
                arsenic: metal(
                    record.arsenic_predicted,
                    record.arsenic_predicted_class,
                    record.arsenic_predicted_class_encoded,
                ),
                lead: metal(
                    record.lead_predicted,
                    record.lead_predicted_class,
                    record.lead_predicted_class_encoded,
                ),
            },
        }
    }

    /// Measured value for a parameter: the predicted metal concentration, or
    /// the calibrated water-quality value falling back to the satellite one.
    pub fn value(&self, parameter: Parameter) -> Option<f64> {
        match self.metals.get(parameter) {
            Some(metal) => metal.value,
            None => self
                .calibrated
                .get(parameter)
                .or_else(|| self.satellite.get(parameter)),
        }
    }

    pub fn value_or_zero(&self, parameter: Parameter) -> f64 {
        self.value(parameter).unwrap_or(0.0)
    }

    /// Value drawn on the map: the metal concentration, or the calibrated
    /// water-quality value only. Satellite values are never plotted.
    pub fn map_value(&self, parameter: Parameter) -> Option<f64> {
        match self.metals.get(parameter) {
            Some(metal) => metal.value,
            None => self.calibrated.get(parameter),
        }
    }
}
