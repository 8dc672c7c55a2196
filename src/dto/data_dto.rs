use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::parameter::{
    Level, Parameter, ParameterGroup, ParameterInfo, Standard, WaterClass,
    UNCLASSIFIED_MAP_COLOR, WATER_CLASSES,
};
use crate::models::station::{Station, MAP_CENTER, MAP_ZOOM, STATIONS};
use crate::models::zone::AreaType;
use crate::utils::time::parse_reading_date;

#[derive(Debug, Clone, Deserialize)]
pub struct MarkersQuery {
    pub date: Option<String>,
    /// Comma-separated parameter names; every parameter when absent.
    pub parameters: Option<String>,
}

impl MarkersQuery {
    pub fn date(&self) -> Result<NaiveDate> {
        match self.date.as_deref() {
            Some(raw) => parse_date(raw),
            None => Err(Error::BadRequest("date is required".to_string())),
        }
    }

    pub fn parameters(&self) -> Result<Vec<Parameter>> {
        match self.parameters.as_deref().map(str::trim) {
            None | Some("") => Ok(Parameter::all().collect()),
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<Parameter>().map_err(Error::BadRequest))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZonesQuery {
    pub area_type: Option<String>,
    pub year: Option<i32>,
}

impl ZonesQuery {
    pub fn area_type(&self) -> Result<Option<AreaType>> {
        self.area_type
            .as_deref()
            .map(|raw| raw.parse::<AreaType>().map_err(Error::BadRequest))
            .transpose()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    pub date: Option<String>,
    pub parameter: Option<String>,
}

impl ReportQuery {
    pub fn date(&self) -> Result<Option<NaiveDate>> {
        self.date.as_deref().map(parse_date).transpose()
    }

    /// Iron unless another parameter is named.
    pub fn parameter(&self) -> Result<Parameter> {
        match self.parameter.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse().map_err(Error::BadRequest),
            _ => Ok(Parameter::Iron),
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    parse_reading_date(raw).ok_or_else(|| Error::BadRequest(format!("Invalid date: {}", raw)))
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterEntry {
    pub name: &'static str,
    pub key: &'static str,
    pub group: ParameterGroup,
    pub unit: &'static str,
    pub standard: Option<Standard>,
    pub info: ParameterInfo,
}

impl From<Parameter> for ParameterEntry {
    fn from(parameter: Parameter) -> Self {
        Self {
            name: parameter.name(),
            key: parameter.key(),
            group: parameter.group(),
            unit: parameter.unit(),
            standard: parameter.standard(),
            info: parameter.info(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterCatalog {
    pub parameters: Vec<ParameterEntry>,
    pub legend: Vec<LegendEntry>,
    pub water_classes: &'static [WaterClass],
}

impl ParameterCatalog {
    pub fn build() -> Self {
        let mut legend: Vec<LegendEntry> = [Level::Low, Level::Moderate, Level::High]
            .into_iter()
            .map(|level| LegendEntry {
                label: level.as_str(),
                color: level.color(),
            })
            .collect();
        legend.push(LegendEntry {
            label: "Unknown",
            color: UNCLASSIFIED_MAP_COLOR,
        });

        Self {
            parameters: Parameter::all().map(ParameterEntry::from).collect(),
            legend,
            water_classes: &WATER_CLASSES,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StationCatalog {
    pub stations: &'static [Station],
    pub center: [f64; 2],
    pub zoom: u8,
}

impl Default for StationCatalog {
    fn default() -> Self {
        Self {
            stations: &STATIONS,
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_parameters_default_to_all() {
        let query = MarkersQuery {
            date: Some("1/1/2024".into()),
            parameters: None,
        };
        assert_eq!(query.parameters().unwrap().len(), 8);
        assert_eq!(
            query.date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn marker_parameters_reject_unknown_names() {
        let query = MarkersQuery {
            date: None,
            parameters: Some("lead, tss".into()),
        };
        assert_eq!(
            query.parameters().unwrap(),
            vec![Parameter::Lead, Parameter::Tss]
        );
        assert!(query.date().is_err());

        let bad = MarkersQuery {
            date: None,
            parameters: Some("lead,mercury".into()),
        };
        assert!(matches!(bad.parameters(), Err(Error::BadRequest(_))));
    }

    #[test]
    fn report_query_defaults_to_iron() {
        let query = ReportQuery {
            date: None,
            parameter: None,
        };
        assert_eq!(query.parameter().unwrap(), Parameter::Iron);
        assert_eq!(query.date().unwrap(), None);

        let bad_date = ReportQuery {
            date: Some("someday".into()),
            parameter: None,
        };
        assert!(bad_date.date().is_err());
    }
}
