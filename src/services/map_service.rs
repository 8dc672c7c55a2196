use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;
use crate::models::parameter::{Parameter, ThresholdRule, UNCLASSIFIED_MAP_COLOR};
use crate::models::reading::{Metals, Reading, WaterQuality};
use crate::models::station::{find_station, MAP_CENTER, MAP_ZOOM};
use crate::models::zone::{AreaType, Feature, FeatureCollection, ZoneStyle, HIGHLIGHT_STYLE};
use crate::services::dataset::Dataset;
use crate::utils::color::intensity_adjusted;

const OUTLINE_COLOR: &str = "#333";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub parameter: Parameter,
    pub value: Option<f64>,
    pub unit: &'static str,
    /// `Low`, `Moderate`, `High`, or `Unknown` for unclassified or missing values.
    pub level: &'static str,
    pub color: &'static str,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub radius: f64,
    pub outline_color: &'static str,
    pub weight: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationMarkers {
    pub station: &'static str,
    pub location: Option<String>,
    pub coordinates: [f64; 2],
    pub date: NaiveDate,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerLayer {
    pub center: [f64; 2],
    pub zoom: u8,
    pub date: NaiveDate,
    pub stations: Vec<StationMarkers>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub sum: f64,
    pub average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassCounts {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalStats {
    pub sum: f64,
    pub average: f64,
    pub class_counts: ClassCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WaterQualityStats {
    pub satellite: BTreeMap<&'static str, Aggregate>,
    pub calibrated: BTreeMap<&'static str, Aggregate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStats {
    pub metals: BTreeMap<&'static str, MetalStats>,
    pub water_quality: WaterQualityStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneWaterQuality<'a> {
    pub satellite: &'a WaterQuality,
    pub calibrated: &'a WaterQuality,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneReading<'a> {
    pub date: NaiveDate,
    pub water_quality: ZoneWaterQuality<'a>,
    pub metals: &'a Metals,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOverlay {
    pub name: String,
    pub area_type: AreaType,
    pub year: i32,
    pub label: &'static str,
    pub style: ZoneStyle,
    pub highlight_style: ZoneStyle,
    pub collection: FeatureCollection,
}

#[derive(Clone)]
pub struct MapService {
    dataset: Arc<Dataset>,
}

impl MapService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// Markers for every catalogued station with a reading on `date`.
    pub fn markers(&self, date: NaiveDate, parameters: &[Parameter]) -> MarkerLayer {
        let stations = self
            .dataset
            .readings_on(date)
            .filter_map(|reading| {
                let station = find_station(&reading.station)?;
                Some(StationMarkers {
                    station: station.name,
                    location: reading.location.clone(),
                    coordinates: station.coordinates,
                    date,
                    markers: parameters
                        .iter()
                        .map(|&p| self.marker(reading, p))
                        .collect(),
                })
            })
            .collect();

        MarkerLayer {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            date,
            stations,
        }
    }

    fn marker(&self, reading: &Reading, parameter: Parameter) -> Marker {
        let value = reading.map_value(parameter);
        let level = value.and_then(|v| parameter.classify(v, ThresholdRule::AtOrBelow));
        let color = level.map_or(UNCLASSIFIED_MAP_COLOR, |l| l.color());

        let scale = self.dataset.intensity_scale(parameter);
        let shown = value.unwrap_or(0.0);
        let ratio = shown / scale;
        let (base_radius, fill_opacity) = if parameter.is_metal() {
            (8.0, 0.8)
        } else {
            (6.0, 0.7)
        };

        Marker {
            parameter,
            value,
            unit: parameter.unit(),
            level: level.map_or("Unknown", |l| l.as_str()),
            color,
            fill_color: intensity_adjusted(color, shown, scale),
            fill_opacity,
            radius: base_radius + ratio * base_radius,
            outline_color: OUTLINE_COLOR,
            weight: 1,
        }
    }

    /// Zone layers with each feature joined to its station's readings for
    /// the layer's year.
    pub fn zones(&self, area_type: Option<AreaType>, year: Option<i32>) -> Result<Vec<ZoneOverlay>> {
        self.dataset
            .zones()
            .iter()
            .filter(|z| area_type.map_or(true, |t| z.area_type == t))
            .filter(|z| year.map_or(true, |y| z.year == y))
            .map(|layer| -> Result<ZoneOverlay> {
                let features = layer
                    .collection
                    .features
                    .iter()
                    .map(|f| self.enrich_feature(f, layer.area_type, layer.year))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ZoneOverlay {
                    name: layer.name.clone(),
                    area_type: layer.area_type,
                    year: layer.year,
                    label: layer.area_type.label(),
                    style: layer.area_type.style(),
                    highlight_style: HIGHLIGHT_STYLE,
                    collection: FeatureCollection {
                        kind: layer.collection.kind.clone(),
                        features,
                    },
                })
            })
            .collect()
    }

    fn enrich_feature(&self, feature: &Feature, area_type: AreaType, year: i32) -> Result<Feature> {
        let readings: Vec<&Reading> = match feature.name() {
            Some(name) => self.dataset.readings_in_year(name, year).collect(),
            None => Vec::new(),
        };
        let joined: Vec<ZoneReading<'_>> = readings
            .iter()
            .map(|r| ZoneReading {
                date: r.date,
                water_quality: ZoneWaterQuality {
                    satellite: &r.satellite,
                    calibrated: &r.calibrated,
                },
                metals: &r.metals,
            })
            .collect();

        let mut enriched = feature.clone();
        let props = &mut enriched.properties;
        props.insert("areaType".into(), serde_json::to_value(area_type)?);
        props.insert("year".into(), JsonValue::from(year));
        props.insert("readings".into(), serde_json::to_value(&joined)?);
        props.insert("stats".into(), serde_json::to_value(zone_stats(&readings))?);
        Ok(enriched)
    }
}

/// Per-metal and per-water-quality aggregates; `None` without readings.
/// Missing values count as zero and averages divide by the reading count.
pub fn zone_stats(readings: &[&Reading]) -> Option<ZoneStats> {
    if readings.is_empty() {
        return None;
    }
    let count = readings.len() as f64;
    let mut stats = ZoneStats::default();

    for metal in crate::models::parameter::METALS {
        let mut entry = MetalStats::default();
        for reading in readings {
            let Some(m) = reading.metals.get(metal) else {
                continue;
            };
            entry.sum += m.value.unwrap_or(0.0);
            match m.class.as_deref().map(str::to_ascii_lowercase).as_deref() {
                Some("low") => entry.class_counts.low += 1,
                Some("medium") => entry.class_counts.medium += 1,
                Some("high") => entry.class_counts.high += 1,
                _ => {}
            }
        }
        entry.average = entry.sum / count;
        stats.metals.insert(metal.key(), entry);
    }

    for param in crate::models::parameter::WATER_QUALITY {
        let satellite: f64 = readings
            .iter()
            .map(|r| r.satellite.get(param).unwrap_or(0.0))
            .sum();
        let calibrated: f64 = readings
            .iter()
            .map(|r| r.calibrated.get(param).unwrap_or(0.0))
            .sum();
        stats.water_quality.satellite.insert(
            param.key(),
            Aggregate {
                sum: satellite,
                average: satellite / count,
            },
        );
        stats.water_quality.calibrated.insert(
            param.key(),
            Aggregate {
                sum: calibrated,
                average: calibrated / count,
            },
        );
    }

    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::zone::ZoneLayer;
    use crate::services::dataset::parse_readings;

    const SAMPLE: &str = "\
station,date,location,turbidity_sat,turbidity_calibrated,iron_predicted,iron_predicted_class,lead_predicted,lead_predicted_class
East Bay,1/1/2024,Tanay,10,,10,low,0.1,Low
East Bay,3/1/2024,Tanay,20,30,30,Medium,0.3,High
East Bay,1/1/2023,Tanay,99,99,99,high,9,High
Unknown Point,1/1/2024,Somewhere,1,1,1,low,0.01,Low
";

    fn dataset() -> Arc<Dataset> {
        let readings = parse_readings(SAMPLE.as_bytes()).unwrap();
        let collection: FeatureCollection = serde_json::from_value(serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "East Bay"}, "geometry": null},
                {"type": "Feature", "properties": {"name": "Nowhere"}, "geometry": null}
            ]
        }))
        .unwrap();
        let zones = vec![ZoneLayer {
            name: "industrial_areas_2024".into(),
            area_type: AreaType::Industrial,
            year: 2024,
            collection,
        }];
        Arc::new(Dataset::new(readings, zones))
    }

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn markers_skip_uncatalogued_stations() {
        let service = MapService::new(dataset());
        let layer = service.markers(jan_first(), &[Parameter::Lead]);
        assert_eq!(layer.stations.len(), 1);
        assert_eq!(layer.stations[0].station, "East Bay");
        assert_eq!(layer.zoom, 11);
    }

    #[test]
    fn map_markers_use_at_or_below_rule() {
        let service = MapService::new(dataset());
        let layer = service.markers(jan_first(), &[Parameter::Lead, Parameter::Turbidity]);
        let lead = &layer.stations[0].markers[0];
        assert_eq!(lead.level, "Low");
        assert_eq!(lead.color, "#4CAF50");
        assert_eq!(lead.fill_opacity, 0.8);

        let turbidity = &layer.stations[0].markers[1];
        assert_eq!(turbidity.level, "Unknown");
        assert_eq!(turbidity.color, UNCLASSIFIED_MAP_COLOR);
        assert_eq!(turbidity.value, None);
        assert_eq!(turbidity.fill_opacity, 0.7);
    }

    #[test]
    fn water_quality_markers_ignore_satellite_values() {
        let service = MapService::new(dataset());
        let jan = service.markers(jan_first(), &[Parameter::Turbidity]);
        let marker = &jan.stations[0].markers[0];
        assert_eq!(marker.value, None);
        assert_eq!(marker.radius, 6.0);

        let march = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let layer = service.markers(march, &[Parameter::Turbidity]);
        assert_eq!(layer.stations[0].markers[0].value, Some(30.0));
    }

    #[test]
    fn radius_grows_with_share_of_maximum() {
        let service = MapService::new(dataset());
        let layer = service.markers(jan_first(), &[Parameter::Lead]);
        // 0.1 of a dataset maximum of 9
        let expected = 8.0 + (0.1 / 9.0) * 8.0;
        assert!((layer.stations[0].markers[0].radius - expected).abs() < 1e-9);
    }

    #[test]
    fn zones_join_readings_for_the_layer_year() {
        let service = MapService::new(dataset());
        let zones = service.zones(None, Some(2024)).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].label, "Industrial Area");

        let east = &zones[0].collection.features[0].properties;
        assert_eq!(east["areaType"], "industrial");
        assert_eq!(east["year"], 2024);
        assert_eq!(east["readings"].as_array().unwrap().len(), 2);

        let stats = &east["stats"];
        assert_eq!(stats["metals"]["iron"]["sum"], 40.0);
        assert_eq!(stats["metals"]["iron"]["average"], 20.0);
        assert_eq!(stats["metals"]["iron"]["classCounts"]["low"], 1);
        assert_eq!(stats["metals"]["iron"]["classCounts"]["medium"], 1);
        assert_eq!(stats["waterQuality"]["calibrated"]["turbidity"]["sum"], 30.0);
        assert_eq!(stats["waterQuality"]["calibrated"]["turbidity"]["average"], 15.0);

        let nowhere = &zones[0].collection.features[1].properties;
        assert!(nowhere["stats"].is_null());
    }

    #[test]
    fn zone_filters_exclude_other_layers() {
        let service = MapService::new(dataset());
        assert!(service.zones(Some(AreaType::Agricultural), None).unwrap().is_empty());
        assert!(service.zones(None, Some(2023)).unwrap().is_empty());
    }
}
