use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::models::parameter::Parameter;
use crate::models::reading::{Reading, ReadingRecord};
use crate::models::zone::{AreaType, FeatureCollection, ZoneLayer};
use crate::utils::time::parse_reading_date;

pub const READINGS_FILE: &str = "contamination_prediction.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableDate {
    pub date: NaiveDate,
    /// First spelling of the date seen in the readings file.
    pub label: String,
}

/// Station readings and zone layers, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    readings: Vec<Reading>,
    zones: Vec<ZoneLayer>,
    scales: BTreeMap<Parameter, f64>,
}

impl Dataset {
    pub fn new(readings: Vec<Reading>, zones: Vec<ZoneLayer>) -> Self {
        let scales = Parameter::all()
            .map(|p| {
                let max = readings
                    .iter()
                    .map(|r| r.map_value(p).unwrap_or(0.0))
                    .fold(0.0_f64, f64::max);
                (p, if max == 0.0 { 1.0 } else { max })
            })
            .collect();
        Self {
            readings,
            zones,
            scales,
        }
    }

    /// Reads `contamination_prediction.csv` and every `*.geojson` file in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let readings = parse_readings(File::open(dir.join(READINGS_FILE))?)?;
        let zones = load_zones(dir)?;
        tracing::info!(
            readings = readings.len(),
            zone_layers = zones.len(),
            dir = %dir.display(),
            "dataset loaded"
        );
        Ok(Self::new(readings, zones))
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn zones(&self) -> &[ZoneLayer] {
        &self.zones
    }

    /// Unique reading dates, oldest first.
    pub fn available_dates(&self) -> Vec<AvailableDate> {
        let mut dates: BTreeMap<NaiveDate, &str> = BTreeMap::new();
        for reading in &self.readings {
            dates.entry(reading.date).or_insert(&reading.original_date);
        }
        dates
            .into_iter()
            .map(|(date, label)| AvailableDate {
                date,
                label: label.to_string(),
            })
            .collect()
    }

    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.readings.iter().map(|r| r.date).min()
    }

    pub fn has_date(&self, date: NaiveDate) -> bool {
        self.readings.iter().any(|r| r.date == date)
    }

    /// Readings on `date`, in file order.
    pub fn readings_on(&self, date: NaiveDate) -> impl Iterator<Item = &Reading> {
        self.readings.iter().filter(move |r| r.date == date)
    }

    pub fn readings_in_year<'a>(
        &'a self,
        station: &'a str,
        year: i32,
    ) -> impl Iterator<Item = &'a Reading> {
        self.readings
            .iter()
            .filter(move |r| r.station == station && r.date.year() == year)
    }

    /// Largest mapped value of `parameter` over the whole dataset, never zero.
    pub fn intensity_scale(&self, parameter: Parameter) -> f64 {
        self.scales.get(&parameter).copied().unwrap_or(1.0)
    }
}

/// Parses the readings CSV. Rows without a usable date are dropped.
pub fn parse_readings<R: io::Read>(reader: R) -> Result<Vec<Reading>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut readings = Vec::new();
    let mut undated = 0usize;
    for record in csv_reader.deserialize::<ReadingRecord>() {
        let record = record?;
        match parse_reading_date(&record.date) {
            Some(date) => readings.push(Reading::from_record(record, date)),
            None => undated += 1,
        }
    }

    if undated > 0 {
        tracing::warn!(rows = undated, "skipped readings without a valid date");
    }
    Ok(readings)
}

/// Loads `<kind>_areas_<year>.geojson` files, sorted by file name.
pub fn load_zones(dir: &Path) -> Result<Vec<ZoneLayer>> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "geojson"))
        .collect();
    paths.sort();

    let mut zones = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(year) = zone_year(stem) else {
            tracing::warn!(file = %path.display(), "zone file name has no year, skipping");
            continue;
        };
        let collection: FeatureCollection = match serde_json::from_slice(&fs::read(&path)?) {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "invalid GeoJSON, skipping");
                continue;
            }
        };
        zones.push(ZoneLayer {
            name: stem.to_string(),
            area_type: AreaType::from_file_stem(stem),
            year,
            collection,
        });
    }
    Ok(zones)
}

/// `agricultural_areas_2024` -> `2024`
fn zone_year(stem: &str) -> Option<i32> {
    stem.rsplit('_').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
station,date,location,turbidity_sat,chla_sat,tss_sat,turbidity_calibrated,chla_calibrated,tss_calibrated,iron,iron_predicted,iron_predicted_class,lead_predicted,lead_predicted_class
East Bay,1/1/2024,Tanay,10.5,2.1,8,11.2,,7.5,,12.4,Moderate,0.05,Low
Central Bay,1/1/2024,,9.0,abc,6,,,,40.3,,High,0.25,High
Central Bay,,Nowhere,1,1,1,1,1,1,1,1,Low,1,Low
East Bay,2023-12-01,Tanay,1,1,1,1,1,1,,3.5,Low,0.01,Low
";

    fn sample() -> Vec<Reading> {
        parse_readings(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn undated_rows_are_dropped() {
        let readings = sample();
        assert_eq!(readings.len(), 3);
        assert!(readings.iter().all(|r| r.location.as_deref() != Some("Nowhere")));
    }

    #[test]
    fn empty_and_garbage_cells_are_missing() {
        let readings = sample();
        let central = &readings[1];
        assert_eq!(central.location, None);
        assert_eq!(central.satellite.chla, None);
        assert_eq!(central.calibrated.turbidity, None);
        assert_eq!(central.value(Parameter::Turbidity), Some(9.0));
        assert_eq!(central.value(Parameter::Zinc), None);
        assert_eq!(central.value_or_zero(Parameter::Zinc), 0.0);
    }

    #[test]
    fn iron_falls_back_to_prediction() {
        let readings = sample();
        assert_eq!(readings[0].value(Parameter::Iron), Some(12.4));
        assert_eq!(readings[1].value(Parameter::Iron), Some(40.3));
        assert_eq!(readings[0].metals.iron.class.as_deref(), Some("Moderate"));
    }

    #[test]
    fn dates_are_unique_and_sorted() {
        let dataset = Dataset::new(sample(), Vec::new());
        let dates = dataset.available_dates();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].date, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(dates[0].label, "2023-12-01");
        assert_eq!(dates[1].label, "1/1/2024");
        assert_eq!(dataset.earliest_date(), Some(dates[0].date));
    }

    #[test]
    fn scale_is_dataset_maximum_or_one() {
        let dataset = Dataset::new(sample(), Vec::new());
        assert_eq!(dataset.intensity_scale(Parameter::Iron), 40.3);
        assert_eq!(dataset.intensity_scale(Parameter::Zinc), 1.0);
    }

    #[test]
    fn year_is_last_stem_token() {
        assert_eq!(zone_year("industrial_areas_2025"), Some(2025));
        assert_eq!(zone_year("industrial_areas"), None);
    }
}
