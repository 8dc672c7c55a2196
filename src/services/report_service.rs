use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::action_plan::{
    level_impact, recommended_actions, ActionPlan, MONITORING_GUIDANCE,
};
use crate::models::parameter::{
    Level, Parameter, ParameterInfo, Standard, ThresholdRule, MEASURED_CHART_COLOR,
    UNCLASSIFIED_REPORT_COLOR, WATER_CLASSES,
};
use crate::models::reading::Reading;
use crate::models::report::{ExportFormat, NewReport};
use crate::services::dataset::Dataset;
use crate::services::store::Store;
use crate::utils::time::{now, to_dataset_format};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub station: String,
    pub location: String,
    pub value: f64,
    /// Value as printed in exports, e.g. `0.12 mg/L`.
    pub display_value: String,
    pub level: Option<Level>,
    pub color: &'static str,
    pub bar_percent: f64,
    pub recommended_actions: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorstStation {
    pub station: String,
    pub value: f64,
    pub level: Option<Level>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassThreshold {
    pub class: &'static str,
    pub standard: f64,
    pub permissible_use: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelThreshold {
    pub level: Level,
    pub range: String,
    pub color: &'static str,
    pub classification_impact: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdTables {
    pub unit: &'static str,
    pub water_classes: Vec<ClassThreshold>,
    pub levels: Vec<LevelThreshold>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub station: String,
    pub value: f64,
    pub color: &'static str,
    pub annotation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub date: NaiveDate,
    /// Date as shown to readers, `M/D/YYYY`.
    pub date_label: String,
    pub parameter: Parameter,
    pub unit: &'static str,
    pub is_metal: bool,
    pub info: ParameterInfo,
    pub station_count: usize,
    pub rows: Vec<ReportRow>,
    pub worst_station: Option<WorstStation>,
    /// Levels present on the date, most severe first.
    pub present_levels: Vec<Level>,
    pub key_findings: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdTables>,
    pub action_plans: Vec<&'static ActionPlan>,
    pub monitoring_guidance: Vec<&'static str>,
    pub chart: Vec<ChartPoint>,
}

#[derive(Clone)]
pub struct ReportService {
    dataset: Arc<Dataset>,
    store: Arc<dyn Store>,
}

impl ReportService {
    pub fn new(dataset: Arc<Dataset>, store: Arc<dyn Store>) -> Self {
        Self { dataset, store }
    }

    /// Builds the report for `date` (earliest available when absent).
    pub fn build(&self, date: Option<NaiveDate>, parameter: Parameter) -> Result<Report> {
        let date = match date {
            Some(date) => date,
            None => self
                .dataset
                .earliest_date()
                .ok_or_else(|| Error::NotFound("No data available".to_string()))?,
        };
        if !self.dataset.has_date(date) {
            return Err(Error::NotFound("No data available for this date".to_string()));
        }

        let readings: Vec<&Reading> = self.dataset.readings_on(date).collect();
        Ok(build_report(date, parameter, &readings))
    }

    /// Records a completed export so it shows up in the report statistics.
    pub async fn record_export(
        &self,
        user_id: Option<Uuid>,
        report: &Report,
        format: ExportFormat,
    ) -> Result<()> {
        self.store
            .record_report(NewReport {
                user_id,
                parameter: report.parameter,
                report_date: report.date,
                format,
                created_at: now(),
            })
            .await?;
        tracing::info!(
            parameter = %report.parameter,
            date = %report.date,
            %format,
            "report exported"
        );
        Ok(())
    }
}

pub fn build_report(date: NaiveDate, parameter: Parameter, readings: &[&Reading]) -> Report {
    let is_metal = parameter.is_metal();
    let unit = parameter.unit();
    let standard = parameter.standard();
    let classify = |v: f64| parameter.classify(v, ThresholdRule::Below);

    let values: Vec<f64> = readings.iter().map(|r| r.value_or_zero(parameter)).collect();
    let bar_scale = values
        .iter()
        .copied()
        .fold(standard.map_or(0.0, |s| s.moderate), f64::max)
        * 1.2;

    let rows: Vec<ReportRow> = readings
        .iter()
        .zip(&values)
        .map(|(reading, &value)| {
            let level = classify(value);
            ReportRow {
                station: reading.station.clone(),
                location: reading
                    .location
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                value,
                display_value: display_value(value, parameter),
                level,
                color: level.map_or(UNCLASSIFIED_REPORT_COLOR, |l| l.color()),
                bar_percent: if bar_scale > 0.0 {
                    (value / bar_scale * 100.0).min(100.0)
                } else {
                    0.0
                },
                recommended_actions: recommended_actions(level),
            }
        })
        .collect();

    // First station with the strictly greatest value.
    let worst_station = rows
        .iter()
        .fold(None::<&ReportRow>, |worst, row| match worst {
            Some(w) if row.value <= w.value => Some(w),
            _ => Some(row),
        })
        .map(|row| WorstStation {
            station: row.station.clone(),
            value: row.value,
            level: row.level,
        });

    let mut present_levels: Vec<Level> = rows.iter().filter_map(|r| r.level).collect();
    present_levels.sort_by(|a, b| b.cmp(a));
    present_levels.dedup();

    let date_label = to_dataset_format(date);
    let key_findings = key_findings(
        &date.format("%Y-%m-%d").to_string(),
        parameter,
        worst_station.as_ref(),
    );

    let chart = rows
        .iter()
        .map(|row| ChartPoint {
            station: row.station.clone(),
            value: row.value,
            color: row.level.map_or(MEASURED_CHART_COLOR, |l| l.color()),
            annotation: display_value(row.value, parameter),
        })
        .collect();

    Report {
        date,
        date_label,
        parameter,
        unit,
        is_metal,
        info: parameter.info(),
        station_count: rows.len(),
        worst_station,
        key_findings,
        thresholds: standard.map(|s| threshold_tables(s, unit)),
        action_plans: present_levels
            .iter()
            .map(|&level| ActionPlan::for_level(level))
            .collect(),
        monitoring_guidance: if is_metal {
            Vec::new()
        } else {
            MONITORING_GUIDANCE.to_vec()
        },
        present_levels,
        rows,
        chart,
    }
}

/// `0.12 mg/L` for metals, `12.30` otherwise.
pub fn display_value(value: f64, parameter: Parameter) -> String {
    if parameter.is_metal() {
        format!("{:.2} {}", value, parameter.unit())
    } else {
        format!("{:.2}", value)
    }
}

/// Findings paragraph; `iso_date` is the report date as `YYYY-MM-DD`.
fn key_findings(iso_date: &str, parameter: Parameter, worst: Option<&WorstStation>) -> String {
    let mut findings = format!(
        "The {} monitoring shows {} levels across stations.",
        iso_date,
        parameter.name()
    );
    let Some(worst) = worst else {
        return findings;
    };
    let reading = format!("{:.2} {}", worst.value, parameter.unit());

    let detail = if parameter.is_metal() {
        match worst.level {
            Some(Level::High) => format!(
                " Critical contamination detected at {} station ({}), requiring immediate action.",
                worst.station, reading
            ),
            Some(Level::Moderate) => format!(
                " Elevated levels at {} station ({}), needing preventive measures.",
                worst.station, reading
            ),
            Some(Level::Low) | None => {
                " All stations show acceptable levels for this parameter.".to_string()
            }
        }
    } else {
        format!(" Highest reading at {} station ({}).", worst.station, reading)
    };
    findings.push_str(&detail);
    findings
}

fn threshold_tables(standard: Standard, unit: &'static str) -> ThresholdTables {
    let class_values = [
        standard.class_a,
        standard.class_a,
        standard.class_b,
        standard.class_c,
        standard.class_d,
    ];
    let water_classes = WATER_CLASSES
        .iter()
        .zip(class_values)
        .map(|(class, value)| ClassThreshold {
            class: class.class,
            standard: value,
            permissible_use: class.permissible_use,
        })
        .collect();

    let level = |level: Level, range: String| LevelThreshold {
        level,
        range,
        color: level.color(),
        classification_impact: level_impact(level),
    };
    ThresholdTables {
        unit,
        water_classes,
        levels: vec![
            level(Level::Low, format!("< {}", standard.low)),
            level(
                Level::Moderate,
                format!("{} - < {}", standard.low, standard.moderate),
            ),
            level(Level::High, format!(">= {}", standard.moderate)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dataset::parse_readings;
    use crate::services::store::MockStore;

    const SAMPLE: &str = "\
station,date,location,turbidity_sat,turbidity_calibrated,lead_predicted,chromium_predicted
Central West Bay,1/1/2024,Binangonan,12,,0.05,0.01
East Bay,1/1/2024,,5,7,0.1,0.04
Central Bay,1/1/2024,Talim,9,,0.25,0.02
South Bay,1/1/2024,Calamba,,,0.25,0.03
Central West Bay,2/1/2024,Binangonan,1,,0.01,0.01
";

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::new(
            parse_readings(SAMPLE.as_bytes()).unwrap(),
            Vec::new(),
        ))
    }

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn service(store: MockStore) -> ReportService {
        ReportService::new(dataset(), Arc::new(store))
    }

    #[test]
    fn report_rule_is_strictly_below() {
        let report = service(MockStore::new())
            .build(Some(jan_first()), Parameter::Lead)
            .unwrap();
        let levels: Vec<_> = report.rows.iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![
                Some(Level::Low),
                Some(Level::Moderate),
                Some(Level::High),
                Some(Level::High)
            ]
        );
        assert_eq!(report.rows[1].location, "Unknown");
        assert_eq!(report.rows[1].display_value, "0.10 mg/L");
    }

    #[test]
    fn present_levels_are_most_severe_first() {
        let report = service(MockStore::new())
            .build(Some(jan_first()), Parameter::Lead)
            .unwrap();
        assert_eq!(
            report.present_levels,
            vec![Level::High, Level::Moderate, Level::Low]
        );
        assert_eq!(report.action_plans.len(), 3);
        assert_eq!(report.action_plans[0].level, Level::High);
        assert!(report.monitoring_guidance.is_empty());
    }

    #[test]
    fn worst_station_is_first_of_equal_maxima() {
        let report = service(MockStore::new())
            .build(Some(jan_first()), Parameter::Lead)
            .unwrap();
        let worst = report.worst_station.unwrap();
        assert_eq!(worst.station, "Central Bay");
        assert_eq!(
            report.key_findings,
            "The 2024-01-01 monitoring shows Lead levels across stations. \
             Critical contamination detected at Central Bay station (0.25 mg/L), requiring immediate action."
        );
    }

    #[test]
    fn chromium_collapsed_band_has_no_moderate() {
        let report = service(MockStore::new())
            .build(Some(jan_first()), Parameter::Chromium)
            .unwrap();
        assert_eq!(report.rows[1].level, Some(Level::High));
        assert!(!report.present_levels.contains(&Level::Moderate));
    }

    #[test]
    fn water_quality_uses_calibrated_then_satellite() {
        let report = service(MockStore::new())
            .build(Some(jan_first()), Parameter::Turbidity)
            .unwrap();
        let values: Vec<f64> = report.rows.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![12.0, 7.0, 9.0, 0.0]);
        assert!(report.rows.iter().all(|r| r.level.is_none()));
        assert_eq!(report.rows[0].color, UNCLASSIFIED_REPORT_COLOR);
        assert_eq!(report.chart[0].color, MEASURED_CHART_COLOR);
        assert_eq!(report.chart[0].annotation, "12.00");
        assert!(report.thresholds.is_none());
        assert_eq!(report.monitoring_guidance.len(), 5);
        assert!(report
            .key_findings
            .ends_with("Highest reading at Central West Bay station (12.00 NTU)."));
    }

    #[test]
    fn bar_width_is_capped_share_of_scaled_maximum() {
        let report = service(MockStore::new())
            .build(Some(jan_first()), Parameter::Turbidity)
            .unwrap();
        // scale = 12 * 1.2
        assert!((report.rows[0].bar_percent - 100.0 / 1.2).abs() < 1e-9);
        assert_eq!(report.rows[3].bar_percent, 0.0);
    }

    #[test]
    fn default_date_is_earliest_and_unknown_dates_are_not_found() {
        let svc = service(MockStore::new());
        let report = svc.build(None, Parameter::Iron).unwrap();
        assert_eq!(report.date, jan_first());
        assert_eq!(report.station_count, 4);

        let missing = NaiveDate::from_ymd_opt(1999, 1, 1).unwrap();
        assert!(matches!(
            svc.build(Some(missing), Parameter::Iron),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn threshold_tables_list_every_class() {
        let report = service(MockStore::new())
            .build(Some(jan_first()), Parameter::Lead)
            .unwrap();
        let tables = report.thresholds.unwrap();
        let classes: Vec<_> = tables.water_classes.iter().map(|c| c.class).collect();
        assert_eq!(classes, vec!["AA", "A", "B", "C", "D"]);
        assert_eq!(tables.water_classes[3].standard, 0.1);
        assert_eq!(tables.levels[1].range, "0.1 - < 0.2");
    }

    #[tokio::test]
    async fn export_is_recorded_in_store() {
        let mut store = MockStore::new();
        store
            .expect_record_report()
            .withf(|r| r.parameter == Parameter::Lead && r.format == ExportFormat::Csv)
            .times(1)
            .returning(|_| Ok(()));
        let svc = service(store);
        let report = svc.build(Some(jan_first()), Parameter::Lead).unwrap();
        svc.record_export(None, &report, ExportFormat::Csv)
            .await
            .unwrap();
    }
}
