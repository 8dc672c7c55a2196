use crate::error::{Error, Result};
use crate::models::parameter::Level;
use crate::models::report::ExportFormat;
use crate::services::report_service::Report;
use rust_xlsxwriter::*;

pub struct ExportService;

impl ExportService {
    /// `heavy-metal-contamination-Lead-2024-01-01.csv`
    pub fn filename(report: &Report, format: ExportFormat) -> String {
        format!(
            "heavy-metal-contamination-{}-{}.{}",
            report.parameter.name(),
            report.date.format("%Y-%m-%d"),
            format.extension()
        )
    }

    fn headers(report: &Report) -> Vec<String> {
        let mut headers = vec![
            "Station".to_string(),
            "Location".to_string(),
            format!("{} Value", report.parameter.name()),
        ];
        if report.is_metal {
            headers.push("Level".to_string());
        }
        headers.push("Recommended Actions".to_string());
        headers
    }

    pub fn generate_report_csv(report: &Report) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(Self::headers(report))?;

        for row in &report.rows {
            let mut record = vec![
                row.station.as_str(),
                row.location.as_str(),
                row.display_value.as_str(),
            ];
            if report.is_metal {
                record.push(row.level.map_or("N/A", |l| l.as_str()));
            }
            record.push(row.recommended_actions);
            writer.write_record(&record)?;
        }

        writer
            .into_inner()
            .map_err(|e| Error::Internal(format!("CSV buffer flush failed: {}", e.error())))
    }

    /// Generate a styled XLSX workbook for a report.
    pub fn generate_report_xlsx(report: &Report) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        Self::write_summary_sheet(&mut workbook, report)?;
        if report.thresholds.is_some() {
            Self::write_standards_sheet(&mut workbook, report)?;
        }
        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }

    fn level_color(level: Level) -> Color {
        match level {
            Level::Low => Color::RGB(0x4CAF50),
            Level::Moderate => Color::RGB(0xFFC107),
            Level::High => Color::RGB(0xF44336),
        }
    }

    fn write_summary_sheet(workbook: &mut Workbook, report: &Report) -> Result<()> {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Report")?;

        // ── Color palette ──
        let primary_color = Color::RGB(0x1E3A5F);
        let header_bg = Color::RGB(0x0F172A);
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC);
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0);
        let unclassified = Color::RGB(0x9E9E9E);

        let headers = Self::headers(report);
        let widths: Vec<f64> = headers
            .iter()
            .map(|h| match h.as_str() {
                "Station" => 30.0,
                "Location" => 22.0,
                "Level" => 14.0,
                "Recommended Actions" => 70.0,
                _ => 20.0,
            })
            .collect();
        for (i, width) in widths.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }
        let last_col = (headers.len() - 1) as u16;

        // ── Title row ──
        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(0, 40)?;
        let title = format!("{} Contamination Report", report.info.label);
        worksheet.merge_range(0, 0, 0, last_col, &title, &title_format)?;

        // ── Subtitle rows ──
        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0xCBD5E1))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();

        worksheet.set_row_height(1, 22)?;
        let subtitle = format!(
            "Date: {}  •  Parameter: {} ({})  •  Stations: {}",
            report.date_label,
            report.parameter.name(),
            report.unit,
            report.station_count
        );
        worksheet.merge_range(1, 0, 1, last_col, &subtitle, &subtitle_format)?;
        worksheet.set_row_height(2, 36)?;
        worksheet.merge_range(2, 0, 2, last_col, &report.key_findings, &subtitle_format)?;

        // ── Header row ──
        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 3;
        worksheet.set_row_height(header_row, 30)?;
        for (i, name) in headers.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, name, &header_format)?;
        }

        // ── Data rows ──
        let data_start_row = header_row + 1;
        for (idx, row) in report.rows.iter().enumerate() {
            let r = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let wrap_fmt = base_fmt.clone().set_text_wrap();

            worksheet.set_row_height(r, 22)?;
            worksheet.write_string_with_format(r, 0, &row.station, &base_fmt.clone().set_bold())?;
            worksheet.write_string_with_format(r, 1, &row.location, &base_fmt)?;
            worksheet.write_string_with_format(r, 2, &row.display_value, &center_fmt)?;

            let mut col = 3;
            if report.is_metal {
                let level_fmt = Format::new()
                    .set_font_size(10)
                    .set_bold()
                    .set_font_color(Color::White)
                    .set_background_color(row.level.map_or(unclassified, Self::level_color))
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter)
                    .set_border(FormatBorder::Thin)
                    .set_border_color(border_color);
                let label = row.level.map_or("N/A", |l| l.as_str());
                worksheet.write_string_with_format(r, col, label, &level_fmt)?;
                col += 1;
            }
            worksheet.write_string_with_format(r, col, row.recommended_actions, &wrap_fmt)?;
        }

        // ── Summary row ──
        let total_row = data_start_row + report.rows.len() as u32 + 1;
        let summary_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(primary_color)
            .set_background_color(Color::RGB(0xE0F2FE))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let summary = match &report.worst_station {
            Some(worst) => format!(
                "Highest reading: {} ({:.2} {}){}",
                worst.station,
                worst.value,
                report.unit,
                worst
                    .level
                    .map(|l| format!(" - {} level", l))
                    .unwrap_or_default()
            ),
            None => "No readings".to_string(),
        };
        worksheet.set_row_height(total_row, 26)?;
        worksheet.merge_range(total_row, 0, total_row, last_col, &summary, &summary_fmt)?;

        if !report.monitoring_guidance.is_empty() {
            let guidance_fmt = Format::new().set_font_size(10).set_text_wrap();
            let heading_fmt = Format::new().set_font_size(11).set_bold();
            let start = total_row + 2;
            worksheet.write_string_with_format(start, 0, "Monitoring Guidance", &heading_fmt)?;
            for (i, item) in report.monitoring_guidance.iter().enumerate() {
                let r = start + 1 + i as u32;
                worksheet.merge_range(r, 0, r, last_col, &format!("• {}", item), &guidance_fmt)?;
            }
        }

        // Freeze panes (header stays visible while scrolling)
        worksheet.set_freeze_panes(data_start_row, 0)?;

        Ok(())
    }

    fn write_standards_sheet(workbook: &mut Workbook, report: &Report) -> Result<()> {
        let Some(tables) = &report.thresholds else {
            return Ok(());
        };
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Standards & Actions")?;
        worksheet.set_column_width(0, 24.0)?;
        worksheet.set_column_width(1, 20.0)?;
        worksheet.set_column_width(2, 90.0)?;

        let heading_fmt = Format::new()
            .set_font_size(12)
            .set_bold()
            .set_font_color(Color::RGB(0x1E3A5F));
        let header_fmt = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x0F172A))
            .set_border(FormatBorder::Thin);
        let cell_fmt = Format::new()
            .set_text_wrap()
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let mut r: u32 = 0;
        worksheet.write_string_with_format(r, 0, "Water Quality Standards", &heading_fmt)?;
        r += 1;
        let standard_header = format!("Standard ({})", tables.unit);
        for (c, name) in ["Water Class", standard_header.as_str(), "Permissible Use"]
            .iter()
            .enumerate()
        {
            worksheet.write_string_with_format(r, c as u16, *name, &header_fmt)?;
        }
        for class in &tables.water_classes {
            r += 1;
            worksheet.write_string_with_format(r, 0, &format!("Class {}", class.class), &cell_fmt)?;
            worksheet.write_number_with_format(r, 1, class.standard, &cell_fmt)?;
            worksheet.write_string_with_format(r, 2, class.permissible_use, &cell_fmt)?;
        }

        r += 2;
        worksheet.write_string_with_format(r, 0, "Contamination Levels", &heading_fmt)?;
        r += 1;
        let threshold_header = format!("Threshold ({})", tables.unit);
        for (c, name) in ["Level", threshold_header.as_str(), "Classification Impact"]
            .iter()
            .enumerate()
        {
            worksheet.write_string_with_format(r, c as u16, *name, &header_fmt)?;
        }
        for level in &tables.levels {
            r += 1;
            let level_fmt = cell_fmt
                .clone()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Self::level_color(level.level));
            worksheet.write_string_with_format(r, 0, level.level.as_str(), &level_fmt)?;
            worksheet.write_string_with_format(r, 1, &level.range, &cell_fmt)?;
            worksheet.write_string_with_format(r, 2, level.classification_impact, &cell_fmt)?;
        }

        let text_fmt = Format::new().set_font_size(10);
        let bold_fmt = Format::new().set_font_size(10).set_bold();
        for plan in &report.action_plans {
            r += 2;
            let title_fmt = heading_fmt
                .clone()
                .set_font_color(Self::level_color(plan.level));
            worksheet.write_string_with_format(r, 0, plan.title, &title_fmt)?;
            for step in plan.steps {
                r += 1;
                let fmt = if step.starts_with(' ') { &text_fmt } else { &bold_fmt };
                worksheet.write_string_with_format(r, 0, step.trim_start(), fmt)?;
            }
            r += 1;
            worksheet.write_string_with_format(r, 0, "Resident Guidance:", &bold_fmt)?;
            for item in plan.resident_guidance {
                r += 1;
                worksheet.write_string_with_format(r, 0, &format!("• {}", item), &text_fmt)?;
            }
            r += 1;
            worksheet.write_string_with_format(
                r,
                0,
                &format!("Classification Impact: {}", plan.classification_impact),
                &bold_fmt,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parameter::Parameter;
    use crate::services::dataset::parse_readings;
    use crate::services::report_service::build_report;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
station,date,location,turbidity_sat,lead_predicted
East Bay,1/1/2024,\"Tanay, Rizal\",4.5,0.15
Central Bay,1/1/2024,,3,0.01
";

    fn report(parameter: Parameter) -> Report {
        let readings = parse_readings(SAMPLE.as_bytes()).unwrap();
        let refs: Vec<_> = readings.iter().collect();
        build_report(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), parameter, &refs)
    }

    #[test]
    fn filename_uses_parameter_and_iso_date() {
        let report = report(Parameter::Lead);
        assert_eq!(
            ExportService::filename(&report, ExportFormat::Csv),
            "heavy-metal-contamination-Lead-2024-01-01.csv"
        );
        assert_eq!(
            ExportService::filename(&report, ExportFormat::Xlsx),
            "heavy-metal-contamination-Lead-2024-01-01.xlsx"
        );
    }

    #[test]
    fn metal_csv_has_level_column() {
        let csv = ExportService::generate_report_csv(&report(Parameter::Lead)).unwrap();
        let text = String::from_utf8(csv).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Station,Location,Lead Value,Level,Recommended Actions");
        assert_eq!(
            lines[1],
            "East Bay,\"Tanay, Rizal\",0.15 mg/L,Moderate,1. Increase monitoring 2. Audit industries 3. Community education"
        );
        assert!(lines[2].starts_with("Central Bay,Unknown,0.01 mg/L,Low,"));
    }

    #[test]
    fn water_quality_csv_omits_level_and_unit() {
        let csv = ExportService::generate_report_csv(&report(Parameter::Turbidity)).unwrap();
        let text = String::from_utf8(csv).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Station,Location,Turbidity Value,Recommended Actions");
        assert_eq!(
            lines[2],
            "Central Bay,Unknown,3.00,1. Monitor trends 2. Investigate sources 3. Compare to historical data"
        );
    }

    #[test]
    fn xlsx_is_a_zip_archive() {
        for parameter in [Parameter::Lead, Parameter::Chla] {
            let bytes = ExportService::generate_report_xlsx(&report(parameter)).unwrap();
            assert!(bytes.starts_with(b"PK"));
        }
    }
}
