use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parses a reading date written as `M/D/YYYY` (the dataset's format) or
/// `YYYY-MM-DD`.
pub fn parse_reading_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// `2024-01-05` -> `1/5/2024`
pub fn to_dataset_format(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
