use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Station {
    pub name: &'static str,
    /// `[latitude, longitude]`
    pub coordinates: [f64; 2],
}

pub const STATIONS: [Station; 9] = [
    Station { name: "Central West Bay", coordinates: [14.417014, 121.174044] },
    Station { name: "East Bay", coordinates: [14.271983, 121.336441] },
    Station { name: "Central Bay", coordinates: [14.385799, 121.280192] },
    Station { name: "Northern West Bay", coordinates: [14.488326, 121.138938] },
    Station { name: "South Bay", coordinates: [14.238274, 121.232659] },
    Station { name: "San Pedro (West Bay)", coordinates: [14.370276, 121.094390] },
    Station { name: "Sta. Rosa (West Bay)", coordinates: [14.325385, 121.133773] },
    Station { name: "Fish Sanctuary (Central Bay)", coordinates: [14.291274, 121.269698] },
    Station { name: "Pagsanjan (East Bay)", coordinates: [14.312355, 121.384512] },
];

pub const MAP_CENTER: [f64; 2] = [14.385799, 121.280192];
pub const MAP_ZOOM: u8 = 11;

/// Resolves a station name as written in the readings file.
pub fn find_station(name: &str) -> Option<&'static Station> {
    let wanted = name.trim();
    STATIONS
        .iter()
        .find(|s| s.name.trim().eq_ignore_ascii_case(wanted))
}
