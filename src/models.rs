use std::fmt::{Display, Formatter};

/// Approximate position of the host as resolved from its outbound IP address
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lat={}, Lon={}", self.lat, self.lon)
    }
}

/// A single weather observation for one polling iteration
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub temperature: f64, // Degrees Celsius
    pub humidity: f64,    // Percent
    pub location: String,
}
