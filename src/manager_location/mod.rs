pub mod errors;
mod models;

use std::time::Duration;
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use crate::config::LocationParameters;
use crate::manager_location::errors::LocationError;
use crate::manager_location::models::IpInfo;
use crate::models::Coordinates;
use crate::worker::Locate;

/// Resolves the approximate position of the host from its outbound IP address
pub struct Location {
    client: Client,
    url: String,
}

impl Location {
    /// Returns a new instance of the Location struct
    ///
    /// # Arguments
    ///
    /// * 'config' - location lookup configuration
    pub fn new(config: &LocationParameters) -> Result<Self, LocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, url: config.url.clone() })
    }

    /// Looks up the coordinates of the caller's public IP address
    ///
    pub fn lookup(&self) -> Result<Coordinates, LocationError> {
        let response = self.request().send()?;

        if !response.status().is_success() {
            return Err(LocationError::StatusError(response.status().as_u16()));
        }

        let json = response.text()?;

        parse_ip_info(&json)
    }

    fn request(&self) -> RequestBuilder {
        self.client
            .get(&self.url)
            .header("Accept", "application/json")
    }
}

impl Locate for Location {
    fn locate(&self) -> Option<Coordinates> {
        match self.lookup() {
            Ok(coordinates) => Some(coordinates),
            Err(e) => {
                debug!("location lookup failed: {}", e);
                None
            }
        }
    }
}

/// Extracts coordinates from an ipinfo style JSON document
///
/// # Arguments
///
/// * 'json' - the response body
fn parse_ip_info(json: &str) -> Result<Coordinates, LocationError> {
    let info: IpInfo = serde_json::from_str(json)
        .map_err(|e| LocationError::ParseError(e.to_string()))?;

    if info.bogon {
        return Err(LocationError::Unresolved(format!("bogon address {}", info.ip.unwrap_or_default())));
    }

    let loc = info.loc
        .ok_or(LocationError::Unresolved("no loc field in response".to_string()))?;
    let coordinates = parse_loc(&loc)?;

    debug!("resolved {} to {} ({})", info.ip.unwrap_or_default(), coordinates, info.city.unwrap_or_default());

    Ok(coordinates)
}

/// Parses a "<lat>,<lon>" pair
///
/// # Arguments
///
/// * 'loc' - comma separated latitude and longitude
fn parse_loc(loc: &str) -> Result<Coordinates, LocationError> {
    let (lat, lon) = loc.split_once(',')
        .ok_or(LocationError::ParseError(format!("malformed loc: {}", loc)))?;

    let lat = lat.trim().parse::<f64>()
        .map_err(|e| LocationError::ParseError(format!("latitude {}: {}", lat, e.to_string())))?;
    let lon = lon.trim().parse::<f64>()
        .map_err(|e| LocationError::ParseError(format!("longitude {}: {}", lon, e.to_string())))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(LocationError::Unresolved(format!("coordinates out of range: {}", loc)));
    }

    Ok(Coordinates { lat, lon })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_asks_for_json() {
        let location = Location::new(&LocationParameters::default()).unwrap();

        let request = location.request().build().unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "https://ipinfo.io/json");
        assert_eq!(request.headers()["accept"], "application/json");
    }

    #[test]
    fn parses_loc_field() {
        let json = r#"{"ip":"49.207.1.1","city":"Bengaluru","region":"Karnataka","country":"IN","loc":"12.9719,77.5937","org":"AS24309"}"#;
        let coordinates = parse_ip_info(json).unwrap();

        assert_eq!(coordinates, Coordinates { lat: 12.9719, lon: 77.5937 });
    }

    #[test]
    fn negative_coordinates() {
        let coordinates = parse_loc("-33.8688, -151.2093").unwrap();
        assert_eq!(coordinates, Coordinates { lat: -33.8688, lon: -151.2093 });
    }

    #[test]
    fn missing_loc_is_unresolved() {
        let result = parse_ip_info(r#"{"ip":"10.0.0.1","bogon":false}"#);
        assert!(matches!(result, Err(LocationError::Unresolved(_))));
    }

    #[test]
    fn bogon_is_unresolved() {
        let result = parse_ip_info(r#"{"ip":"192.168.1.1","bogon":true}"#);
        assert!(matches!(result, Err(LocationError::Unresolved(_))));
    }

    #[test]
    fn garbage_is_parse_error() {
        assert!(matches!(parse_ip_info("<html>"), Err(LocationError::ParseError(_))));
        assert!(matches!(parse_loc("12.97"), Err(LocationError::ParseError(_))));
        assert!(matches!(parse_loc("north,77.5"), Err(LocationError::ParseError(_))));
    }

    #[test]
    fn out_of_range_is_unresolved() {
        assert!(matches!(parse_loc("91.0,10.0"), Err(LocationError::Unresolved(_))));
        assert!(matches!(parse_loc("10.0,181.0"), Err(LocationError::Unresolved(_))));
    }
}
