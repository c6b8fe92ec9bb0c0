pub mod errors;
mod models;

use std::time::Duration;
use reqwest::blocking::{Client, RequestBuilder};
use crate::config::WeatherParameters;
use crate::manager_weather::errors::WeatherError;
use crate::manager_weather::models::{ApiErrorBody, CurrentWeather};
use crate::models::{Coordinates, Reading};
use crate::worker::FetchWeather;

/// Struct for fetching current weather conditions from OpenWeatherMap
pub struct Weather {
    client: Client,
    api_key: String,
    url: String,
}

impl Weather {
    /// Returns a weather struct ready for fetching current conditions
    ///
    /// # Arguments
    ///
    /// * 'config' - weather API configuration
    pub fn new(config: &WeatherParameters) -> Result<Weather, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Weather {
            client,
            api_key: config.api_key.clone(),
            url: config.url.clone(),
        })
    }

    /// Retrieves current temperature, humidity and place name for the given coordinates
    ///
    /// # Arguments
    ///
    /// * 'coordinates' - where to get the weather for
    pub fn current(&self, coordinates: Coordinates) -> Result<Reading, WeatherError> {
        let response = self.request(coordinates).send()?;

        let status = response.status();
        let json = response.text()?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &json));
        }

        parse_current_weather(&json)
    }

    /// Builds the current weather GET request, metric units
    ///
    /// # Arguments
    ///
    /// * 'coordinates' - where to get the weather for
    fn request(&self, coordinates: Coordinates) -> RequestBuilder {
        let lat = coordinates.lat.to_string();
        let lon = coordinates.lon.to_string();

        self.client
            .get(&self.url)
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", self.api_key.as_str()), ("units", "metric")])
    }
}

impl FetchWeather for Weather {
    fn fetch(&self, coordinates: Coordinates) -> Result<Reading, WeatherError> {
        self.current(coordinates)
    }
}

/// Transforms an OpenWeatherMap current weather document to a Reading
///
/// # Arguments
///
/// * 'json' - the response body
fn parse_current_weather(json: &str) -> Result<Reading, WeatherError> {
    let current: CurrentWeather = serde_json::from_str(json)
        .map_err(|e| WeatherError::ParseError(e.to_string()))?;

    Ok(Reading {
        temperature: current.main.temp,
        humidity: current.main.humidity,
        location: current.name,
    })
}

/// Builds an error from a non-success response, using the API message if there is one
///
/// # Arguments
///
/// * 'status' - http status code
/// * 'json' - the response body
fn api_error(status: u16, json: &str) -> WeatherError {
    let message = serde_json::from_str::<ApiErrorBody>(json)
        .map(|b| b.message)
        .unwrap_or_else(|_| json.chars().take(200).collect());

    WeatherError::ApiError(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_coordinates_key_and_units() {
        let config = WeatherParameters {
            api_key: "OWMKEY".into(),
            url: "http://api.openweathermap.org/data/2.5/weather".into(),
        };
        let weather = Weather::new(&config).unwrap();

        let request = weather.request(Coordinates { lat: 12.97, lon: 77.59 }).build().unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "http://api.openweathermap.org/data/2.5/weather?lat=12.97&lon=77.59&appid=OWMKEY&units=metric"
        );
    }

    #[test]
    fn parses_current_weather() {
        let json = r#"{
            "coord": {"lon": 77.59, "lat": 12.97},
            "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
            "main": {"temp": 36.2, "feels_like": 38.1, "temp_min": 35.0, "temp_max": 37.0, "pressure": 1012, "humidity": 55},
            "dt": 1718000000,
            "name": "Bengaluru",
            "cod": 200
        }"#;

        let reading = parse_current_weather(json).unwrap();

        assert_eq!(reading.temperature, 36.2);
        assert_eq!(reading.humidity, 55.0);
        assert_eq!(reading.location, "Bengaluru");
    }

    #[test]
    fn missing_fields_are_parse_errors() {
        let no_humidity = r#"{"main": {"temp": 20.0}, "name": "X"}"#;
        let no_name = r#"{"main": {"temp": 20.0, "humidity": 40}}"#;

        assert!(matches!(parse_current_weather(no_humidity), Err(WeatherError::ParseError(_))));
        assert!(matches!(parse_current_weather(no_name), Err(WeatherError::ParseError(_))));
        assert!(matches!(parse_current_weather("not json"), Err(WeatherError::ParseError(_))));
    }

    #[test]
    fn api_error_uses_message() {
        let e = api_error(401, r#"{"cod":401, "message": "Invalid API key."}"#);
        match e {
            WeatherError::ApiError(status, message) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API key.");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn api_error_falls_back_to_body() {
        let e = api_error(502, "Bad Gateway");
        assert_eq!(e.to_string(), "ApiError: status 502: Bad Gateway");
    }
}
