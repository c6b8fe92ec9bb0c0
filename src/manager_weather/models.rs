use serde::Deserialize;

#[derive(Deserialize)]
pub struct Main {
    pub temp: f64,
    pub humidity: f64,
}

/// Current weather as returned by OpenWeatherMap, reduced to what is logged
#[derive(Deserialize)]
pub struct CurrentWeather {
    pub main: Main,
    pub name: String,
}

/// Body returned together with a non-success status
#[derive(Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
