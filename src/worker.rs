use std::cmp::min;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use log::{error, info, warn};
use crate::alert::exceeds_threshold;
use crate::initialization::Mgr;
use crate::manager_thingspeak::LogOutcome;
use crate::manager_thingspeak::errors::ThingSpeakError;
use crate::manager_weather::errors::WeatherError;
use crate::models::{Coordinates, Reading};

/// ThingSpeak accepts at most one update per 15 seconds
pub const POLL_INTERVAL: Duration = Duration::from_secs(20);
const SLEEP_SLICE: Duration = Duration::from_millis(250);

pub trait Locate {
    fn locate(&self) -> Option<Coordinates>;
}

pub trait FetchWeather {
    fn fetch(&self, coordinates: Coordinates) -> Result<Reading, WeatherError>;
}

pub trait LogReading {
    fn log_reading(&self, reading: &Reading, coordinates: Coordinates) -> Result<LogOutcome, ThingSpeakError>;
}

/// What happened during one pass of the loop
#[derive(Debug, PartialEq)]
pub enum IterationOutcome {
    LocationUnavailable,
    WeatherUnavailable,
    Completed { alerted: bool },
}

/// Polls location and weather, logs to the cloud and alerts, until the stop flag is raised
///
/// # Arguments
///
/// * 'mgr' - struct with configured managers
/// * 'interval' - idle time between iterations
/// * 'stop' - checked before each iteration and while idling
pub fn run(mgr: &Mgr, interval: Duration, stop: &AtomicBool) -> usize {
    let mut iterations = 0;

    while !stop.load(Ordering::Relaxed) {
        run_iteration(mgr);
        iterations += 1;

        idle(interval, stop);
    }

    info!("stopped after {} iterations", iterations);
    iterations
}

/// Runs one Locate, Fetch, Log and (possibly) Alert pass. Every failure is logged and
/// ends the iteration early; none of them is fatal.
///
/// # Arguments
///
/// * 'mgr' - struct with configured managers
pub fn run_iteration(mgr: &Mgr) -> IterationOutcome {
    let Some(coordinates) = mgr.location.locate() else {
        warn!("Unable to detect location. Retrying...");
        return IterationOutcome::LocationUnavailable;
    };

    let reading = match mgr.weather.fetch(coordinates) {
        Ok(reading) => reading,
        Err(e) => {
            error!("Weather fetch failed: {}", e);
            return IterationOutcome::WeatherUnavailable;
        }
    };

    info!("{} | Temp={:.2}°C | Humidity={:.2}% | {}",
        reading.location, reading.temperature, reading.humidity, coordinates);

    match mgr.cloud.log_reading(&reading, coordinates) {
        Ok(LogOutcome::Accepted) => info!("Data logged to ThingSpeak successfully."),
        Ok(LogOutcome::Rejected(status)) => warn!("ThingSpeak error: {}", status),
        Err(e) => error!("Network error: {}", e),
    }

    let alerted = exceeds_threshold(&reading);
    if alerted && mgr.alert.dispatch(&reading) == 0 {
        warn!("Threshold exceeded but no alert was delivered");
    }

    IterationOutcome::Completed { alerted }
}

/// Sleeps for the interval in short slices so a raised stop flag is noticed quickly
///
/// # Arguments
///
/// * 'interval' - total time to sleep
/// * 'stop' - stop flag
fn idle(interval: Duration, stop: &AtomicBool) {
    let mut remaining = interval;
    while !remaining.is_zero() && !stop.load(Ordering::Relaxed) {
        let slice = min(SLEEP_SLICE, remaining);
        thread::sleep(slice);
        remaining -= slice;
    }
}
