//! # Offline Weather Model
//!
//! Stand-ins for the network when running without credentials or connectivity
//! (the `--offline` flag, or when the live client cannot be built).
//!
//! ## Model Characteristics
//!
//! ### Diurnal Pattern
//! - **Temperature**: sine wave around 18 °C, ±6 °C, peaking at 15:00 local
//! - **Humidity**: mirrors temperature, highest before dawn
//! - **Sun**: solar radiation follows a half-sine between 06:00 and 18:00;
//!   the UV index tracks it
//!
//! Wind, pressure and rain stay constant. The neighborhood reads "Offline"
//! so the data screen makes the source obvious.
//!
//! [`LogTelemetry`] formats every packet exactly as the live uplinks would and
//! writes it to the log instead of the network.

use crate::config::Config;
use crate::network::{aprs, thingspeak, Forecast, Observation};
use crate::station::{Telemetry, WeatherSource};
use crate::WeatherSnapshot;
use chrono::{DateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use std::f32::consts::PI;

const MEAN_TEMP_C: f32 = 18.0;
const TEMP_SWING_C: f32 = 6.0;
const PEAK_HOUR: f32 = 15.0;
const PEAK_SOLAR: f32 = 800.0;

/// Synthetic observation for `now`, as seen in `zone`.
pub fn approximate_observation(now: DateTime<Utc>, zone: Tz) -> Observation {
    let local = now.with_timezone(&zone);
    let hour = local.hour() as f32 + local.minute() as f32 / 60.0;

    let swing = (2.0 * PI * (hour - PEAK_HOUR + 6.0) / 24.0).sin();
    let temp = MEAN_TEMP_C + TEMP_SWING_C * swing;
    let humidity = 60.0 - 20.0 * swing;
    let solar = if (6.0..18.0).contains(&hour) {
        PEAK_SOLAR * (PI * (hour - 6.0) / 12.0).sin()
    } else {
        0.0
    };

    Observation {
        lat: 37.27,
        lon: -76.71,
        neighborhood: "Offline".to_string(),
        solar_radiation: solar,
        uv: (solar / 100.0).round(),
        wind_dir: 225.0,
        humidity,
        temp,
        heat_index: temp,
        dew_point: temp - (100.0 - humidity) / 5.0,
        wind_chill: temp,
        wind_speed: 10.0,
        wind_gust: 18.0,
        pressure: 1013.2,
        precip_rate: 0.0,
        precip_total: 0.0,
    }
}

/// Synthetic forecast: fixed high/low, sunrise 06:30 and sunset 19:30 local.
pub fn approximate_forecast(now: DateTime<Utc>, zone: Tz) -> Forecast {
    let today = now.with_timezone(&zone).date_naive();
    let local_unix = |h: u32, m: u32| {
        NaiveTime::from_hms_opt(h, m, 0)
            .and_then(|t| zone.from_local_datetime(&today.and_time(t)).earliest())
            .map(|t| t.timestamp())
            .unwrap_or_else(|| now.timestamp())
    };
    Forecast {
        phrase_long: "Offline Model".to_string(),
        phrase_short: "Offline".to_string(),
        temp_max: MEAN_TEMP_C + TEMP_SWING_C,
        temp_min: MEAN_TEMP_C - TEMP_SWING_C,
        cloud: 20,
        sunrise: local_unix(6, 30),
        sunset: local_unix(19, 30),
    }
}

/// [`WeatherSource`] backed by the diurnal model.
pub struct OfflineWeather {
    zone: Tz,
}

impl OfflineWeather {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }
}

impl WeatherSource for OfflineWeather {
    fn fetch_current(&mut self) -> anyhow::Result<Observation> {
        Ok(approximate_observation(Utc::now(), self.zone))
    }

    fn fetch_forecast(&mut self, _lat: f32, _lon: f32) -> anyhow::Result<Forecast> {
        Ok(approximate_forecast(Utc::now(), self.zone))
    }
}

/// [`Telemetry`] that logs packets instead of sending them.
pub struct LogTelemetry {
    callsign: String,
    status: String,
}

impl LogTelemetry {
    pub fn new(config: &Config) -> Self {
        Self {
            callsign: config.aprs.callsign.clone(),
            status: config.thingspeak.status.clone(),
        }
    }
}

impl Telemetry for LogTelemetry {
    fn post_weather_aprs(&mut self, wx: &WeatherSnapshot) -> anyhow::Result<()> {
        log::info!("APRS (offline): {}", aprs::format_weather(&self.callsign, wx));
        Ok(())
    }

    fn post_weather_thingspeak(&mut self, wx: &WeatherSnapshot) -> anyhow::Result<()> {
        log::info!(
            "ThingSpeak (offline): {:?}",
            thingspeak::update_fields(wx, &self.status)
        );
        Ok(())
    }

    fn post_bulletin(&mut self, text: &str, id: &str) -> anyhow::Result<()> {
        log::info!(
            "APRS bulletin (offline): {}",
            aprs::format_bulletin(&self.callsign, text, id)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_peaks_mid_afternoon() {
        let zone = Tz::UTC;
        let at = |h| Utc.with_ymd_and_hms(2025, 6, 1, h, 0, 0).unwrap();
        let afternoon = approximate_observation(at(15), zone);
        let dawn = approximate_observation(at(3), zone);
        assert!((afternoon.temp - 24.0).abs() < 0.01);
        assert!((dawn.temp - 12.0).abs() < 0.01);
        assert!(dawn.humidity > afternoon.humidity);
        assert_eq!(dawn.solar_radiation, 0.0);
        assert!((approximate_observation(at(12), zone).solar_radiation - 800.0).abs() < 0.01);
    }

    #[test]
    fn offline_observation_has_a_position() {
        let obs = approximate_observation(Utc::now(), Tz::UTC);
        assert_ne!(obs.lat, 0.0);
        assert_eq!(obs.neighborhood, "Offline");
    }

    #[test]
    fn sun_times_are_local() {
        let zone: Tz = "America/New_York".parse().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 16, 0, 0).unwrap();
        let forecast = approximate_forecast(now, zone);
        // 06:30 EDT is 10:30 UTC
        let sunrise = Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap().timestamp();
        assert_eq!(forecast.sunrise, sunrise);
        assert_eq!(forecast.sunset - forecast.sunrise, 13 * 3600);
    }

    #[test]
    fn log_telemetry_always_succeeds() {
        let mut telemetry = LogTelemetry::new(&Config::default());
        let wx = WeatherSnapshot::default();
        assert!(telemetry.post_weather_aprs(&wx).is_ok());
        assert!(telemetry.post_weather_thingspeak(&wx).is_ok());
        assert!(telemetry.post_bulletin("Hello", "M").is_ok());
    }
}
