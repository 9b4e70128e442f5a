//! # WX Frame Display Core Library
//!
//! This library drives a 128x128 colour TFT that cycles through weather, almanac and
//! clock frames, while relaying the same weather observations to APRS-IS and ThingSpeak.
//! Everything runs on one thread: cooperative timers decide which piece of work is due,
//! and each piece runs to completion before the next poll.
//!
//! ## Design Philosophy
//!
//! ### One Screen, Many Paces
//! - **Frame advance**: every few seconds the scheduler moves to the next frame and fully
//!   redraws it
//! - **Clock tick**: once per second, but only while the clock frame is showing, the clock
//!   repaints just the parts of the face that changed
//! - **Network tasks**: minutes apart, they refresh the shared [`WeatherSnapshot`] and post
//!   it to the outside world
//!
//! ### Data Flow
//! 1. **Fetch**: a [`WeatherSource`](station::WeatherSource) fills the snapshot
//! 2. **Select**: the [`FrameScheduler`](scheduler::FrameScheduler) picks the frame
//! 3. **Draw**: the frame renderer reads snapshot and time and draws through a
//!    [`Surface`](surface::Surface)
//!
//! Stale data is never cleared: a failed fetch leaves the previous observation on screen.
//!
//! ## Core Types
//!
//! - [`WeatherSnapshot`]: the most recent observation and forecast, always metric
//! - [`Units`]: whether renderers convert to imperial units for display

use serde::{Deserialize, Serialize};

// Module declarations
pub mod aphorism;
pub mod clock;
pub mod config;
pub mod fallback;
pub mod framebuffer;
pub mod frames;
pub mod layout;
pub mod lunar;
pub mod network;
pub mod palette;
pub mod scheduler;
pub mod screens;
pub mod sensor;
pub mod station;
pub mod surface;
pub mod tasks;
pub mod time;
pub mod timer;
pub mod units;

/// Current observation and forecast for the configured station.
///
/// All values are stored in metric units exactly as the weather service
/// reports them; conversion to imperial happens only at display time.
/// Fields that were never fetched stay at their zero/empty default.
///
/// # Example
/// ```
/// use wx_frame_lib::WeatherSnapshot;
///
/// let mut wx = WeatherSnapshot::default();
/// wx.obs_temp = 21.5;
/// wx.obs_humidity = 48.0;
/// assert_eq!(wx.for_phrase_long, "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Forecast phrase, up to 32 characters
    pub for_phrase_long: String,
    /// Forecast phrase, up to 12 characters
    pub for_phrase_short: String,
    /// Calendar-day forecast high (°C)
    pub for_temp_max: f32,
    /// Calendar-day forecast low (°C)
    pub for_temp_min: f32,
    /// Daytime average cloud cover (%)
    pub for_cloud: i32,
    /// Sunrise as a Unix timestamp (UTC)
    pub for_sunrise: i64,
    /// Sunset as a Unix timestamp (UTC)
    pub for_sunset: i64,
    /// Station latitude (decimal degrees)
    pub obs_lat: f32,
    /// Station longitude (decimal degrees)
    pub obs_lon: f32,
    /// Weather Underground neighborhood name
    pub obs_neighborhood: String,
    /// Solar radiation (W/m²)
    pub obs_solar_radiation: f32,
    /// UV index, -1 when unavailable
    pub obs_uv: f32,
    /// Relative humidity (%)
    pub obs_humidity: f32,
    /// Dew point (°C)
    pub obs_dew_point: f32,
    /// Air temperature (°C)
    pub obs_temp: f32,
    /// Heat index (°C), meaningful above 18 °C
    pub obs_heat_index: f32,
    /// Wind chill (°C), meaningful below 18 °C
    pub obs_wind_chill: f32,
    /// Wind direction, degrees clockwise from north
    pub obs_wind_dir: f32,
    /// Wind speed (km/h)
    pub obs_wind_speed: f32,
    /// Wind gust (km/h)
    pub obs_wind_gust: f32,
    /// Sea-level pressure (hPa)
    pub obs_pressure: f32,
    /// Precipitation rate (mm/h)
    pub obs_precip_rate: f32,
    /// Precipitation since local midnight (mm)
    pub obs_precip_total: f32,
}

impl WeatherSnapshot {
    /// Temperature that "feels like": heat index when warm, wind chill otherwise.
    pub fn feels_like(&self) -> f32 {
        if self.obs_temp > 18.0 {
            self.obs_heat_index
        } else {
            self.obs_wind_chill
        }
    }
}

/// Display unit system selected in the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    pub fn from_metric_flag(metric: bool) -> Self {
        if metric {
            Units::Metric
        } else {
            Units::Imperial
        }
    }

    /// Format a Celsius temperature for display, e.g. `"21.5 C"` or `"71 F"`.
    pub fn temperature(self, celsius: f32) -> String {
        match self {
            Units::Metric => format!("{:.1} C", celsius),
            Units::Imperial => format!("{:.0} F", units::c_to_f(celsius)),
        }
    }

    /// Whole-degree variant used where space is tight.
    pub fn temperature_whole(self, celsius: f32) -> String {
        match self {
            Units::Metric => format!("{:.0} C", celsius),
            Units::Imperial => format!("{:.0} F", units::c_to_f(celsius)),
        }
    }

    pub fn is_metric(self) -> bool {
        self == Units::Metric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feels_like_switches_at_18_celsius() {
        let mut wx = WeatherSnapshot {
            obs_heat_index: 30.0,
            obs_wind_chill: -4.0,
            ..Default::default()
        };
        wx.obs_temp = 25.0;
        assert_eq!(wx.feels_like(), 30.0);
        wx.obs_temp = 18.0;
        assert_eq!(wx.feels_like(), -4.0);
    }

    #[test]
    fn temperature_formatting_follows_units() {
        assert_eq!(Units::Metric.temperature(21.54), "21.5 C");
        assert_eq!(Units::Imperial.temperature(100.0), "212 F");
        assert_eq!(Units::Imperial.temperature_whole(0.0), "32 F");
        assert_eq!(Units::Metric.temperature_whole(9.6), "10 C");
    }
}
