//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the wx-display.toml file.
//! It provides a centralized way to configure the weather station, the display frames,
//! the task intervals and the APRS-IS and ThingSpeak uplinks.

use crate::clock::HandMotion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "wx-display.toml";

/// Shortest APRS-IS reporting interval the network tolerates.
pub const MIN_APRS_MINUTES: u64 = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration loaded from wx-display.toml
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Weather service station and local time zone
    pub station: StationConfig,
    /// Frame selection and pacing
    pub display: DisplayConfig,
    /// Network task periods
    pub intervals: IntervalConfig,
    /// APRS-IS uplink
    pub aprs: AprsConfig,
    /// ThingSpeak uplink
    pub thingspeak: ThingSpeakConfig,
}

/// Weather service station configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct StationConfig {
    /// Personal weather station ID on the weather service (e.g., "KVAWILLI27")
    pub station_id: String,
    /// Weather service API key
    pub api_key: String,
    /// Olson time zone name for the local clock (e.g., "America/New_York")
    pub timezone: String,
}

/// Display and frame configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Add the analog clock frame to the rotation
    pub analog_clock: bool,
    /// Add the digital clock frame; wins over the analog clock when both are set
    pub digital_clock: bool,
    /// Show metric units (true) or imperial units (false)
    pub metric: bool,
    /// Seconds each frame stays on screen
    pub screen_duration_secs: u64,
    /// Clock partial-update period in milliseconds
    pub tick_millis: u64,
    /// Movement of the analog minute and hour hands
    pub hand_motion: HandMotion,
}

/// Periods of the network tasks in minutes
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct IntervalConfig {
    pub weather_current_minutes: u64,
    pub weather_forecast_minutes: u64,
    pub aprs_minutes: u64,
    pub thingspeak_minutes: u64,
}

/// APRS-IS reporting configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AprsConfig {
    pub enabled: bool,
    /// Station callsign with optional SSID (e.g., "W4KRL-13")
    pub callsign: String,
    /// APRS-IS passcode for the callsign
    pub passcode: String,
    pub server: String,
    pub port: u16,
    /// Optional text file of bulletins, one per line
    pub aphorism_file: Option<String>,
}

/// ThingSpeak channel configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ThingSpeakConfig {
    pub enabled: bool,
    pub write_key: String,
    pub channel: String,
    /// Channel status text sent with every update
    pub status: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        StationConfig {
            station_id: "KVAWILLI27".to_string(),
            api_key: String::new(),
            timezone: "America/New_York".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            analog_clock: true,
            digital_clock: false,
            metric: false,
            screen_duration_secs: 5,
            tick_millis: 1000,
            hand_motion: HandMotion::Stepped,
        }
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        IntervalConfig {
            weather_current_minutes: 7,
            weather_forecast_minutes: 13,
            aprs_minutes: 10,
            thingspeak_minutes: 15,
        }
    }
}

impl Default for AprsConfig {
    fn default() -> Self {
        AprsConfig {
            enabled: false,
            callsign: "N0CALL".to_string(),
            passcode: "-1".to_string(),
            server: "noam.aprs2.net".to_string(),
            port: 14580,
            aphorism_file: None,
        }
    }
}

impl Default for ThingSpeakConfig {
    fn default() -> Self {
        ThingSpeakConfig {
            enabled: false,
            write_key: String::new(),
            channel: String::new(),
            status: "WX Frame Display".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let config = match Self::try_load_from_path(path) {
            Ok(config) => {
                log::info!("Loaded configuration for station: {}", config.station.station_id);
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using default configuration", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Config file {} unusable: {}", path.display(), e);
                log::warn!("Using default configuration");
                Self::default()
            }
        };
        config.sanitized()
    }

    /// Read and parse a config file without any fallback.
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Clamp values the rest of the program cannot work with.
    pub fn sanitized(mut self) -> Self {
        if self.intervals.aprs_minutes < MIN_APRS_MINUTES {
            log::warn!(
                "APRS interval of {} minutes is too short, using {}",
                self.intervals.aprs_minutes,
                MIN_APRS_MINUTES
            );
            self.intervals.aprs_minutes = MIN_APRS_MINUTES;
        }
        for minutes in [
            &mut self.intervals.weather_current_minutes,
            &mut self.intervals.weather_forecast_minutes,
            &mut self.intervals.thingspeak_minutes,
        ] {
            if *minutes == 0 {
                log::warn!("Task interval of 0 minutes, using 1");
                *minutes = 1;
            }
        }
        if self.display.screen_duration_secs == 0 {
            log::warn!("Screen duration of 0 seconds, using 1");
            self.display.screen_duration_secs = 1;
        }
        if self.display.tick_millis == 0 {
            self.display.tick_millis = 1000;
        }
        self
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        log::info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.station.timezone, "America/New_York");
        assert!(config.display.analog_clock);
        assert!(!config.display.digital_clock);
        assert_eq!(config.display.screen_duration_secs, 5);
        assert_eq!(config.intervals.weather_current_minutes, 7);
        assert_eq!(config.intervals.weather_forecast_minutes, 13);
        assert_eq!(config.aprs.port, 14580);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.station.station_id, parsed.station.station_id);
        assert_eq!(config.display.hand_motion, parsed.display.hand_motion);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        assert_eq!(config.station.station_id, "KVAWILLI27");
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[display\nmetric = yes\n").unwrap();

        assert!(matches!(Config::try_load_from_path(&path), Err(ConfigError::Parse(_))));
        let config = Config::load_from_path(&path);
        assert!(!config.display.metric);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wx-display.toml");
        fs::write(
            &path,
            "[display]\ndigital_clock = true\nhand_motion = \"sweep\"\n\n[intervals]\naprs_minutes = 2\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path);
        assert!(config.display.digital_clock);
        assert_eq!(config.display.hand_motion, HandMotion::Sweep);
        assert_eq!(config.display.tick_millis, 1000);
        assert_eq!(config.intervals.aprs_minutes, MIN_APRS_MINUTES);
        assert_eq!(config.intervals.thingspeak_minutes, 15);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = Config::default();
        config.aprs.callsign = "W4KRL-13".to_string();
        config.aprs.aphorism_file = Some("aphorisms.txt".to_string());
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path);
        assert_eq!(loaded.aprs.callsign, "W4KRL-13");
        assert_eq!(loaded.aprs.aphorism_file.as_deref(), Some("aphorisms.txt"));
    }
}
