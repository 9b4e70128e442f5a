//! # Network Services
//!
//! Blocking front for the async clients: the station loop is single-threaded
//! and cooperative, so each request runs to completion on a current-thread
//! tokio runtime before the loop resumes.
//!
//! - [`weather`]: observation and forecast from the weather service
//! - [`aprs`]: weather reports and bulletins to APRS-IS
//! - [`thingspeak`]: channel updates

use crate::config::Config;
use crate::station::{Telemetry, WeatherSource};
use crate::WeatherSnapshot;
use anyhow::Context;
use reqwest::Client;
use std::time::Duration;
use tokio::runtime::Runtime;

pub mod aprs;
pub mod thingspeak;
pub mod weather;

pub use weather::{Forecast, Observation, WeatherError};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Live weather source and telemetry uplink.
pub struct Network {
    runtime: Runtime,
    client: Client,
    config: Config,
}

impl Network {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("build tokio runtime")?;
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            runtime,
            client,
            config: config.clone(),
        })
    }

    fn post_aprs(&self, packet: &str) -> anyhow::Result<()> {
        let aprs = &self.config.aprs;
        self.runtime
            .block_on(aprs::post(
                &aprs.server,
                aprs.port,
                &aprs.callsign,
                &aprs.passcode,
                packet,
            ))
            .with_context(|| format!("post to {}:{}", aprs.server, aprs.port))
    }
}

impl WeatherSource for Network {
    fn fetch_current(&mut self) -> anyhow::Result<Observation> {
        let station = &self.config.station;
        let obs = self.runtime.block_on(weather::fetch_current(
            &self.client,
            &station.station_id,
            &station.api_key,
        ))?;
        Ok(obs)
    }

    fn fetch_forecast(&mut self, lat: f32, lon: f32) -> anyhow::Result<Forecast> {
        let forecast = self.runtime.block_on(weather::fetch_forecast(
            &self.client,
            lat,
            lon,
            &self.config.station.api_key,
        ))?;
        Ok(forecast)
    }
}

impl Telemetry for Network {
    fn post_weather_aprs(&mut self, wx: &WeatherSnapshot) -> anyhow::Result<()> {
        let packet = aprs::format_weather(&self.config.aprs.callsign, wx);
        self.post_aprs(&packet)
    }

    fn post_weather_thingspeak(&mut self, wx: &WeatherSnapshot) -> anyhow::Result<()> {
        let ts = &self.config.thingspeak;
        log::debug!("ThingSpeak post to channel {}", ts.channel);
        self.runtime
            .block_on(thingspeak::post_update(
                &self.client,
                thingspeak::UPDATE_URL,
                &ts.write_key,
                wx,
                &ts.status,
            ))
            .context("ThingSpeak update")
    }

    fn post_bulletin(&mut self, text: &str, id: &str) -> anyhow::Result<()> {
        let packet = aprs::format_bulletin(&self.config.aprs.callsign, text, id);
        self.post_aprs(&packet)
    }
}
