//! # Station Loop
//!
//! Owns the display surface, the shared [`WeatherSnapshot`] and every timer,
//! and runs one cooperative pass per call to [`Station::service`].
//!
//! ## Startup
//! 1. Splash screen
//! 2. Current observation (gives the station position)
//! 3. Settings screen
//! 4. Forecast for the station position
//! 5. [`Station::start`] arms the task and frame timers
//!
//! ## Each pass
//! 1. Morning/evening APRS bulletin, if one is due
//! 2. Network tasks in order: current weather, ThingSpeak, APRS, forecast
//! 3. Frame advance, then clock tick
//!
//! A failed fetch or post is logged and otherwise ignored; the snapshot keeps
//! its previous values.

use crate::aphorism::Aphorisms;
use crate::config::Config;
use crate::frames::FrameContext;
use crate::network::{Forecast, Observation};
use crate::scheduler::{FramePass, FrameScheduler};
use crate::screens;
use crate::sensor::IndoorSensor;
use crate::surface::Surface;
use crate::tasks::{Task, TaskControl};
use crate::time::{parse_zone, Moment};
use crate::{Units, WeatherSnapshot};
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use std::time::Instant;

/// Where weather comes from.
pub trait WeatherSource {
    fn fetch_current(&mut self) -> anyhow::Result<Observation>;
    /// Forecast for a position; needs the station's lat/lon from a current observation.
    fn fetch_forecast(&mut self, lat: f32, lon: f32) -> anyhow::Result<Forecast>;
}

/// Where observations and bulletins are posted.
pub trait Telemetry {
    fn post_weather_aprs(&mut self, wx: &WeatherSnapshot) -> anyhow::Result<()>;
    fn post_weather_thingspeak(&mut self, wx: &WeatherSnapshot) -> anyhow::Result<()>;
    fn post_bulletin(&mut self, text: &str, id: &str) -> anyhow::Result<()>;
}

/// Morning and evening bulletin slots, each sent at most once per local day.
#[derive(Clone, Debug, Default)]
pub struct BulletinSchedule {
    day: Option<(i32, u32)>,
    morning_sent: bool,
    evening_sent: bool,
}

impl BulletinSchedule {
    pub const MORNING_HOUR: u32 = 8;
    pub const EVENING_HOUR: u32 = 20;

    pub fn new() -> Self {
        Self::default()
    }

    /// Bulletin id due at `moment` ("M" or "E"), marking it sent.
    pub fn due(&mut self, moment: &Moment) -> Option<&'static str> {
        let today = moment.local_ordinal_day();
        if self.day != Some(today) {
            self.day = Some(today);
            self.morning_sent = false;
            self.evening_sent = false;
        }

        let (hour, minute) = (moment.local.hour(), moment.local.minute());
        if minute != 0 {
            return None;
        }
        if hour == Self::MORNING_HOUR && !self.morning_sent {
            self.morning_sent = true;
            return Some("M");
        }
        if hour == Self::EVENING_HOUR && !self.evening_sent {
            self.evening_sent = true;
            return Some("E");
        }
        None
    }
}

/// What one [`Station::service`] pass did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    pub tasks: Vec<Task>,
    pub bulletin: Option<&'static str>,
    pub frame: FramePass,
}

pub struct Station<S> {
    surface: S,
    config: Config,
    zone: Tz,
    units: Units,
    weather: WeatherSnapshot,
    scheduler: FrameScheduler,
    tasks: TaskControl,
    source: Box<dyn WeatherSource>,
    telemetry: Box<dyn Telemetry>,
    sensor: Box<dyn IndoorSensor>,
    bulletins: BulletinSchedule,
    aphorisms: Option<Aphorisms>,
}

impl<S: Surface> Station<S> {
    pub fn new(
        surface: S,
        config: Config,
        source: Box<dyn WeatherSource>,
        telemetry: Box<dyn Telemetry>,
        sensor: Box<dyn IndoorSensor>,
    ) -> Self {
        let aphorisms = config.aprs.aphorism_file.as_ref().and_then(|path| {
            Aphorisms::load(path)
                .map_err(|e| log::warn!("No bulletins: {:#}", e))
                .ok()
        });
        Self {
            surface,
            zone: parse_zone(&config.station.timezone),
            units: Units::from_metric_flag(config.display.metric),
            weather: WeatherSnapshot::default(),
            scheduler: FrameScheduler::from_config(&config),
            tasks: TaskControl::from_config(&config),
            config,
            source,
            telemetry,
            sensor,
            bulletins: BulletinSchedule::new(),
            aphorisms,
        }
    }

    pub fn with_aphorisms(mut self, aphorisms: Aphorisms) -> Self {
        self.aphorisms = Some(aphorisms);
        self
    }

    /// Startup screens and the first fetches. Timers are not armed yet.
    pub fn setup(&mut self, wall: DateTime<Utc>) {
        screens::draw_splash(&mut self.surface);
        self.refresh_current();
        let moment = Moment::new(wall, self.zone);
        screens::draw_data_screen(&mut self.surface, &self.weather, &self.config, &moment);
        self.refresh_forecast();
    }

    /// Arm the network task timers and the frame rotation.
    pub fn start(&mut self, now: Instant) {
        self.tasks.start_all(now);
        for task in Task::ALL {
            if let Some(interval) = self.tasks.interval(task) {
                log::debug!("{:?} every {} s", task, interval.as_secs());
            }
        }
        self.scheduler.start(now);
        log::info!(
            "Started: {} frames, clock {}",
            self.scheduler.catalog().len(),
            screens::clock_description(self.scheduler.clock().map(|c| c.kind()))
        );
    }

    /// One pass of the main loop. `wall` is read again after the network
    /// tasks, which may block for seconds, so frames draw the current time.
    pub fn service(&mut self, now: Instant, wall: impl Fn() -> DateTime<Utc>) -> PassReport {
        let moment = Moment::new(wall(), self.zone);
        let mut report = PassReport {
            bulletin: self.process_bulletins(&moment),
            ..Default::default()
        };

        for task in self.tasks.due(now) {
            self.run_task(task);
            report.tasks.push(task);
        }

        let mut ctx = FrameContext {
            weather: &self.weather,
            moment: Moment::new(wall(), self.zone),
            units: self.units,
            sensor: self.sensor.as_mut(),
        };
        report.frame = self.scheduler.poll(now, &mut self.surface, &mut ctx);
        report
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::WeatherCurrent => self.refresh_current(),
            Task::WeatherForecast => self.refresh_forecast(),
            Task::ThingSpeakPost => {
                if self.config.thingspeak.enabled {
                    if let Err(e) = self.telemetry.post_weather_thingspeak(&self.weather) {
                        log::warn!("ThingSpeak post failed: {:#}", e);
                    }
                }
            }
            Task::AprsPost => {
                if self.config.aprs.enabled {
                    if let Err(e) = self.telemetry.post_weather_aprs(&self.weather) {
                        log::warn!("APRS post failed: {:#}", e);
                    }
                }
            }
        }
    }

    fn process_bulletins(&mut self, moment: &Moment) -> Option<&'static str> {
        if !self.config.aprs.enabled {
            return None;
        }
        let aphorisms = self.aphorisms.as_mut()?;
        let id = self.bulletins.due(moment)?;
        let text = aphorisms.next()?;
        if let Err(e) = self.telemetry.post_bulletin(text, id) {
            log::warn!("APRS bulletin {} failed: {:#}", id, e);
        }
        Some(id)
    }

    fn refresh_current(&mut self) {
        match self.source.fetch_current() {
            Ok(obs) => {
                obs.apply_to(&mut self.weather);
                log::info!(
                    "Observation: {:.1} C, {:.0}% at {}",
                    obs.temp,
                    obs.humidity,
                    obs.neighborhood
                );
            }
            Err(e) => log::warn!("Current weather fetch failed: {:#}", e),
        }
    }

    fn refresh_forecast(&mut self) {
        if self.weather.obs_lat == 0.0 {
            log::warn!("No station position yet, skipping forecast");
            return;
        }
        match self.source.fetch_forecast(self.weather.obs_lat, self.weather.obs_lon) {
            Ok(forecast) => {
                forecast.apply_to(&mut self.weather);
                log::info!("Forecast: {}", forecast.phrase_long);
            }
            Err(e) => log::warn!("Forecast fetch failed: {:#}", e),
        }
    }

    pub fn weather(&self) -> &WeatherSnapshot {
        &self.weather
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, day: u32) -> Moment {
        Moment::new(Utc.with_ymd_and_hms(2025, 6, day, h, m, 0).unwrap(), Tz::UTC)
    }

    #[test]
    fn bulletins_once_per_slot_per_day() {
        let mut schedule = BulletinSchedule::new();
        assert_eq!(schedule.due(&at(7, 59, 1)), None);
        assert_eq!(schedule.due(&at(8, 0, 1)), Some("M"));
        assert_eq!(schedule.due(&at(8, 0, 1)), None, "already sent this morning");
        assert_eq!(schedule.due(&at(8, 1, 1)), None);
        assert_eq!(schedule.due(&at(20, 0, 1)), Some("E"));
        assert_eq!(schedule.due(&at(20, 0, 1)), None);
        assert_eq!(schedule.due(&at(8, 0, 2)), Some("M"), "new day resets the slots");
    }

    #[test]
    fn first_pass_after_midnight_does_not_resend() {
        let mut schedule = BulletinSchedule::new();
        // Started at exactly 08:00 on a new day: one send, no second send on the next pass
        assert_eq!(schedule.due(&at(8, 0, 3)), Some("M"));
        assert_eq!(schedule.due(&at(8, 0, 3)), None);
    }
}
