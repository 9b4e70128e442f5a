//! # Frame Renderers
//!
//! Stateless full-screen panels. Each visit repaints the whole screen from the
//! current [`WeatherSnapshot`] and wall-clock time, so nothing needs erasing.
//!
//! The clock frame lives in [`crate::clock`] because it is the one frame with
//! incremental updates between visits.

use crate::sensor::IndoorSensor;
use crate::time::Moment;
use crate::{Units, WeatherSnapshot};

pub mod almanac;
pub mod weather;

/// Everything a renderer may read while drawing.
pub struct FrameContext<'a> {
    pub weather: &'a WeatherSnapshot,
    pub moment: Moment,
    pub units: Units,
    /// Only read during full draws.
    pub sensor: &'a mut dyn IndoorSensor,
}

/// Entries of the frame catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameId {
    /// Conditions: phrase, temperature, rain, UV
    Weather1,
    /// Outlook: forecast high/low, wind, cloud, pressure, humidity
    Weather2,
    /// Date, sunrise/sunset, moon
    Almanac,
    /// Whichever clock face was selected at startup
    Clock,
}

impl FrameId {
    pub fn name(self) -> &'static str {
        match self {
            FrameId::Weather1 => "weather",
            FrameId::Weather2 => "forecast",
            FrameId::Almanac => "almanac",
            FrameId::Clock => "clock",
        }
    }
}
