//! # Unit Conversions and Weather Tables
//!
//! Pure helpers shared by the frame renderers and the telemetry formatters.
//! The weather service always reports metric values; everything imperial is
//! derived here at display or post time.

use crate::palette;
use embedded_graphics::pixelcolor::Rgb565;

pub fn c_to_f(celsius: f32) -> f32 {
    1.8 * celsius + 32.0
}

pub fn mm_to_in(mm: f32) -> f32 {
    0.0393701 * mm
}

pub fn km_to_miles(km: f32) -> f32 {
    0.621371 * km
}

pub fn hpa_to_inhg(hpa: f32) -> f32 {
    0.0295301 * hpa
}

/// Convert a 0-23 hour to the 1-12 dial hour.
pub fn to_12_hour(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Sixteen-point compass text for a wind direction in degrees.
///
/// Each point covers 22.5°, centred on its nominal bearing, so 11° is still
/// "N" and 12° is "NNE".
pub fn compass_point(degrees: f32) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized + 11.25) / 22.5) as usize % 16;
    COMPASS_POINTS[index]
}

/// Describe a rain rate in mm/h with the usual intensity words.
///
/// Buckets are half-open: exactly 2.5 mm/h is already "Moderate".
/// Negative or missing rates read as "Rate Nil".
pub fn rain_intensity(rate_mm_per_hour: f32) -> &'static str {
    if rate_mm_per_hour.is_nan() || rate_mm_per_hour < 0.0001 {
        "Rate Nil"
    } else if rate_mm_per_hour < 2.5 {
        "Light"
    } else if rate_mm_per_hour < 7.6 {
        "Moderate"
    } else if rate_mm_per_hour < 50.0 {
        "Heavy"
    } else {
        "Violent"
    }
}

/// UV risk band with the colours used to paint it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UvBand {
    /// Rounded UV index, -1 when unavailable
    pub index: i32,
    pub label: &'static str,
    pub background: Rgb565,
    pub text: Rgb565,
}

/// Classify a UV index reading.
pub fn uv_band(uv: f32) -> UvBand {
    let index = uv.round() as i32;
    let (label, background, text) = match index {
        i32::MIN..=-1 => ("N/A", palette::BLACK, palette::WHITE),
        0..=2 => ("Low", palette::GREEN, palette::BLACK),
        3..=5 => ("Moderate", palette::YELLOW, palette::BLUE),
        6..=7 => ("High", palette::OUTRAGEOUS_ORANGE, palette::YELLOW),
        8..=10 => ("Very Hi", palette::ALIZARIN_CRIMSON, palette::YELLOW),
        _ => ("Extreme", palette::MAGENTA, palette::YELLOW),
    };
    UvBand {
        index: index.max(-1),
        label,
        background,
        text,
    }
}
