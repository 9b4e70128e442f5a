//! One-time screens shown during startup: the splash and the settings summary.

use crate::clock::ClockKind;
use crate::config::Config;
use crate::palette;
use crate::surface::{Datum, FontSize, Pen, Surface};
use crate::time::Moment;
use crate::{Units, WeatherSnapshot};
use embedded_graphics::prelude::Point;

/// Product name on the splash screen.
pub const PRODUCT_NAME: &str = "WX-Frame";

pub fn draw_splash<S: Surface + ?Sized>(surface: &mut S) {
    let w = surface.width();
    let h = surface.height();
    let mid = w / 2;
    let top = 19;

    surface.fill_screen(palette::BLUE);
    let pen = Pen::new(FontSize::Large, palette::YELLOW).datum(Datum::TopCenter);
    let version = format!("v{}", env!("CARGO_PKG_VERSION"));
    let lines = [PRODUCT_NAME, "Display", "by", "IoT Kits", version.as_str()];
    for (i, line) in lines.iter().enumerate() {
        surface.draw_text(line, Point::new(mid, top + 20 * i as i32), pen);
    }
    for i in 0..4 {
        let inset = 12 - 3 * i;
        surface.draw_round_rect(inset, inset, w - 12, h - 12, 8, palette::YELLOW);
    }
}

/// Human description of the clock face in use.
pub fn clock_description(kind: Option<ClockKind>) -> &'static str {
    match kind {
        Some(ClockKind::Analog) => "Analog Clock",
        Some(ClockKind::Digital) => "Digital Clock",
        None => "No Clock",
    }
}

/// Station position, time zone and display settings, after the first fetch.
pub fn draw_data_screen<S: Surface + ?Sized>(
    surface: &mut S,
    wx: &WeatherSnapshot,
    config: &Config,
    moment: &Moment,
) {
    const LINE: i32 = 14;
    let mid = surface.width() / 2;
    let units = match Units::from_metric_flag(config.display.metric) {
        Units::Metric => "Metric",
        Units::Imperial => "Imperial",
    };
    let kind = ClockKind::select(config.display.analog_clock, config.display.digital_clock);
    let aphorism_file = config.aprs.aphorism_file.as_deref().unwrap_or("No aphorisms");

    surface.fill_screen(palette::BLACK);
    let pen = |color| Pen::new(FontSize::Small, color).datum(Datum::TopCenter);
    let rows: [(String, _); 9] = [
        ("Location:".to_string(), palette::YELLOW),
        (format!("{:.2}/{:.2}", wx.obs_lat, wx.obs_lon), palette::YELLOW),
        (wx.obs_neighborhood.clone(), palette::YELLOW),
        (format!("Time Zone:{}", moment.zone_abbreviation()), palette::GREEN),
        (config.station.timezone.clone(), palette::GREEN),
        ("Units & Duration:".to_string(), palette::WHITE),
        (
            format!("{} {} seconds", units, config.display.screen_duration_secs),
            palette::WHITE,
        ),
        (clock_description(kind).to_string(), palette::WHITE),
        (aphorism_file.to_string(), palette::RED),
    ];
    for (i, (text, color)) in rows.iter().enumerate() {
        surface.draw_text(text, Point::new(mid, LINE * i as i32), pen(*color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    #[test]
    fn splash_names_product_and_version() {
        let mut surface = RecordingSurface::new(128, 128);
        draw_splash(&mut surface);
        let texts = surface.texts();
        assert_eq!(texts[0], PRODUCT_NAME);
        assert_eq!(texts[4], format!("v{}", env!("CARGO_PKG_VERSION")));
        let frames = surface.count(|op| matches!(op, DrawOp::RoundRect { filled: false, .. }));
        assert_eq!(frames, 4);
    }

    #[test]
    fn data_screen_summarises_settings() {
        let mut config = Config::default();
        config.display.digital_clock = true;
        let wx = WeatherSnapshot {
            obs_lat: 37.2712,
            obs_lon: -76.7079,
            obs_neighborhood: "Williamsburg".to_string(),
            ..Default::default()
        };
        let moment = Moment::new(Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(), Tz::America__New_York);
        let mut surface = RecordingSurface::new(128, 128);
        draw_data_screen(&mut surface, &wx, &config, &moment);

        let texts = surface.texts_at();
        assert_eq!(texts[1], ("37.27/-76.71", Point::new(64, 14)));
        assert_eq!(texts[3].0, "Time Zone:EST");
        assert_eq!(texts[4].0, "America/New_York");
        assert_eq!(texts[6].0, "Imperial 5 seconds");
        assert_eq!(texts[7].0, "Digital Clock");
        assert_eq!(texts[8].0, "No aphorisms");
    }
}
