//! Digital clock face: UTC and local time stacked in two rows.
//!
//! The `HH:MM:` prefix is repainted only when the hour or minute changes; the
//! two-digit seconds field is repainted every tick.

use super::ClockFace;
use crate::frames::FrameContext;
use crate::palette;
use crate::surface::{Datum, FontSize, Pen, Surface};
use chrono::Timelike;
use embedded_graphics::{pixelcolor::Rgb565, prelude::Point};

/// Top margin above the first label.
const TOP_LINE: i32 = 10;
/// Gap between rows.
const LINE_MARGIN: i32 = 3;

/// Row positions, derived from the screen size and the large font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitalLayout {
    /// Left edge of the `HH:MM:SS` readouts
    pub left: i32,
    pub utc_label: i32,
    pub utc_time: i32,
    pub local_label: i32,
    pub local_time: i32,
    pub indoor: i32,
    /// Width of `HH:MM:`, where the seconds field starts
    pub seconds_offset: i32,
    pub seconds_width: i32,
    pub row_height: i32,
}

impl DigitalLayout {
    pub fn new<S: Surface + ?Sized>(surface: &S) -> Self {
        let row_height = surface.font_height(FontSize::Large);
        let step = row_height + LINE_MARGIN;
        Self {
            left: surface.width() / 2 - surface.text_width("00:00:00", FontSize::Large) / 2,
            utc_label: TOP_LINE,
            utc_time: TOP_LINE + step,
            local_label: TOP_LINE + 2 * step,
            local_time: TOP_LINE + 3 * step,
            indoor: TOP_LINE + 4 * step,
            seconds_offset: surface.text_width("00:00:", FontSize::Large),
            seconds_width: surface.text_width("00", FontSize::Large),
            row_height,
        }
    }
}

/// What the face last painted. `None` forces a repaint of that field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DigitalState {
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct DigitalClock {
    state: DigitalState,
}

impl DigitalClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DigitalState {
        self.state
    }

    fn paint_field<S: Surface + ?Sized>(
        surface: &mut S,
        text: &str,
        at: Point,
        width: i32,
        height: i32,
        color: Rgb565,
    ) {
        surface.fill_rect(at.x, at.y, width, height, palette::DIGITAL_BG);
        let pen = Pen::new(FontSize::Large, color).background(palette::DIGITAL_BG);
        surface.draw_text(text, at, pen);
    }
}

impl ClockFace for DigitalClock {
    fn full_draw<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &mut FrameContext<'_>) {
        let layout = DigitalLayout::new(surface);
        let mid = surface.width() / 2;

        surface.fill_screen(palette::DIGITAL_BG);
        surface.draw_round_rect(0, 0, surface.width(), surface.height(), 8, palette::DIGITAL_FRAME_EDGE);

        let label = Pen::new(FontSize::Large, palette::DIGITAL_UTC).datum(Datum::TopCenter);
        surface.draw_text("UTC", Point::new(mid, layout.utc_label), label);
        let label = Pen { color: palette::DIGITAL_LOCAL, ..label };
        surface.draw_text(&ctx.moment.zone_abbreviation(), Point::new(mid, layout.local_label), label);

        if let Some(indoor) = ctx.sensor.read() {
            let text = format!(
                "Indoor {} {:.0}%",
                ctx.units.temperature(indoor.temp_c),
                indoor.humidity
            );
            let pen = Pen::new(FontSize::Small, palette::DIGITAL_INDOOR)
                .datum(Datum::TopCenter)
                .background(palette::DIGITAL_BG);
            surface.draw_text(&text, Point::new(mid, layout.indoor), pen);
        }

        self.state = DigitalState::default();
        self.partial_update(surface, ctx);
    }

    fn partial_update<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &mut FrameContext<'_>) {
        let layout = DigitalLayout::new(surface);
        let hour = ctx.moment.utc.hour();
        let minute = ctx.moment.utc.minute();
        let second = ctx.moment.utc.second();
        let rows = [
            (layout.utc_time, palette::DIGITAL_UTC),
            (layout.local_time, palette::DIGITAL_LOCAL),
        ];

        if (self.state.hour, self.state.minute) != (Some(hour), Some(minute)) {
            let prefixes = [ctx.moment.utc_hh_mm(), ctx.moment.local_hh_mm()];
            for ((row, color), prefix) in rows.iter().zip(prefixes.iter()) {
                Self::paint_field(
                    surface,
                    prefix,
                    Point::new(layout.left, *row),
                    layout.seconds_offset,
                    layout.row_height,
                    *color,
                );
            }
            self.state.hour = Some(hour);
            self.state.minute = Some(minute);
        }

        let seconds = format!("{:02}", second);
        for (row, color) in rows {
            Self::paint_field(
                surface,
                &seconds,
                Point::new(layout.left + layout.seconds_offset, row),
                layout.seconds_width,
                layout.row_height,
                color,
            );
        }
        self.state.second = Some(second);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{FixedSensor, IndoorReading, NoSensor};
    use crate::surface::RecordingSurface;
    use crate::time::{parse_zone, Moment};
    use crate::{Units, WeatherSnapshot};
    use chrono::{TimeZone, Utc};

    #[test]
    fn layout_for_128_square_panel() {
        let layout = DigitalLayout::new(&RecordingSurface::new(128, 128));
        assert_eq!(layout.left, 28);
        assert_eq!(layout.utc_label, 10);
        assert_eq!(layout.utc_time, 31);
        assert_eq!(layout.local_label, 52);
        assert_eq!(layout.local_time, 73);
        assert_eq!(layout.seconds_offset, 54);
    }

    #[test]
    fn full_draw_shows_both_zones() {
        let wx = WeatherSnapshot::default();
        let mut sensor = FixedSensor(IndoorReading {
            temp_c: 21.0,
            humidity: 40.0,
        });
        let utc = Utc.with_ymd_and_hms(2025, 7, 4, 16, 5, 9).unwrap();
        let mut ctx = FrameContext {
            weather: &wx,
            moment: Moment::new(utc, parse_zone("America/New_York")),
            units: Units::Metric,
            sensor: &mut sensor,
        };
        let mut clock = DigitalClock::new();
        let mut surface = RecordingSurface::new(128, 128);
        clock.full_draw(&mut surface, &mut ctx);

        let texts = surface.texts_at();
        assert!(texts.contains(&("UTC", Point::new(64, 10))));
        assert!(texts.contains(&("EDT", Point::new(64, 52))));
        assert!(texts.contains(&("16:05:", Point::new(28, 31))));
        assert!(texts.contains(&("12:05:", Point::new(28, 73))));
        assert!(texts.contains(&("09", Point::new(82, 31))));
        assert!(texts.contains(&("09", Point::new(82, 73))));
        assert!(texts.contains(&("Indoor 21.0 C 40%", Point::new(64, 94))));
        assert_eq!(
            clock.state(),
            DigitalState {
                hour: Some(16),
                minute: Some(5),
                second: Some(9),
            }
        );
    }

    #[test]
    fn seconds_tick_leaves_minutes_alone() {
        let wx = WeatherSnapshot::default();
        let mut sensor = NoSensor;
        let utc = Utc.with_ymd_and_hms(2025, 7, 4, 16, 5, 9).unwrap();
        let mut ctx = FrameContext {
            weather: &wx,
            moment: Moment::new(utc, chrono_tz::Tz::UTC),
            units: Units::Metric,
            sensor: &mut sensor,
        };
        let mut clock = DigitalClock::new();
        let mut surface = RecordingSurface::new(128, 128);
        clock.full_draw(&mut surface, &mut ctx);

        surface.clear_ops();
        ctx.moment = Moment::new(utc + chrono::Duration::seconds(1), chrono_tz::Tz::UTC);
        clock.partial_update(&mut surface, &mut ctx);
        assert_eq!(surface.texts(), vec!["10", "10"]);
    }

    #[test]
    fn same_minute_an_hour_later_repaints_the_hours() {
        let wx = WeatherSnapshot::default();
        let mut sensor = NoSensor;
        let utc = Utc.with_ymd_and_hms(2025, 7, 4, 16, 5, 9).unwrap();
        let mut ctx = FrameContext {
            weather: &wx,
            moment: Moment::new(utc, chrono_tz::Tz::UTC),
            units: Units::Metric,
            sensor: &mut sensor,
        };
        let mut clock = DigitalClock::new();
        let mut surface = RecordingSurface::new(128, 128);
        clock.full_draw(&mut surface, &mut ctx);

        surface.clear_ops();
        ctx.moment = Moment::new(utc + chrono::Duration::hours(1), chrono_tz::Tz::UTC);
        clock.partial_update(&mut surface, &mut ctx);
        assert_eq!(surface.texts(), vec!["17:05:", "17:05:", "09", "09"]);
        assert_eq!(clock.state().hour, Some(17));
    }
}
