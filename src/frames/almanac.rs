//! Almanac frame: date, sunrise and sunset, moon phase.

use super::FrameContext;
use crate::layout::{draw_frame_panels, draw_moon_face, text_rows};
use crate::lunar::{moon_phase, phase_name};
use crate::palette;
use crate::surface::{Datum, FontSize, Pen, Surface};
use crate::time::local_from_unix;
use crate::units::to_12_hour;
use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use embedded_graphics::prelude::Point;

/// Top of the moon panel.
const MOON_PANEL_Y: i32 = 90;
const MOON_RADIUS: i32 = 15;

/// Format a local time as `"Rise 6:45a"` style text with the given prefix.
fn sun_time(prefix: &str, time: Option<DateTime<Tz>>) -> String {
    match time {
        Some(t) => {
            let suffix = if t.hour() >= 12 { 'p' } else { 'a' };
            format!("{}{:2}:{:02}{}", prefix, to_12_hour(t.hour()), t.minute(), suffix)
        }
        None => format!("{}--:--", prefix),
    }
}

pub fn draw_almanac<S: Surface + ?Sized>(surface: &mut S, ctx: &FrameContext<'_>) {
    let zone = ctx.moment.local.timezone();
    let w = surface.width();
    let h = surface.height();
    let mid = w / 2;
    let rows = text_rows(surface);

    let sunrise = sun_time("Rise", local_from_unix(ctx.weather.for_sunrise, zone));
    let sunset = sun_time("Set ", local_from_unix(ctx.weather.for_sunset, zone));
    let fraction = moon_phase(ctx.moment.unix());
    let phase = phase_name(fraction);

    draw_frame_panels(surface, palette::ALM_TOP_BG, palette::ALM_BOTTOM_BG);

    let top = Pen::new(FontSize::Large, palette::ALM_TOP_TEXT).datum(Datum::TopCenter);
    surface.draw_text("Almanac", Point::new(mid, rows[0]), top);
    let date = ctx.moment.local.format("%a %b %-d").to_string();
    surface.draw_text(&date, Point::new(mid, rows[1]), top);

    let bottom = Pen::new(FontSize::Large, palette::ALM_BOTTOM_TEXT).datum(Datum::TopCenter);
    surface.draw_text("SUN", Point::new(mid, rows[2]), bottom);
    surface.draw_text(&sunrise, Point::new(mid, rows[3]), bottom);
    surface.draw_text(&sunset, Point::new(mid, rows[4]), bottom);

    surface.fill_rect(0, MOON_PANEL_Y, w, h - MOON_PANEL_Y, palette::ALM_MOON_BG);
    draw_moon_face(
        surface,
        20,
        h - 19,
        MOON_RADIUS,
        fraction,
        palette::ALM_MOON_FACE,
        palette::ALM_MOON_BG,
    );
    let moon_pen = Pen::new(FontSize::Large, palette::ALM_TOP_TEXT)
        .datum(Datum::TopRight)
        .background(palette::ALM_MOON_BG);
    surface.draw_text(phase.first, Point::new(w - 6, rows[5]), moon_pen);
    surface.draw_text(phase.second, Point::new(w - 6, rows[6]), moon_pen);
}
