//! The two weather frames: current conditions and the outlook.

use super::FrameContext;
use crate::layout::{draw_frame_panels, text_rows, HEADER_RAD, LEFT_COL, RIGHT_COL};
use crate::palette;
use crate::surface::{Datum, FontSize, Pen, Surface};
use crate::units::{self, compass_point, rain_intensity, uv_band};
use crate::Units;
use embedded_graphics::prelude::Point;

/// Top of the UV band at the bottom of the conditions frame.
const UV_BAND_Y: i32 = 109;

/// Current conditions: phrase, temperature, feels-like, rain and UV.
pub fn draw_conditions<S: Surface + ?Sized>(surface: &mut S, ctx: &FrameContext<'_>) {
    let wx = ctx.weather;
    let display = ctx.units;
    let w = surface.width();
    let h = surface.height();
    let mid = w / 2;
    let rows = text_rows(surface);

    let precip_amount = match display {
        Units::Metric => format!("{:.0} mm", wx.obs_precip_total),
        Units::Imperial => format!("{:.2} in", units::mm_to_in(wx.obs_precip_total)),
    };
    let uv = uv_band(wx.obs_uv);

    draw_frame_panels(surface, palette::WX_TOP_BG, palette::WX_BOTTOM_BG);

    let title = Pen::new(FontSize::Large, palette::WX_TOP_TEXT).datum(Datum::TopCenter);
    surface.draw_text("Weather", Point::new(mid, rows[0]), title);

    // Long phrase in the large font, then the small font, then the short phrase
    let phrase_at = Point::new(mid, rows[1]);
    if surface.text_width(&wx.for_phrase_long, FontSize::Large) < w {
        surface.draw_text(&wx.for_phrase_long, phrase_at, title);
    } else if surface.text_width(&wx.for_phrase_long, FontSize::Small) < w {
        let small = Pen { font: FontSize::Small, ..title };
        surface.draw_text(&wx.for_phrase_long, phrase_at, small);
    } else {
        surface.draw_text(&wx.for_phrase_short, phrase_at, title);
    }

    let left = Pen::new(FontSize::Large, palette::WX_BOTTOM_TEXT);
    let right = left.datum(Datum::TopRight);
    surface.draw_text("Temp", Point::new(LEFT_COL, rows[2]), left);
    surface.draw_text("Feel", Point::new(LEFT_COL, rows[3]), left);
    surface.draw_text("Rain", Point::new(LEFT_COL, rows[4]), left);
    surface.draw_text(&display.temperature(wx.obs_temp), Point::new(RIGHT_COL, rows[2]), right);
    surface.draw_text(
        &display.temperature_whole(wx.feels_like()),
        Point::new(RIGHT_COL, rows[3]),
        right,
    );
    surface.draw_text(&precip_amount, Point::new(RIGHT_COL, rows[4]), right);
    surface.draw_text(
        rain_intensity(wx.obs_precip_rate),
        Point::new(RIGHT_COL, rows[5]),
        right,
    );

    surface.fill_rect(0, UV_BAND_Y, w, HEADER_RAD, uv.background);
    surface.fill_round_rect(0, h - 2 * HEADER_RAD, w, 2 * HEADER_RAD, HEADER_RAD, uv.background);
    let uv_pen = Pen::new(FontSize::Large, uv.text);
    surface.draw_text(
        &format!("UV {}", uv.index),
        Point::new(LEFT_COL, rows[6]),
        uv_pen,
    );
    surface.draw_text(uv.label, Point::new(RIGHT_COL, rows[6]), uv_pen.datum(Datum::TopRight));
}

/// Outlook: forecast high/low, wind, gust, cloud cover, pressure, humidity.
pub fn draw_outlook<S: Surface + ?Sized>(surface: &mut S, ctx: &FrameContext<'_>) {
    let wx = ctx.weather;
    let mid = surface.width() / 2;
    let rows = text_rows(surface);

    let (high_low, wind, gust, pressure) = match ctx.units {
        Units::Metric => (
            format!("{:.1}/{:.1}°C", wx.for_temp_max, wx.for_temp_min),
            format!("{:.0} kph", wx.obs_wind_speed),
            format!("{:.0} kph", wx.obs_wind_gust),
            format!("{:.0} mb", wx.obs_pressure),
        ),
        Units::Imperial => (
            format!(
                "{:.0}/{:.0}°F",
                units::c_to_f(wx.for_temp_max),
                units::c_to_f(wx.for_temp_min)
            ),
            format!("{:.0} mph", units::km_to_miles(wx.obs_wind_speed)),
            format!("{:.0} mph", units::km_to_miles(wx.obs_wind_gust)),
            format!("{:.2} in", units::hpa_to_inhg(wx.obs_pressure)),
        ),
    };

    draw_frame_panels(surface, palette::WX_TOP_BG, palette::WX_BOTTOM_BG);

    let title = Pen::new(FontSize::Large, palette::WX_TOP_TEXT).datum(Datum::TopCenter);
    surface.draw_text("Forecast Hi/Lo", Point::new(mid, rows[0]), title);
    surface.draw_text(&high_low, Point::new(mid, rows[1]), title);

    let left = Pen::new(FontSize::Large, palette::WX_BOTTOM_TEXT);
    let right = left.datum(Datum::TopRight);
    surface.draw_text("Gust", Point::new(LEFT_COL, rows[3]), left);
    surface.draw_text("Cloud", Point::new(LEFT_COL, rows[4]), left);
    surface.draw_text("BP", Point::new(LEFT_COL, rows[5]), left);
    surface.draw_text("Humid", Point::new(LEFT_COL, rows[6]), left);

    let wind_line = format!("{} {}", compass_point(wx.obs_wind_dir), wind);
    surface.draw_text(&wind_line, Point::new(RIGHT_COL, rows[2]), right);
    surface.draw_text(&gust, Point::new(RIGHT_COL, rows[3]), right);
    surface.draw_text(&format!("{}%", wx.for_cloud), Point::new(RIGHT_COL, rows[4]), right);
    surface.draw_text(&pressure, Point::new(RIGHT_COL, rows[5]), right);
    surface.draw_text(
        &format!("{:.0}%", wx.obs_humidity),
        Point::new(RIGHT_COL, rows[6]),
        right,
    );
}
