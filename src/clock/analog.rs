//! Analog clock face with 24-hour numerals.
//!
//! The dial carries AM numerals 1-12 on the outer ring and PM numerals 13-24
//! on an inner ring. Hands are redrawn every second; a hand is erased (painted
//! in the dial colour at its previous angle) only when its angle changed.

use super::{ClockFace, HandMotion};
use crate::frames::FrameContext;
use crate::palette;
use crate::surface::{Datum, FontSize, Pen, Surface};
use chrono::Timelike;
use embedded_graphics::prelude::Point;

/// Angular distance from an hour mark within which an erased second hand
/// is taken to have crossed that PM numeral.
const PM_REPAIR_DEG: f32 = 10.0;

/// Radii of the dial rings, derived from the screen size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialGeometry {
    pub center: Point,
    pub dial_r: i32,
    pub am_numeral_r: i32,
    pub pm_numeral_r: i32,
    pub outer_tick_r: i32,
    pub minute_tick_r: i32,
    pub inner_tick_r: i32,
    pub minute_hand: i32,
    pub second_dot_r: i32,
    pub second_hand: i32,
    pub hour_hand: i32,
    pub hub_r: i32,
}

impl DialGeometry {
    pub fn new(width: i32, height: i32) -> Self {
        let dial_r = height / 2;
        let am_numeral_r = dial_r - 6;
        let pm_numeral_r = dial_r - 27;
        let outer_tick_r = am_numeral_r - 6;
        let minute_tick_r = outer_tick_r - 3;
        let inner_tick_r = minute_tick_r - 3;
        let minute_hand = inner_tick_r;
        let second_dot_r = 3;
        Self {
            center: Point::new(width / 2, height / 2),
            dial_r,
            am_numeral_r,
            pm_numeral_r,
            outer_tick_r,
            minute_tick_r,
            inner_tick_r,
            minute_hand,
            second_dot_r,
            second_hand: inner_tick_r - second_dot_r - 1,
            hour_hand: 3 * minute_hand / 4,
            hub_r: 4,
        }
    }

    /// Point at `radius` along a bearing measured clockwise from 12 o'clock.
    pub fn polar(&self, degrees: f32, radius: i32) -> Point {
        let rad = degrees.to_radians();
        Point::new(
            self.center.x + (rad.sin() * radius as f32).round() as i32,
            self.center.y - (rad.cos() * radius as f32).round() as i32,
        )
    }

    /// Triangle of a tapered hand: base across the hub, tip at `length`.
    fn hand_triangle(&self, degrees: f32, length: i32) -> [Point; 3] {
        [
            self.polar(degrees + 90.0, self.hub_r),
            self.polar(degrees - 90.0, self.hub_r),
            self.polar(degrees, length),
        ]
    }
}

/// Hand bearings in degrees clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    pub second: f32,
    pub minute: f32,
    pub hour: f32,
}

impl HandAngles {
    pub fn at<T: Timelike>(time: &T, motion: HandMotion) -> Self {
        let second = time.second() as f32;
        let minute = time.minute() as f32;
        let hour = (time.hour() % 12) as f32;
        match motion {
            HandMotion::Stepped => Self {
                second: second * 6.0,
                minute: minute * 6.0,
                hour: hour * 30.0 + (time.minute() / 12) as f32 * 6.0,
            },
            HandMotion::Sweep => Self {
                second: second * 6.0,
                minute: minute * 6.0 + second * 0.1,
                hour: hour * 30.0 + minute * 0.5,
            },
        }
    }
}

/// Angles of the hands currently on screen. `None` until drawn after a full draw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandState {
    pub second: Option<f32>,
    pub minute: Option<f32>,
    pub hour: Option<f32>,
}

#[derive(Clone, Debug)]
pub struct AnalogClock {
    motion: HandMotion,
    state: HandState,
}

impl AnalogClock {
    pub fn new(motion: HandMotion) -> Self {
        Self {
            motion,
            state: HandState::default(),
        }
    }

    pub fn state(&self) -> HandState {
        self.state
    }

    fn draw_dial<S: Surface + ?Sized>(&self, surface: &mut S, g: &DialGeometry) {
        surface.fill_circle(g.center, g.dial_r, palette::ANALOG_DIAL_BG);
        surface.draw_circle(g.center, g.dial_r + 1, palette::ANALOG_DIAL_EDGE);

        for tick in 1..=60 {
            let degrees = (6 * tick) as f32;
            let tick_r = if tick % 5 == 0 {
                let hour = tick / 5;
                let am = Pen::new(FontSize::Small, palette::ANALOG_AM_NUMERALS).datum(Datum::MiddleCenter);
                surface.draw_text(&hour.to_string(), g.polar(degrees, g.am_numeral_r), am);
                self.draw_pm_numeral(surface, g, hour);
                g.inner_tick_r
            } else {
                g.minute_tick_r
            };
            surface.draw_line(
                g.polar(degrees, g.outer_tick_r),
                g.polar(degrees, tick_r),
                palette::ANALOG_DIAL_TICKS,
            );
        }
    }

    /// Draw the PM numeral for dial hour 1-12 (labelled 13-24).
    fn draw_pm_numeral<S: Surface + ?Sized>(&self, surface: &mut S, g: &DialGeometry, hour: i32) {
        let pen = Pen::new(FontSize::Small, palette::ANALOG_PM_NUMERALS).datum(Datum::MiddleCenter);
        let degrees = (hour * 30) as f32;
        surface.draw_text(&(hour + 12).to_string(), g.polar(degrees, g.pm_numeral_r), pen);
    }

    /// Repaint the PM numeral an erased second hand at `degrees` ran across, if any.
    fn repair_pm_numeral<S: Surface + ?Sized>(&self, surface: &mut S, g: &DialGeometry, degrees: f32) {
        let nearest = (degrees / 30.0).round();
        if (degrees - nearest * 30.0).abs() <= PM_REPAIR_DEG {
            let hour = match nearest as i32 % 12 {
                0 => 12,
                h => h,
            };
            self.draw_pm_numeral(surface, g, hour);
        }
    }

    fn draw_second_hand<S: Surface + ?Sized>(
        surface: &mut S,
        g: &DialGeometry,
        degrees: f32,
        color: embedded_graphics::pixelcolor::Rgb565,
    ) {
        let tip = g.polar(degrees, g.second_hand);
        surface.draw_line(g.center, tip, color);
        surface.fill_circle(tip, g.second_dot_r, color);
    }
}

impl ClockFace for AnalogClock {
    fn full_draw<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &mut FrameContext<'_>) {
        let g = DialGeometry::new(surface.width(), surface.height());
        surface.fill_screen(palette::ANALOG_FRAME_BG);
        surface.draw_round_rect(0, 0, surface.width(), surface.height(), 8, palette::ANALOG_FRAME_EDGE);
        self.draw_dial(surface, &g);

        let label = Pen::new(FontSize::Small, palette::ANALOG_TZ).background(palette::ANALOG_FRAME_BG);
        surface.draw_text(&ctx.moment.zone_abbreviation(), Point::new(0, 0), label);
        let meridiem = if ctx.moment.is_pm() { "PM" } else { "AM" };
        surface.draw_text(
            meridiem,
            Point::new(surface.width() - 2, 0),
            label.datum(Datum::TopRight),
        );

        if let Some(indoor) = ctx.sensor.read() {
            let pen = Pen::new(FontSize::Small, palette::ANALOG_INDOOR)
                .datum(Datum::TopCenter)
                .background(palette::ANALOG_DIAL_BG);
            let temp = ctx.units.temperature(indoor.temp_c);
            surface.draw_text(&temp, Point::new(g.center.x, g.center.y - 30), pen);
            let humidity = format!("{:.0}%", indoor.humidity);
            surface.draw_text(&humidity, Point::new(g.center.x, g.center.y + 15), pen);
        }

        self.state = HandState::default();
        self.partial_update(surface, ctx);
    }

    fn partial_update<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &mut FrameContext<'_>) {
        let g = DialGeometry::new(surface.width(), surface.height());
        let angles = HandAngles::at(&ctx.moment.local, self.motion);

        if let Some(old) = self.state.second.filter(|&old| old != angles.second) {
            Self::draw_second_hand(surface, &g, old, palette::ANALOG_DIAL_BG);
            self.repair_pm_numeral(surface, &g, old);
        }
        Self::draw_second_hand(surface, &g, angles.second, palette::ANALOG_SEC_HAND);
        self.state.second = Some(angles.second);

        if let Some(old) = self.state.minute.filter(|&old| old != angles.minute) {
            let [a, b, c] = g.hand_triangle(old, g.minute_hand);
            surface.fill_triangle(a, b, c, palette::ANALOG_DIAL_BG);
        }
        let [a, b, c] = g.hand_triangle(angles.minute, g.minute_hand);
        surface.fill_triangle(a, b, c, palette::ANALOG_MIN_HAND);
        self.state.minute = Some(angles.minute);

        if let Some(old) = self.state.hour.filter(|&old| old != angles.hour) {
            let [a, b, c] = g.hand_triangle(old, g.hour_hand);
            surface.fill_triangle(a, b, c, palette::ANALOG_DIAL_BG);
        }
        let [a, b, c] = g.hand_triangle(angles.hour, g.hour_hand);
        surface.fill_triangle(a, b, c, palette::ANALOG_HOUR_HAND);
        self.state.hour = Some(angles.hour);

        surface.fill_circle(g.center, g.hub_r, palette::ANALOG_HUB);
        surface.fill_circle(g.center, 1, palette::ANALOG_DIAL_BG);
    }
}
