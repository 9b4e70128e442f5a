//! Incremental redraw behaviour of the two clock faces.

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use embedded_graphics::pixelcolor::Rgb565;
use wx_frame_lib::clock::analog::DialGeometry;
use wx_frame_lib::clock::{AnalogClock, ClockFace, DigitalClock, HandAngles, HandMotion};
use wx_frame_lib::frames::FrameContext;
use wx_frame_lib::sensor::NoSensor;
use wx_frame_lib::surface::{DrawOp, RecordingSurface};
use wx_frame_lib::time::{parse_zone, Moment};
use wx_frame_lib::{palette, Units, WeatherSnapshot};

fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, h, m, s).unwrap()
}

/// Second hand at :00, :30 and the next :00 sits at 0°, 180°, 0°, and each
/// erase paints over exactly the angle drawn on the previous update.
#[test]
fn second_hand_angles_and_erase_targets() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let mut ctx = FrameContext {
        weather: &wx,
        moment: Moment::new(utc(0, 0, 0), Tz::UTC),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut clock = AnalogClock::new(HandMotion::Stepped);
    let mut surface = RecordingSurface::new(128, 128);
    let dial = DialGeometry::new(128, 128);

    let mut previous: Option<f32> = None;
    for (time, expected) in [(utc(0, 0, 0), 0.0), (utc(0, 0, 30), 180.0), (utc(0, 1, 0), 0.0)] {
        ctx.moment = Moment::new(time, Tz::UTC);
        surface.clear_ops();
        clock.partial_update(&mut surface, &mut ctx);

        assert_eq!(HandAngles::at(&time, HandMotion::Stepped).second, expected);
        assert_eq!(clock.state().second, Some(expected));

        let erased: Vec<&DrawOp> = surface
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { color, .. } if *color == palette::ANALOG_DIAL_BG))
            .collect();
        match previous {
            Some(old) => {
                let tip = dial.polar(old, dial.second_hand);
                assert_eq!(
                    erased,
                    vec![&DrawOp::Line {
                        from: dial.center,
                        to: tip,
                        color: palette::ANALOG_DIAL_BG,
                    }]
                );
            }
            None => assert!(erased.is_empty()),
        }
        previous = clock.state().second;
    }
}

/// Every partial update repaints all three hands even when none moved.
#[test]
fn hands_are_redrawn_every_update() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let mut ctx = FrameContext {
        weather: &wx,
        moment: Moment::new(utc(9, 41, 7), Tz::UTC),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut clock = AnalogClock::new(HandMotion::Sweep);
    let mut surface = RecordingSurface::new(128, 128);
    clock.full_draw(&mut surface, &mut ctx);

    surface.clear_ops();
    clock.partial_update(&mut surface, &mut ctx);
    let hand = |color: Rgb565| {
        surface.count(|op| matches!(op, DrawOp::Triangle { color: c, .. } if *c == color))
    };
    assert_eq!(hand(palette::ANALOG_MIN_HAND), 1);
    assert_eq!(hand(palette::ANALOG_HOUR_HAND), 1);
    assert_eq!(hand(palette::ANALOG_DIAL_BG), 0);
}

/// Over 61 one-second updates spanning a minute boundary the digital face
/// paints HH:MM: twice per zone and the seconds every time.
#[test]
fn digital_minute_and_second_draw_counts() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let zone = parse_zone("America/New_York");
    let start = utc(12, 0, 0);
    let mut ctx = FrameContext {
        weather: &wx,
        moment: Moment::new(start, zone),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut clock = DigitalClock::new();
    let mut surface = RecordingSurface::new(128, 128);

    for s in 0..61 {
        ctx.moment = Moment::new(start + Duration::seconds(s), zone);
        clock.partial_update(&mut surface, &mut ctx);
    }

    let count = |color: Rgb565, minutes: bool| {
        surface.count(|op| match op {
            DrawOp::Text { text, pen, .. } => pen.color == color && text.ends_with(':') == minutes,
            _ => false,
        })
    };
    assert_eq!(count(palette::DIGITAL_UTC, true), 2);
    assert_eq!(count(palette::DIGITAL_LOCAL, true), 2);
    assert_eq!(count(palette::DIGITAL_UTC, false), 61);
    assert_eq!(count(palette::DIGITAL_LOCAL, false), 61);

    let texts = surface.texts();
    assert!(texts.contains(&"12:01:"));
    assert!(texts.contains(&"08:01:"));
    assert_eq!(clock.state().minute, Some(1));
    assert_eq!(clock.state().second, Some(0));
}

/// A full draw forgets the previous state, so the minutes are repainted.
#[test]
fn digital_full_draw_resets_state() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let mut ctx = FrameContext {
        weather: &wx,
        moment: Moment::new(utc(18, 30, 15), Tz::UTC),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut clock = DigitalClock::new();
    let mut surface = RecordingSurface::new(128, 128);
    clock.partial_update(&mut surface, &mut ctx);

    surface.clear_ops();
    clock.full_draw(&mut surface, &mut ctx);
    let minute_texts = surface.count(|op| matches!(op, DrawOp::Text { text, .. } if text == "18:30:"));
    assert_eq!(minute_texts, 2);
}
