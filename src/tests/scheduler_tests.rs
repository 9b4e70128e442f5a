//! Frame rotation and clock tick gating.

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use std::time::{Duration, Instant};
use wx_frame_lib::clock::{Clock, ClockKind, HandMotion};
use wx_frame_lib::frames::{FrameContext, FrameId};
use wx_frame_lib::scheduler::{FrameCatalog, FrameScheduler, FrameTiming};
use wx_frame_lib::sensor::NoSensor;
use wx_frame_lib::surface::{DrawOp, RecordingSurface};
use wx_frame_lib::time::Moment;
use wx_frame_lib::{palette, Units, WeatherSnapshot};

fn moment() -> Moment {
    Moment::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(), Tz::UTC)
}

fn scheduler_with_clock() -> FrameScheduler {
    FrameScheduler::new(
        FrameCatalog::new(true),
        Some(Clock::new(ClockKind::Digital, HandMotion::Stepped)),
        FrameTiming::default(),
    )
}

/// Advancing walks the catalog 1..=n and wraps back to 1.
#[test]
fn cursor_cycles_through_catalog() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let mut ctx = FrameContext {
        weather: &wx,
        moment: moment(),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut surface = RecordingSurface::new(128, 128);
    let mut scheduler = scheduler_with_clock();
    let now = Instant::now();

    assert_eq!(scheduler.cursor(), 0);
    assert_eq!(scheduler.current_frame(), None);

    let cursors: Vec<usize> = (0..9)
        .map(|_| {
            scheduler.advance_frame(now, &mut surface, &mut ctx);
            scheduler.cursor()
        })
        .collect();
    assert_eq!(cursors, vec![1, 2, 3, 4, 1, 2, 3, 4, 1]);
    assert_eq!(scheduler.current_frame(), Some(FrameId::Weather1));
}

/// The tick timer runs exactly while the clock frame is showing.
#[test]
fn tick_timer_follows_clock_frame() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let mut ctx = FrameContext {
        weather: &wx,
        moment: moment(),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut surface = RecordingSurface::new(128, 128);
    let mut scheduler = scheduler_with_clock();
    let now = Instant::now();

    for _ in 0..2 {
        for expected in [FrameId::Weather1, FrameId::Weather2, FrameId::Almanac] {
            assert_eq!(scheduler.advance_frame(now, &mut surface, &mut ctx), Some(expected));
            assert!(!scheduler.tick_running(), "{:?} must not tick", expected);
        }
        assert_eq!(scheduler.advance_frame(now, &mut surface, &mut ctx), Some(FrameId::Clock));
        assert!(scheduler.tick_running());
    }
}

/// Entering the clock frame fully draws the face.
#[test]
fn clock_frame_full_draw_on_entry() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let mut ctx = FrameContext {
        weather: &wx,
        moment: moment(),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut surface = RecordingSurface::new(128, 128);
    let mut scheduler = FrameScheduler::new(
        FrameCatalog::from_frames(vec![FrameId::Clock]),
        Some(Clock::new(ClockKind::Analog, HandMotion::Stepped)),
        FrameTiming::default(),
    );

    scheduler.advance_frame(Instant::now(), &mut surface, &mut ctx);
    assert_eq!(surface.ops()[0], DrawOp::FillScreen(palette::ANALOG_FRAME_BG));
}

/// Polling runs the advance before the tick, each on its own pace.
#[test]
fn poll_interleaves_advance_and_tick() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let mut ctx = FrameContext {
        weather: &wx,
        moment: moment(),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut surface = RecordingSurface::new(128, 128);
    let mut scheduler = scheduler_with_clock();
    let t0 = Instant::now();
    let at = |secs: u64| t0 + Duration::from_secs(secs);

    // Nothing happens before start
    assert_eq!(scheduler.poll(at(60), &mut surface, &mut ctx).advanced_to, None);

    scheduler.start(t0);
    assert_eq!(scheduler.poll(at(4), &mut surface, &mut ctx).advanced_to, None);
    for (secs, frame) in [
        (5, FrameId::Weather1),
        (10, FrameId::Weather2),
        (15, FrameId::Almanac),
        (20, FrameId::Clock),
    ] {
        let pass = scheduler.poll(at(secs), &mut surface, &mut ctx);
        assert_eq!(pass.advanced_to, Some(frame));
        assert!(!pass.ticked, "tick never fires on the advance pass");
    }

    for secs in 21..=24 {
        let pass = scheduler.poll(at(secs), &mut surface, &mut ctx);
        assert_eq!(pass.advanced_to, None);
        assert!(pass.ticked, "clock ticks at {} s", secs);
    }

    let pass = scheduler.poll(at(25), &mut surface, &mut ctx);
    assert_eq!(pass.advanced_to, Some(FrameId::Weather1));
    assert!(!pass.ticked);
    assert!(!scheduler.poll(at(26), &mut surface, &mut ctx).ticked);
}

#[test]
fn empty_catalog_advance_is_a_no_op() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let mut ctx = FrameContext {
        weather: &wx,
        moment: moment(),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut surface = RecordingSurface::new(128, 128);
    let mut scheduler =
        FrameScheduler::new(FrameCatalog::from_frames(Vec::new()), None, FrameTiming::default());

    assert_eq!(scheduler.advance_frame(Instant::now(), &mut surface, &mut ctx), None);
    assert_eq!(scheduler.cursor(), 0);
    assert!(surface.ops().is_empty());
}

/// A clock slot with no face still arms the tick, which then does nothing.
#[test]
fn clock_slot_without_face_draws_nothing() {
    let wx = WeatherSnapshot::default();
    let mut sensor = NoSensor;
    let mut ctx = FrameContext {
        weather: &wx,
        moment: moment(),
        units: Units::Metric,
        sensor: &mut sensor,
    };
    let mut surface = RecordingSurface::new(128, 128);
    let mut scheduler = FrameScheduler::new(
        FrameCatalog::from_frames(vec![FrameId::Clock]),
        None,
        FrameTiming::default(),
    );

    scheduler.advance_frame(Instant::now(), &mut surface, &mut ctx);
    assert!(scheduler.tick_running());
    assert!(!scheduler.tick(&mut surface, &mut ctx));
    assert!(surface.ops().is_empty());
}
