//! # Frame Scheduler
//!
//! Walks the frame catalog in order, one full redraw per advance, and runs the
//! one-second clock tick only while the clock frame is on screen.
//!
//! ## Timers
//! - **Advance**: every `screen_duration`, move the cursor and fully redraw
//! - **Tick**: every `tick_interval`, partially redraw the clock. Armed on
//!   entering the clock frame, disarmed on leaving it
//!
//! The cursor is 1-based and 0 before the first advance. Advancing past the
//! last frame wraps to frame 1.

use crate::clock::{Clock, ClockFace, ClockKind, HandMotion};
use crate::config::Config;
use crate::frames::{almanac, weather, FrameContext, FrameId};
use crate::surface::Surface;
use crate::timer::Timer;
use std::time::{Duration, Instant};

/// The ordered list of frames shown in rotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCatalog {
    frames: Vec<FrameId>,
}

impl FrameCatalog {
    /// Weather, outlook and almanac, then the clock when one is enabled.
    pub fn new(clock_enabled: bool) -> Self {
        let mut frames = vec![FrameId::Weather1, FrameId::Weather2, FrameId::Almanac];
        if clock_enabled {
            frames.push(FrameId::Clock);
        }
        Self { frames }
    }

    pub fn from_frames(frames: Vec<FrameId>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at a 1-based position.
    pub fn get(&self, position: usize) -> Option<FrameId> {
        position.checked_sub(1).and_then(|i| self.frames.get(i).copied())
    }
}

/// Paces of the two display timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTiming {
    pub screen_duration: Duration,
    pub tick_interval: Duration,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self {
            screen_duration: Duration::from_secs(5),
            tick_interval: Duration::from_secs(1),
        }
    }
}

/// What one poll of the scheduler did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FramePass {
    /// Frame that was fully redrawn, if the advance timer fired
    pub advanced_to: Option<FrameId>,
    /// Whether the clock got a partial update
    pub ticked: bool,
}

pub struct FrameScheduler {
    catalog: FrameCatalog,
    cursor: usize,
    clock: Option<Clock>,
    advance_timer: Timer,
    tick_timer: Timer,
}

impl FrameScheduler {
    pub fn new(catalog: FrameCatalog, clock: Option<Clock>, timing: FrameTiming) -> Self {
        Self {
            catalog,
            cursor: 0,
            clock,
            advance_timer: Timer::recurring(timing.screen_duration),
            tick_timer: Timer::recurring(timing.tick_interval),
        }
    }

    /// Catalog, clock face and timing as configured.
    pub fn from_config(config: &Config) -> Self {
        let kind = ClockKind::select(config.display.analog_clock, config.display.digital_clock);
        let motion: HandMotion = config.display.hand_motion;
        let timing = FrameTiming {
            screen_duration: Duration::from_secs(config.display.screen_duration_secs),
            tick_interval: Duration::from_millis(config.display.tick_millis),
        };
        Self::new(
            FrameCatalog::new(kind.is_some()),
            kind.map(|kind| Clock::new(kind, motion)),
            timing,
        )
    }

    /// Arm the advance timer. The first frame appears one screen duration later.
    pub fn start(&mut self, now: Instant) {
        self.advance_timer.start(now);
    }

    /// Run whichever display timers are due: advance first, then tick.
    pub fn poll<S: Surface + ?Sized>(
        &mut self,
        now: Instant,
        surface: &mut S,
        ctx: &mut FrameContext<'_>,
    ) -> FramePass {
        let mut pass = FramePass::default();
        if self.advance_timer.update(now) {
            pass.advanced_to = self.advance_frame(now, surface, ctx);
        }
        if self.tick_timer.update(now) {
            pass.ticked = self.tick(surface, ctx);
        }
        pass
    }

    /// Move to the next frame and fully redraw it. Returns the frame drawn.
    pub fn advance_frame<S: Surface + ?Sized>(
        &mut self,
        now: Instant,
        surface: &mut S,
        ctx: &mut FrameContext<'_>,
    ) -> Option<FrameId> {
        if self.catalog.is_empty() {
            log::debug!("Frame catalog is empty, nothing to show");
            return None;
        }
        self.cursor = self.cursor % self.catalog.len() + 1;
        let frame = self.catalog.get(self.cursor)?;
        log::debug!("Frame {} of {}: {}", self.cursor, self.catalog.len(), frame.name());

        match frame {
            FrameId::Weather1 => {
                self.tick_timer.stop();
                weather::draw_conditions(surface, ctx);
            }
            FrameId::Weather2 => {
                self.tick_timer.stop();
                weather::draw_outlook(surface, ctx);
            }
            FrameId::Almanac => {
                self.tick_timer.stop();
                almanac::draw_almanac(surface, ctx);
            }
            FrameId::Clock => {
                self.tick_timer.start(now);
                if let Some(clock) = self.clock.as_mut() {
                    clock.full_draw(surface, ctx);
                }
            }
        }
        Some(frame)
    }

    /// Partial clock update. Does nothing unless the clock frame is showing.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &mut FrameContext<'_>) -> bool {
        if self.current_frame() != Some(FrameId::Clock) {
            return false;
        }
        match self.clock.as_mut() {
            Some(clock) => {
                clock.partial_update(surface, ctx);
                true
            }
            None => false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_frame(&self) -> Option<FrameId> {
        self.catalog.get(self.cursor)
    }

    pub fn tick_running(&self) -> bool {
        self.tick_timer.is_running()
    }

    pub fn catalog(&self) -> &FrameCatalog {
        &self.catalog
    }

    pub fn clock(&self) -> Option<&Clock> {
        self.clock.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_appends_clock_when_enabled() {
        assert_eq!(FrameCatalog::new(false).len(), 3);
        let catalog = FrameCatalog::new(true);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(4), Some(FrameId::Clock));
        assert_eq!(catalog.get(0), None);
        assert_eq!(catalog.get(5), None);
    }

    #[test]
    fn default_timing() {
        let timing = FrameTiming::default();
        assert_eq!(timing.screen_duration, Duration::from_secs(5));
        assert_eq!(timing.tick_interval, Duration::from_secs(1));
    }

    #[test]
    fn from_config_selects_digital_over_analog() {
        let mut config = Config::default();
        config.display.analog_clock = true;
        config.display.digital_clock = true;
        let scheduler = FrameScheduler::from_config(&config);
        assert_eq!(scheduler.catalog().len(), 4);
        assert_eq!(scheduler.clock().map(Clock::kind), Some(ClockKind::Digital));

        config.display.analog_clock = false;
        config.display.digital_clock = false;
        let scheduler = FrameScheduler::from_config(&config);
        assert_eq!(scheduler.catalog().len(), 3);
        assert!(scheduler.clock().is_none());
        assert_eq!(scheduler.cursor(), 0);
    }
}
