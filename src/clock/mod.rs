//! # Clock Faces
//!
//! The clock frame is the only frame that changes while it is on screen. It
//! has two render modes:
//!
//! - **Full draw**: repaint the whole face when the frame is entered
//! - **Partial update**: once per second, erase and repaint only what moved
//!
//! Each face keeps the state of what it last drew, so a partial update knows
//! what to erase. A full draw clears the screen and forgets that state.
//!
//! Exactly one face is selected at startup from the configuration; when both
//! are enabled the digital face wins.

use crate::frames::FrameContext;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

pub mod analog;
pub mod digital;

pub use analog::{AnalogClock, HandAngles, HandState};
pub use digital::{DigitalClock, DigitalState};

/// Two-mode render contract shared by the clock faces.
pub trait ClockFace {
    /// Repaint the entire face, then draw the current time.
    fn full_draw<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &mut FrameContext<'_>);
    /// Repaint only the parts of the face that changed since the last draw.
    fn partial_update<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &mut FrameContext<'_>);
}

/// How the analog minute and hour hands move between whole units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandMotion {
    /// Minute hand jumps each minute; hour hand moves 6° every 12 minutes
    #[default]
    Stepped,
    /// Minute hand creeps with the seconds; hour hand with the minutes
    Sweep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockKind {
    Analog,
    Digital,
}

impl ClockKind {
    /// Choose the face from the configuration flags. Digital wins when both are set.
    pub fn select(analog: bool, digital: bool) -> Option<Self> {
        match (analog, digital) {
            (_, true) => Some(ClockKind::Digital),
            (true, false) => Some(ClockKind::Analog),
            (false, false) => None,
        }
    }
}

/// The clock face selected at startup.
#[derive(Clone, Debug)]
pub enum Clock {
    Analog(AnalogClock),
    Digital(DigitalClock),
}

impl Clock {
    pub fn new(kind: ClockKind, motion: HandMotion) -> Self {
        match kind {
            ClockKind::Analog => Clock::Analog(AnalogClock::new(motion)),
            ClockKind::Digital => Clock::Digital(DigitalClock::new()),
        }
    }

    pub fn kind(&self) -> ClockKind {
        match self {
            Clock::Analog(_) => ClockKind::Analog,
            Clock::Digital(_) => ClockKind::Digital,
        }
    }
}

impl ClockFace for Clock {
    fn full_draw<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &mut FrameContext<'_>) {
        match self {
            Clock::Analog(clock) => clock.full_draw(surface, ctx),
            Clock::Digital(clock) => clock.full_draw(surface, ctx),
        }
    }

    fn partial_update<S: Surface + ?Sized>(&mut self, surface: &mut S, ctx: &mut FrameContext<'_>) {
        match self {
            Clock::Analog(clock) => clock.partial_update(surface, ctx),
            Clock::Digital(clock) => clock.partial_update(surface, ctx),
        }
    }
}
