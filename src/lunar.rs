//! Moon phase from a Unix timestamp.
//!
//! Counts seconds since the 2000-01-06 18:14 UTC new moon and folds them
//! into the mean synodic month. Accuracy is about ±1 day, plenty for a
//! phase name and a shaded disc.

/// Mean synodic month in days.
pub const SYNODIC_DAYS: f64 = 29.53059;

/// New moon of 2000-01-06 18:14 UTC as a Unix timestamp.
pub const NEW_MOON_2000: i64 = 947_182_440;

/// Month length used by the phase-name table.
const TABLE_MONTH_DAYS: f64 = 29.53;

const FIRST_WORD: [&str; 9] = [
    "New", "Waxing", "First", "Waxing", "Full", "Waning", "Last", "Waning", "New",
];
const SECOND_WORD: [&str; 9] = [
    "Moon", "Crescent", "Quarter", "Gibbous", "Moon", "Gibbous", "Quarter", "Crescent", "Moon",
];
/// Start day of each named phase; each bucket runs up to the next start.
const PHASE_START: [f64; 10] = [0.0, 0.5, 6.88, 8.88, 14.26, 15.26, 21.64, 22.64, 29.03, 30.0];

/// Two-word phase name, e.g. "Waxing" / "Gibbous".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseName {
    pub first: &'static str,
    pub second: &'static str,
}

/// Fraction of the current lunation: 0 = new, 0.25 = first quarter,
/// 0.5 = full, approaching 1 = new again.
pub fn moon_phase(unix_secs: i64) -> f64 {
    let lunar_secs = (SYNODIC_DAYS * 86_400.0) as i64;
    let since_new = (unix_secs - NEW_MOON_2000).rem_euclid(lunar_secs);
    since_new as f64 / lunar_secs as f64
}

/// Name the phase for a lunation fraction.
pub fn phase_name(fraction: f64) -> PhaseName {
    phase_name_for_age(fraction * TABLE_MONTH_DAYS)
}

/// Name the phase for a moon age in days. Ages outside the table read as new moon.
pub fn phase_name_for_age(age_days: f64) -> PhaseName {
    let index = PHASE_START
        .windows(2)
        .position(|bounds| age_days >= bounds[0] && age_days < bounds[1])
        .unwrap_or(FIRST_WORD.len() - 1);
    PhaseName {
        first: FIRST_WORD[index],
        second: SECOND_WORD[index],
    }
}

/// Which half-disc layout to shade for a phase fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoonFace {
    WaxingCrescent,
    WaxingGibbous,
    WaningGibbous,
    WaningCrescent,
}

/// Face layout and terminator ellipse half-width (as a fraction of the radius).
pub fn moon_face(fraction: f64) -> (MoonFace, f64) {
    if (0.0..=0.25).contains(&fraction) {
        (MoonFace::WaxingCrescent, 1.0 - 4.0 * fraction)
    } else if fraction > 0.25 && fraction <= 0.5 {
        (MoonFace::WaxingGibbous, 4.0 * fraction - 1.0)
    } else if fraction > 0.5 && fraction <= 0.75 {
        (MoonFace::WaningGibbous, 3.0 - 4.0 * fraction)
    } else {
        (MoonFace::WaningCrescent, (4.0 * fraction - 3.0).clamp(0.0, 1.0))
    }
}
