//! Wall-clock time as the frames see it: UTC plus the configured local zone.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// One instant viewed in UTC and in the local time zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Moment {
    pub utc: DateTime<Utc>,
    pub local: DateTime<Tz>,
}

impl Moment {
    pub fn new(utc: DateTime<Utc>, zone: Tz) -> Self {
        Self {
            utc,
            local: utc.with_timezone(&zone),
        }
    }

    /// Local zone abbreviation, e.g. "EDT".
    pub fn zone_abbreviation(&self) -> String {
        self.local.format("%Z").to_string()
    }

    pub fn unix(&self) -> i64 {
        self.utc.timestamp()
    }

    /// Local "HH:MM:" prefix of the digital readout.
    pub fn local_hh_mm(&self) -> String {
        self.local.format("%H:%M:").to_string()
    }

    pub fn utc_hh_mm(&self) -> String {
        self.utc.format("%H:%M:").to_string()
    }

    pub fn is_pm(&self) -> bool {
        self.local.hour() >= 12
    }

    /// Local calendar day, used to notice midnight.
    pub fn local_ordinal_day(&self) -> (i32, u32) {
        (self.local.year(), self.local.ordinal())
    }
}

/// Parse an Olson zone name, falling back to UTC with a warning.
pub fn parse_zone(name: &str) -> Tz {
    match name.parse::<Tz>() {
        Ok(zone) => zone,
        Err(e) => {
            log::warn!("Unknown time zone {:?} ({}), using UTC", name, e);
            Tz::UTC
        }
    }
}

/// Convert a Unix timestamp into the local zone, `None` if out of range.
pub fn local_from_unix(unix: i64, zone: Tz) -> Option<DateTime<Tz>> {
    zone.timestamp_opt(unix, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_york_abbreviation_follows_dst() {
        let zone = parse_zone("America/New_York");
        let winter = Moment::new(Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(), zone);
        let summer = Moment::new(Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap(), zone);
        assert_eq!(winter.zone_abbreviation(), "EST");
        assert_eq!(summer.zone_abbreviation(), "EDT");
        assert_eq!(summer.local.hour(), 8);
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        assert_eq!(parse_zone("Mars/Olympus_Mons"), Tz::UTC);
    }

    #[test]
    fn hh_mm_prefixes() {
        let moment = Moment::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 23, 5, 9).unwrap(),
            parse_zone("Europe/Paris"),
        );
        assert_eq!(moment.utc_hh_mm(), "23:05:");
        assert_eq!(moment.local_hh_mm(), "00:05:");
        assert!(!moment.is_pm());
    }
}
