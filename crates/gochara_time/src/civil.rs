//! UT calendar timestamp with sub-second precision.
//!
//! `CivilTime` is the boundary type for user-facing dates. The engine itself
//! only works with UT Julian Days; conversion happens here and nowhere else.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, jd_to_calendar};

const MS_PER_DAY: f64 = 86_400_000.0;
const HALF_MS_DAYS: f64 = 0.5 / MS_PER_DAY;

/// UT calendar date and time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CivilTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Build from a local wall-clock time and its offset from UT in hours.
    ///
    /// `utc_offset_hours` is positive east of Greenwich (IST = +5.5).
    pub fn from_local(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        utc_offset_hours: f64,
    ) -> Self {
        let local = Self::new(year, month, day, hour, minute, second);
        Self::from_jd_ut(local.to_jd_ut() - utc_offset_hours / 24.0)
    }

    /// Check calendar field ranges.
    pub fn validate(&self) -> Result<(), TimeError> {
        if !(1..=12).contains(&self.month) {
            return Err(TimeError::InvalidField("month must be in 1..=12"));
        }
        if !(1..=31).contains(&self.day) {
            return Err(TimeError::InvalidField("day must be in 1..=31"));
        }
        if self.hour > 23 {
            return Err(TimeError::InvalidField("hour must be in 0..=23"));
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidField("minute must be in 0..=59"));
        }
        if !self.second.is_finite() || !(0.0..61.0).contains(&self.second) {
            return Err(TimeError::InvalidField("second must be in [0, 61)"));
        }
        Ok(())
    }

    /// Julian Day (UT).
    pub fn to_jd_ut(&self) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / 86_400.0;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Calendar timestamp of a UT Julian Day, rounded to the millisecond.
    pub fn from_jd_ut(jd_ut: f64) -> Self {
        // Half a millisecond nudge turns the truncation below into rounding
        // and lets the calendar conversion handle day/month carries.
        let (year, month, day_frac) = jd_to_calendar(jd_ut + HALF_MS_DAYS);
        let day = day_frac.floor() as u32;
        let ms = ((day_frac - day_frac.floor()) * MS_PER_DAY).floor() as u64;
        Self {
            year,
            month,
            day,
            hour: (ms / 3_600_000) as u32,
            minute: ((ms % 3_600_000) / 60_000) as u32,
            second: (ms % 60_000) as f64 / 1000.0,
        }
    }
}

impl Display for CivilTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}Z",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDThh:mm`, `YYYY-MM-DDThh:mm:ss[.fff]`,
/// each optionally followed by `Z`. A space may replace the `T`.
impl FromStr for CivilTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('Z');
        let (date, time) = match s.split_once(['T', ' ']) {
            Some((d, t)) => (d, Some(t)),
            None => (s, None),
        };

        let mut parts = date.splitn(3, '-');
        let year = parse_field::<i32>(parts.next(), "year")?;
        let month = parse_field::<u32>(parts.next(), "month")?;
        let day = parse_field::<u32>(parts.next(), "day")?;

        let (hour, minute, second) = match time {
            None => (0, 0, 0.0),
            Some(t) => {
                let mut hms = t.splitn(3, ':');
                let hour = parse_field::<u32>(hms.next(), "hour")?;
                let minute = parse_field::<u32>(hms.next(), "minute")?;
                let second = match hms.next() {
                    Some(sec) => parse_field::<f64>(Some(sec), "second")?,
                    None => 0.0,
                };
                (hour, minute, second)
            }
        };

        let parsed = Self::new(year, month, day, hour, minute, second);
        parsed.validate()?;
        Ok(parsed)
    }
}

fn parse_field<T: FromStr>(field: Option<&str>, name: &str) -> Result<T, TimeError> {
    let text = field.ok_or_else(|| TimeError::Parse(format!("missing {name}")))?;
    text.trim()
        .parse::<T>()
        .map_err(|_| TimeError::Parse(format!("bad {name}: {text:?}")))
}
