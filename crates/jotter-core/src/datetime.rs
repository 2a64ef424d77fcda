//! Date/time parsing for user input and for persisted task lines.
//!
//! User input is forgiving: several layouts are tried in a fixed order and the
//! first match wins. Persisted data is canonical ISO only, see
//! [`parse_iso_date_or_date_time`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})$").expect("valid iso date regex")
});
static ISO_DATE_COMPACT_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2}) (?P<H>\d{2})(?P<M>\d{2})$")
        .expect("valid iso compact time regex")
});
static ISO_DATE_COLON_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2}) (?P<H>\d{2}):(?P<M>\d{2})$")
        .expect("valid iso colon time regex")
});
static DMY_COMPACT_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<d>\d{1,2})/(?P<m>\d{1,2})/(?P<y>\d{4}) (?P<H>\d{2})(?P<M>\d{2})$")
        .expect("valid dmy compact time regex")
});
static DMY_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<d>\d{1,2})/(?P<m>\d{1,2})/(?P<y>\d{4})$").expect("valid dmy date regex")
});
static COMPACT_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<H>\d{2})(?P<M>\d{2})$").expect("valid compact time regex"));
static COLON_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<H>\d{1,2}):(?P<M>\d{2})$").expect("valid colon time regex"));
static STORED_DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<y>\d{4})-(?P<m>\d{2})-(?P<d>\d{2})T(?P<H>\d{2}):(?P<M>\d{2})(?::(?P<S>\d{2}))?$",
    )
    .expect("valid stored date time regex")
});

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const ISO_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const ISO_SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DISPLAY_DATE_FORMAT: &str = "%b %d %Y";
const DISPLAY_DATE_TIME_FORMAT: &str = "%b %d %Y %H:%M";
const DISPLAY_TIME_FORMAT: &str = "%H:%M";

/// A calendar point plus whether the source text named a time of day.
///
/// Date-only values sit at midnight with `has_time == false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub at: NaiveDateTime,
    pub has_time: bool,
}

impl Moment {
    pub fn date_only(date: NaiveDate) -> Self {
        Self {
            at: date.and_time(NaiveTime::MIN),
            has_time: false,
        }
    }

    pub fn timed(at: NaiveDateTime) -> Self {
        Self { at, has_time: true }
    }

    pub fn date(&self) -> NaiveDate {
        self.at.date()
    }

    /// Canonical form shared by the task file and duplicate keys.
    pub fn to_iso(&self) -> String {
        if !self.has_time {
            return self.at.format(ISO_DATE_FORMAT).to_string();
        }
        if self.at.second() == 0 {
            self.at.format(ISO_MINUTE_FORMAT).to_string()
        } else {
            self.at.format(ISO_SECOND_FORMAT).to_string()
        }
    }

    /// Human form, e.g. `Oct 15 2019` or `Oct 15 2019 18:00`.
    pub fn to_display(&self) -> String {
        if self.has_time {
            self.at.format(DISPLAY_DATE_TIME_FORMAT).to_string()
        } else {
            self.at.format(DISPLAY_DATE_FORMAT).to_string()
        }
    }

    /// Bare `HH:mm`, used for same-day event ends.
    pub fn to_display_time(&self) -> String {
        self.at.format(DISPLAY_TIME_FORMAT).to_string()
    }
}

/// Human form of a plain date, e.g. `Oct 15 2019`.
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Parses a user-supplied date or date-time.
///
/// Tried in order: `yyyy-MM-dd`, `yyyy-MM-dd HHmm`, `yyyy-MM-dd HH:mm`,
/// `d/M/yyyy HHmm`, `d/M/yyyy`. Impossible calendar dates never match.
pub fn parse_date_time(raw: &str) -> Option<Moment> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    [
        &*ISO_DATE_RE,
        &*ISO_DATE_COMPACT_TIME_RE,
        &*ISO_DATE_COLON_TIME_RE,
        &*DMY_COMPACT_TIME_RE,
        &*DMY_DATE_RE,
    ]
    .into_iter()
    .find_map(|re| re.captures(s))
    .and_then(|caps| moment_from_captures(&caps))
}

/// Parses a user-supplied date with no time component (`yyyy-MM-dd` or `d/M/yyyy`).
pub fn parse_date_only(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    [&*ISO_DATE_RE, &*DMY_DATE_RE]
        .into_iter()
        .find_map(|re| re.captures(s))
        .and_then(|caps| date_from_captures(&caps))
}

/// Parses the end of an event.
///
/// Anything [`parse_date_time`] accepts is taken as-is. Otherwise a bare
/// `HHmm` or `H:mm` time is placed on the start's calendar date.
pub fn parse_event_end(start: &Moment, raw: &str) -> Option<Moment> {
    if let Some(full) = parse_date_time(raw) {
        return Some(full);
    }

    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let caps = COMPACT_TIME_RE
        .captures(s)
        .or_else(|| COLON_TIME_RE.captures(s))?;
    let time = clock_time(field(&caps, "H")?, field(&caps, "M")?)?;
    Some(Moment::timed(start.date().and_time(time)))
}

/// Strict parser for persisted values: ISO date, or ISO date-time when a `T`
/// separator is present. Seconds are optional; `24:00` is not accepted here.
pub fn parse_iso_date_or_date_time(raw: &str) -> Option<Moment> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if s.contains('T') {
        let caps = STORED_DATE_TIME_RE.captures(s)?;
        let date = date_from_captures(&caps)?;
        let seconds = match caps.name("S") {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let time = NaiveTime::from_hms_opt(field(&caps, "H")?, field(&caps, "M")?, seconds)?;
        return Some(Moment::timed(date.and_time(time)));
    }

    let caps = ISO_DATE_RE.captures(s)?;
    date_from_captures(&caps).map(Moment::date_only)
}

fn moment_from_captures(caps: &Captures<'_>) -> Option<Moment> {
    let date = date_from_captures(caps)?;
    if caps.name("H").is_none() {
        return Some(Moment::date_only(date));
    }
    let time = clock_time(field(caps, "H")?, field(caps, "M")?)?;
    Some(Moment::timed(date.and_time(time)))
}

fn date_from_captures(caps: &Captures<'_>) -> Option<NaiveDate> {
    let year: i32 = caps.name("y")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, field(caps, "m")?, field(caps, "d")?)
}

// 24:00 is midnight of the same date.
fn clock_time(hour: u32, minute: u32) -> Option<NaiveTime> {
    if hour == 24 && minute == 0 {
        return Some(NaiveTime::MIN);
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn field(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

/// Whether `date` lies within `[from, to]` by calendar day.
pub fn date_in_range(date: NaiveDate, from: NaiveDate, to: NaiveDate) -> bool {
    from <= date && date <= to
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn ymd_hm(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        ymd(y, m, d).and_hms_opt(h, min, 0).expect("valid time")
    }

    #[test]
    fn iso_date_is_date_only() {
        let parsed = parse_date_time("2019-06-06").expect("parse");
        assert_eq!(parsed.at, ymd_hm(2019, 6, 6, 0, 0));
        assert!(!parsed.has_time);
    }

    #[test]
    fn iso_date_with_compact_and_colon_time() {
        let compact = parse_date_time("2019-08-06 1400").expect("compact");
        assert_eq!(compact.at, ymd_hm(2019, 8, 6, 14, 0));
        assert!(compact.has_time);

        let colon = parse_date_time("  2019-08-06 14:30  ").expect("colon");
        assert_eq!(colon.at, ymd_hm(2019, 8, 6, 14, 30));
        assert!(colon.has_time);
    }

    #[test]
    fn day_month_year_forms() {
        let timed = parse_date_time("2/12/2019 1800").expect("timed");
        assert_eq!(timed.at, ymd_hm(2019, 12, 2, 18, 0));
        assert!(timed.has_time);

        let date = parse_date_time("2/12/2019").expect("date");
        assert_eq!(date.at, ymd_hm(2019, 12, 2, 0, 0));
        assert!(!date.has_time);
    }

    #[test]
    fn impossible_dates_fail_every_layout() {
        assert!(parse_date_time("2019-02-29").is_none());
        assert!(parse_date_time("2020-02-29").is_some());
        assert!(parse_date_time("2019-02-31 1200").is_none());
        assert!(parse_date_time("31/4/2019").is_none());
        assert!(parse_date_time("2019-13-40").is_none());
        assert!(parse_date_only("2019-02-29").is_none());
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert!(parse_date_time("").is_none());
        assert!(parse_date_time("   ").is_none());
        assert!(parse_date_time("not-a-date").is_none());
        assert!(parse_date_time("2019-6-6").is_none());
        assert!(parse_date_time("Sunday").is_none());
    }

    #[test]
    fn midnight_spelled_as_2400_stays_on_the_same_date() {
        let parsed = parse_date_time("2019-08-06 2400").expect("2400");
        assert_eq!(parsed.at, ymd_hm(2019, 8, 6, 0, 0));
        assert!(parsed.has_time);
        assert!(parse_date_time("2019-08-06 2430").is_none());
    }

    #[test]
    fn date_only_accepts_iso_and_dmy_but_no_time() {
        assert_eq!(parse_date_only("2019-10-15"), Some(ymd(2019, 10, 15)));
        assert_eq!(parse_date_only("2/12/2019"), Some(ymd(2019, 12, 2)));
        assert_eq!(parse_date_only("2019-10-15 1200"), None);
        assert_eq!(parse_date_only(""), None);
    }

    #[test]
    fn date_only_round_trips_iso_strings() {
        let mut date = ymd(2019, 1, 1);
        while date < ymd(2021, 1, 1) {
            let iso = date.format("%Y-%m-%d").to_string();
            assert_eq!(parse_date_only(&iso), Some(date), "{iso}");
            date = date.succ_opt().expect("next day");
        }
    }

    #[test]
    fn event_end_time_only_uses_start_date() {
        let start = parse_date_time("2019-08-06 1400").expect("start");

        let end = parse_event_end(&start, "1600").expect("1600");
        assert_eq!(end.at, ymd_hm(2019, 8, 6, 16, 0));
        assert!(end.has_time);

        let end = parse_event_end(&start, "9:05").expect("9:05");
        assert_eq!(end.at, ymd_hm(2019, 8, 6, 9, 5));
    }

    #[test]
    fn event_end_2400_is_midnight_of_start_date() {
        let start = parse_date_time("2019-08-06 1400").expect("start");
        for raw in ["2400", "24:00"] {
            let end = parse_event_end(&start, raw).expect(raw);
            assert_eq!(end.at, ymd_hm(2019, 8, 6, 0, 0));
            assert!(end.has_time);
        }
    }

    #[test]
    fn event_end_prefers_full_forms() {
        let start = parse_date_time("2019-08-06 1400").expect("start");

        let full = parse_event_end(&start, "2019-08-07 1600").expect("full");
        assert_eq!(full.at, ymd_hm(2019, 8, 7, 16, 0));
        assert!(full.has_time);

        let date = parse_event_end(&start, "2019-08-07").expect("date");
        assert_eq!(date.at, ymd_hm(2019, 8, 7, 0, 0));
        assert!(!date.has_time);
    }

    #[test]
    fn event_end_rejects_bad_times() {
        let start = parse_date_time("2019-08-06").expect("start");
        for raw in ["", "   ", "2360", "25:00", "160", "not-a-time"] {
            assert!(parse_event_end(&start, raw).is_none(), "{raw:?}");
        }
    }

    #[test]
    fn stored_values_are_strict_iso() {
        let date = parse_iso_date_or_date_time("2019-08-06").expect("date");
        assert_eq!(date, Moment::date_only(ymd(2019, 8, 6)));

        let timed = parse_iso_date_or_date_time("2019-08-06T14:30").expect("timed");
        assert_eq!(timed, Moment::timed(ymd_hm(2019, 8, 6, 14, 30)));

        let seconds = parse_iso_date_or_date_time("2019-08-06T14:30:15").expect("seconds");
        assert_eq!(seconds.at.second(), 15);

        assert!(parse_iso_date_or_date_time("").is_none());
        assert!(parse_iso_date_or_date_time("2019-08-06T25:00").is_none());
        assert!(parse_iso_date_or_date_time("2019-08-06 1400").is_none());
        assert!(parse_iso_date_or_date_time("6/8/2019").is_none());
    }

    #[test]
    fn iso_rendering_omits_zero_seconds() {
        assert_eq!(Moment::date_only(ymd(2019, 6, 6)).to_iso(), "2019-06-06");
        assert_eq!(
            Moment::timed(ymd_hm(2019, 8, 6, 14, 0)).to_iso(),
            "2019-08-06T14:00"
        );
        let with_seconds = ymd(2019, 8, 6).and_hms_opt(14, 0, 9).expect("time");
        assert_eq!(Moment::timed(with_seconds).to_iso(), "2019-08-06T14:00:09");
    }

    #[test]
    fn display_forms() {
        let timed = Moment::timed(ymd_hm(2019, 8, 6, 14, 0));
        assert_eq!(timed.to_display(), "Aug 06 2019 14:00");
        assert_eq!(timed.to_display_time(), "14:00");
        assert_eq!(Moment::date_only(ymd(2019, 6, 6)).to_display(), "Jun 06 2019");
    }
}
