// Calendar date resolved from an archive filename.
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// A year/month/day triple as decoded from a filename.
///
/// Dates built through [`CalendarDate::new`] always satisfy `1..=12` for the
/// month and `1..=31` for the day. The Teladoc and SavRx grammars never
/// range-check their digits, so they go through [`CalendarDate::from_digits`]
/// and may carry a month such as `99`. Such dates still order and display,
/// but [`CalendarDate::to_naive`] returns `None` for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    // Field order gives the chronological derive(Ord).
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Range-checked constructor (`1..=12` month, `1..=31` day).
    pub fn new(year: u32, month: u32, day: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(Self { year, month, day })
        } else {
            None
        }
    }

    /// Builds a date from already-sliced digit runs without any range check.
    ///
    /// Each slice must be ASCII digits; `None` otherwise.
    pub fn from_digits(year: &str, month: &str, day: &str) -> Option<Self> {
        Some(Self {
            year: parse_digits(year)?,
            month: parse_digits(month)?,
            day: parse_digits(day)?,
        })
    }

    /// Expands a two-digit year into the 2000s.
    pub fn expand_year(yy: u32) -> u32 {
        2000 + yy
    }

    /// Whether this is a real calendar day. Reports and timelines only use
    /// valid dates; the rest are treated as undated.
    pub fn is_valid(&self) -> bool {
        self.to_naive().is_some()
    }

    /// Converts to a real calendar day, if one exists (rejects e.g. 02-30).
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::try_from(self.year).ok()?, self.month, self.day)
    }
}

/// Parses a slice that must consist solely of ASCII digits.
pub(crate) fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Renders as `MM-DD-YYYY`, the form used everywhere in reports.
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.month, self.day, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCalendarDateError(pub String);

impl fmt::Display for ParseCalendarDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a MM-DD-YYYY date", self.0)
    }
}

impl std::error::Error for ParseCalendarDateError {}

/// Parses the `MM-DD-YYYY` report form back into a checked date.
impl FromStr for CalendarDate {
    type Err = ParseCalendarDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCalendarDateError(s.to_string());
        let mut parts = s.trim().splitn(3, '-');
        let (Some(mm), Some(dd), Some(yyyy)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err());
        };
        let date = CalendarDate::from_digits(yyyy, mm, dd).ok_or_else(err)?;
        CalendarDate::new(date.year, date.month, date.day).ok_or_else(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded_month_first() {
        let d = CalendarDate::new(2025, 9, 1).unwrap();
        assert_eq!(d.to_string(), "09-01-2025");
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = CalendarDate::new(2023, 12, 31).unwrap();
        let b = CalendarDate::new(2024, 1, 1).unwrap();
        let c = CalendarDate::new(2024, 1, 2).unwrap();
        assert!(a < b && b < c);
        // Undated records sort first.
        assert!(None < Some(a));
    }

    #[test]
    fn test_checked_constructor_rejects_out_of_range() {
        assert!(CalendarDate::new(2024, 13, 1).is_none());
        assert!(CalendarDate::new(2024, 0, 1).is_none());
        assert!(CalendarDate::new(2024, 1, 32).is_none());
        assert!(CalendarDate::new(2024, 2, 31).is_some());
    }

    #[test]
    fn test_unchecked_dates_have_no_naive_form() {
        let d = CalendarDate::from_digits("2024", "99", "13").unwrap();
        assert!(!d.is_valid());
        assert!(d.to_naive().is_none());
        // In range for the checked constructor, but not a real day.
        assert!(!CalendarDate::new(2024, 2, 31).unwrap().is_valid());
        assert!(CalendarDate::new(2024, 2, 29).unwrap().is_valid());
        assert_eq!(d.to_string(), "99-13-2024");
    }

    #[test]
    fn test_from_str_round_trip_and_rejects() {
        let d: CalendarDate = "01-15-2024".parse().unwrap();
        assert_eq!(d, CalendarDate::new(2024, 1, 15).unwrap());
        assert!("15-13-2024".parse::<CalendarDate>().is_err());
        assert!("2024-01-15x".parse::<CalendarDate>().is_err());
        assert!("".parse::<CalendarDate>().is_err());
    }
}
