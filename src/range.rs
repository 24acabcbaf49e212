// Inclusive date windows supplied as `DD-MM-YYYY` strings.
use crate::error::RangeError;
use crate::model::CalendarDate;
use chrono::NaiveDate;

const BOUND_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

fn parse_bound(which: &'static str, value: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(value.trim(), BOUND_FORMAT).map_err(|_| RangeError::InvalidBound {
        which,
        value: value.to_string(),
    })
}

impl DateRange {
    pub fn parse(start: &str, end: &str) -> Result<Self, RangeError> {
        Ok(Self {
            start: parse_bound("start", start)?,
            end: parse_bound("end", end)?,
        })
    }

    /// Both bounds are inclusive. A date that is not a real calendar day
    /// (Teladoc and SavRx names are not range checked) is never contained.
    pub fn contains(&self, date: &CalendarDate) -> bool {
        match date.to_naive() {
            Some(day) => self.start <= day && day <= self.end,
            None => false,
        }
    }
}

/// One-shot form of [`DateRange::contains`]. Malformed bounds make every
/// comparison false instead of raising.
pub fn is_date_in_range(date: &CalendarDate, start: &str, end: &str) -> bool {
    match DateRange::parse(start, end) {
        Ok(range) => range.contains(date),
        Err(e) => {
            log::debug!("{e}");
            false
        }
    }
}
