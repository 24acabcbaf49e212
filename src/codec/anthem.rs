// Anthem filenames: `<FOLDER><stamp>.834`.
//
// The stamp right after the folder prefix is either `YYYYMMDDhhmmss` or
// starts with `YYMMDD` (sometimes written `YYDDMM`). The TRI_MED folder
// mixes in free-form names, so it falls back to scanning every
// underscore-separated piece for a plausible six-digit date.
use crate::model::CalendarDate;
use crate::model::date::parse_digits;

pub const TRI_MED: &str = "TRI_MED";

pub fn extract(folder: &str, filename: &str) -> Option<CalendarDate> {
    let name = filename.replace(".834", "");
    let rest = name.strip_prefix(folder)?;

    if let Some(date) = rest.get(..14).and_then(long_stamp) {
        return Some(date);
    }

    if let Some(date) = rest.get(..6).and_then(short_stamp) {
        return Some(date);
    }

    if folder == TRI_MED {
        return scan_segments(rest);
    }

    None
}

/// `YYYYMMDDhhmmss`, year taken literally.
fn long_stamp(stamp: &str) -> Option<CalendarDate> {
    parse_digits(stamp)?;
    let date = super::yyyymmdd(stamp)?;
    CalendarDate::new(date.year, date.month, date.day)
}

/// `YYMMDD`, or `YYDDMM` when the middle pair cannot be a month.
fn short_stamp(stamp: &str) -> Option<CalendarDate> {
    let date = super::yymmdd(stamp)?;
    let (month, day) = if date.month > 12 && date.day <= 12 {
        (date.day, date.month)
    } else {
        (date.month, date.day)
    };
    CalendarDate::new(date.year, month, day)
}

/// First six-digit window, segment by segment and left to right, that
/// survives [`short_stamp`]. The order is observable on names holding
/// several candidates and must not change.
fn scan_segments(rest: &str) -> Option<CalendarDate> {
    rest.split('_').find_map(|segment| {
        segment
            .as_bytes()
            .windows(6)
            .filter(|w| w.iter().all(u8::is_ascii_digit))
            .filter_map(|w| std::str::from_utf8(w).ok())
            .find_map(short_stamp)
    })
}
