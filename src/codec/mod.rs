//! Filename to calendar-date resolution.
//!
//! Every company names its archive files differently, and some encode the
//! same date in more than one way depending on the folder. Each variant gets
//! a codec with the same signature, `(folder, filename) -> Option<date>`, and
//! [`codec_for`] is the lookup table that picks one.
//!
//! A filename that does not fit its grammar simply has no date; callers
//! decide whether such a file is skipped or kept as "unknown date".
//!
//! Known imperfection: the Anthem grammar cannot tell `YYMMDD` from `YYDDMM`
//! except when the middle pair exceeds 12, in which case the pairs are
//! swapped. Dates such as `240102` are read as `YYMMDD` without evidence.

pub mod anthem;
pub mod savrx;

use crate::model::{CalendarDate, Company};
use once_cell::sync::Lazy;
use regex::Regex;

/// Signature shared by every per-variant codec.
pub type DateCodec = fn(folder: &str, filename: &str) -> Option<CalendarDate>;

static AHH_AMO_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{6})[0-9]{6}$").expect("Invalid AHH_AMO date regex"));

static TELADOC_STAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{8})").expect("Invalid TELADOC date regex"));

/// Returns the codec for a company.
pub const fn codec_for(company: Company) -> DateCodec {
    match company {
        Company::Anthem => anthem::extract,
        Company::AhhAmo => extract_ahh_amo,
        Company::Teladoc => extract_teladoc,
        Company::SavRx => savrx::extract,
    }
}

/// Resolves the date a file was produced on from its name alone.
///
/// `folder` is the archive folder the file was listed from. It is ignored by
/// the single-bucket and folder-agnostic grammars.
pub fn extract_date(company: Company, folder: &str, filename: &str) -> Option<CalendarDate> {
    codec_for(company)(folder, filename)
}

/// `AHH_ABC_Elig_Full_250901123941.TXT` -> 09-01-2025.
///
/// The trailing twelve digits are `YYMMDDhhmmss`; only the date half is kept.
/// No range check is applied.
pub fn extract_ahh_amo(_folder: &str, filename: &str) -> Option<CalendarDate> {
    let name = filename.replace(".834", "").replace(".TXT", "");
    let caps = AHH_AMO_STAMP.captures(&name)?;
    let stamp = caps.get(1)?.as_str();
    yymmdd(stamp)
}

/// `MEITD_20240115.834` -> 01-15-2024; the first eight-digit run wins.
///
/// Month and day are taken verbatim, so `20241399` yields month 13, day 99.
pub fn extract_teladoc(_folder: &str, filename: &str) -> Option<CalendarDate> {
    let stamp = TELADOC_STAMP.captures(filename)?.get(1)?.as_str();
    yyyymmdd(stamp)
}

// --- Unchecked digit layouts shared by the grammars ---

pub(crate) fn yyyymmdd(stamp: &str) -> Option<CalendarDate> {
    CalendarDate::from_digits(stamp.get(0..4)?, stamp.get(4..6)?, stamp.get(6..8)?)
}

pub(crate) fn yymmdd(stamp: &str) -> Option<CalendarDate> {
    let mut date = CalendarDate::from_digits(stamp.get(0..2)?, stamp.get(2..4)?, stamp.get(4..6)?)?;
    date.year = CalendarDate::expand_year(date.year);
    Some(date)
}

pub(crate) fn mmddyy(stamp: &str) -> Option<CalendarDate> {
    let mut date = CalendarDate::from_digits(stamp.get(4..6)?, stamp.get(0..2)?, stamp.get(2..4)?)?;
    date.year = CalendarDate::expand_year(date.year);
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u32, m: u32, d: u32) -> Option<CalendarDate> {
        Some(CalendarDate { year: y, month: m, day: d })
    }

    #[test]
    fn test_ahh_amo_basic() {
        assert_eq!(
            extract_date(Company::AhhAmo, "", "AHH_ABC_Elig_Full_250901123941.TXT"),
            date(2025, 9, 1)
        );
        assert_eq!(
            extract_date(Company::AhhAmo, "", "AHH_ABC_Elig_Full_250901000000.834"),
            date(2025, 9, 1)
        );
        assert_eq!(
            extract_date(Company::AhhAmo, "", "AMO_250901235959"),
            date(2025, 9, 1)
        );
    }

    #[test]
    fn test_ahh_amo_rejects_short_or_suffixed_names() {
        assert_eq!(extract_ahh_amo("", "AHH_ABC_Elig_Full_2509011239.TXT"), None);
        // Only the upper-case .TXT is stripped.
        assert_eq!(extract_ahh_amo("", "AHH_ABC_Elig_Full_250901123941.txt"), None);
        assert_eq!(extract_ahh_amo("", "README"), None);
    }

    #[test]
    fn test_teladoc_first_eight_digit_run_wins() {
        assert_eq!(
            extract_date(Company::Teladoc, "MEI", "MEITD_20240115.834"),
            date(2024, 1, 15)
        );
        assert_eq!(
            extract_date(Company::Teladoc, "MEI", "TEST_MEITD_20240115.834"),
            date(2024, 1, 15)
        );
        assert_eq!(
            extract_teladoc("MEI", "MEITD_20240115_20250101.834"),
            date(2024, 1, 15)
        );
        assert_eq!(extract_teladoc("MEI", "MEITD_2024011.834"), None);
    }

    /// Current behaviour, not an endorsement: Teladoc performs no range check,
    /// unlike every other grammar.
    #[test]
    fn test_teladoc_accepts_implausible_dates() {
        let d = extract_teladoc("MEI", "MEITD_20241399.834").unwrap();
        assert_eq!((d.year, d.month, d.day), (2024, 13, 99));
        assert!(d.to_naive().is_none());
    }

    #[test]
    fn test_unknown_savrx_folder_has_no_date() {
        assert_eq!(extract_date(Company::SavRx, "XYZ", "IBEW480_20240115.txt"), None);
    }
}
