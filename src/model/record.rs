// One classified archive file.
use crate::model::CalendarDate;

/// The outcome of scanning a single file for one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub filename: String,
    /// `None` when the filename did not match its company's grammar.
    pub date: Option<CalendarDate>,
    pub matched: bool,
}

impl FileRecord {
    pub fn new(filename: impl Into<String>, date: Option<CalendarDate>, matched: bool) -> Self {
        Self {
            filename: filename.into(),
            date,
            matched,
        }
    }

    /// The date, if it is a real calendar day. Timelines and report bounds
    /// use this; an impossible date such as `13-99-2024` counts as undated.
    pub fn valid_date(&self) -> Option<CalendarDate> {
        self.date.filter(CalendarDate::is_valid)
    }

    /// Date as shown in reports, `-` when unresolved.
    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Stable ascending sort by date; undated records come first and ties keep
/// their enumeration order.
pub fn sort_by_date(records: &mut [FileRecord]) {
    records.sort_by_key(|r| r.date);
}
