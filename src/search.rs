// Entry points used by the CLI: identifier lookups and range harvests.
use crate::archive::{self, ArchiveSource};
use crate::error::{QueryError, RangeError};
use crate::matcher::IdentifierMatcher;
use crate::model::{CalendarDate, FileRecord, IdentifierQuery};
use crate::range::DateRange;
use crate::selection::Selection;
use crate::timeline::{self, TimelineEvent};

/// Where and when an identifier appeared across a company's archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierReport {
    pub query: IdentifierQuery,
    pub present: Vec<FileRecord>,
    pub absent: Vec<FileRecord>,
    /// Earliest validly dated file the identifier appeared in.
    pub from: Option<CalendarDate>,
    /// Latest validly dated file the identifier appeared in.
    pub to: Option<CalendarDate>,
    pub timeline: Vec<TimelineEvent>,
}

impl IdentifierReport {
    pub fn is_found(&self) -> bool {
        !self.present.is_empty()
    }
}

pub fn search_identifier(
    archive: &dyn ArchiveSource,
    selection: &Selection,
    query: IdentifierQuery,
) -> Result<IdentifierReport, QueryError> {
    let matcher = IdentifierMatcher::new(query, selection.profile().member_id_rule)?;
    let outcome = archive::scan(archive, selection, &matcher);

    let from = outcome.present.iter().filter_map(FileRecord::valid_date).min();
    let to = outcome.present.iter().filter_map(FileRecord::valid_date).max();
    let timeline = timeline::summarize(&outcome.present, &outcome.absent);

    Ok(IdentifierReport {
        query: matcher.query().clone(),
        present: outcome.present,
        absent: outcome.absent,
        from,
        to,
        timeline,
    })
}

/// Tax IDs found in files dated between two `DD-MM-YYYY` bounds.
pub fn search_tax_ids_in_range(
    archive: &dyn ArchiveSource,
    selection: &Selection,
    start: &str,
    end: &str,
) -> Result<Vec<String>, RangeError> {
    let range = DateRange::parse(start, end)?;
    Ok(archive::collect_tax_ids(archive, selection, &range))
}
