//! Presence timeline for one identifier.
//!
//! Given the files that did and did not mention an identifier, the timeline
//! collapses them to one state per distinct date and reports the transitions:
//! when the identifier first appeared, each run of dates it was missing from,
//! when it came back, and the last date it was seen.

use crate::model::{CalendarDate, FileRecord};
use std::collections::BTreeMap;
use std::fmt;

/// Missing runs shorter than this are listed in full.
const FULL_LISTING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineEvent {
    NoRecords,
    NoDatedRecords,
    Started(CalendarDate),
    Missing(Vec<CalendarDate>),
    Restarted(CalendarDate),
    /// A missing run still open when the dates ran out.
    EndedMissing(Vec<CalendarDate>),
    LastPresent(CalendarDate),
}

fn fmt_block(f: &mut fmt::Formatter<'_>, dates: &[CalendarDate]) -> fmt::Result {
    match dates {
        [] => Ok(()),
        [first, .., last] if dates.len() >= FULL_LISTING_LIMIT => {
            write!(f, "{first} ... {last} ({} dates)", dates.len())
        }
        _ => {
            let listed: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
            write!(f, "{}", listed.join(", "))
        }
    }
}

impl fmt::Display for TimelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimelineEvent::NoRecords => write!(f, "No records found."),
            TimelineEvent::NoDatedRecords => write!(f, "No valid dated records found."),
            TimelineEvent::Started(d) => write!(f, "Started on {d}"),
            TimelineEvent::Missing(dates) => {
                write!(f, "Missing: ")?;
                fmt_block(f, dates)
            }
            TimelineEvent::Restarted(d) => write!(f, "Restarted on {d}"),
            TimelineEvent::EndedMissing(dates) => {
                write!(f, "Ends with Missing: ")?;
                fmt_block(f, dates)
            }
            TimelineEvent::LastPresent(d) => write!(f, "Last Present Date: {d}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Present,
    Absent,
}

/// Walks the distinct dates of both lists in order and emits the presence
/// transitions. Records without a valid date take no part.
pub fn summarize(present: &[FileRecord], absent: &[FileRecord]) -> Vec<TimelineEvent> {
    if present.is_empty() && absent.is_empty() {
        return vec![TimelineEvent::NoRecords];
    }

    let mut states: BTreeMap<CalendarDate, State> = BTreeMap::new();
    for date in absent.iter().filter_map(FileRecord::valid_date) {
        states.insert(date, State::Absent);
    }
    // Present wins on a shared date.
    for date in present.iter().filter_map(FileRecord::valid_date) {
        states.insert(date, State::Present);
    }

    if states.is_empty() {
        return vec![TimelineEvent::NoDatedRecords];
    }

    let mut events = Vec::new();
    let mut current: Option<State> = None;
    let mut missing: Vec<CalendarDate> = Vec::new();

    for (date, state) in states {
        match (current, state) {
            (None, State::Present) => events.push(TimelineEvent::Started(date)),
            (_, State::Absent) => missing.push(date),
            (Some(State::Present), State::Present) => {}
            (Some(State::Absent), State::Present) => {
                events.push(TimelineEvent::Missing(std::mem::take(&mut missing)));
                events.push(TimelineEvent::Restarted(date));
            }
        }
        current = Some(state);
    }

    if current == Some(State::Absent) && !missing.is_empty() {
        events.push(TimelineEvent::EndedMissing(missing));
    }

    if let Some(last) = present.iter().filter_map(FileRecord::valid_date).max() {
        events.push(TimelineEvent::LastPresent(last));
    }

    events
}

/// One rendered line per event.
pub fn render(events: &[TimelineEvent]) -> Vec<String> {
    events.iter().map(|e| e.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str) -> FileRecord {
        FileRecord::new(format!("{date}.834"), date.parse().ok(), false)
    }

    fn recs(dates: &[&str]) -> Vec<FileRecord> {
        dates.iter().map(|d| rec(d)).collect()
    }

    fn lines(present: &[&str], absent: &[&str]) -> Vec<String> {
        render(&summarize(&recs(present), &recs(absent)))
    }

    #[test]
    fn test_gap_and_restart() {
        assert_eq!(
            lines(&["01-01-2024", "03-01-2024"], &["02-01-2024"]),
            vec![
                "Started on 01-01-2024",
                "Missing: 02-01-2024",
                "Restarted on 03-01-2024",
                "Last Present Date: 03-01-2024",
            ]
        );
    }

    #[test]
    fn test_ends_in_absence() {
        let events = summarize(&recs(&["01-01-2024"]), &recs(&["02-01-2024", "03-01-2024"]));
        assert_eq!(
            events,
            vec![
                TimelineEvent::Started("01-01-2024".parse().unwrap()),
                TimelineEvent::EndedMissing(vec![
                    "02-01-2024".parse().unwrap(),
                    "03-01-2024".parse().unwrap(),
                ]),
                TimelineEvent::LastPresent("01-01-2024".parse().unwrap()),
            ]
        );
        assert_eq!(
            events[1].to_string(),
            "Ends with Missing: 02-01-2024, 03-01-2024"
        );
    }

    #[test]
    fn test_starts_in_absence() {
        assert_eq!(
            lines(&["03-01-2024"], &["01-01-2024", "02-01-2024"]),
            vec![
                "Missing: 01-01-2024, 02-01-2024",
                "Restarted on 03-01-2024",
                "Last Present Date: 03-01-2024",
            ]
        );
    }

    #[test]
    fn test_long_missing_run_is_abbreviated() {
        let absent = [
            "02-01-2024",
            "03-01-2024",
            "04-01-2024",
            "05-01-2024",
            "06-01-2024",
        ];
        assert_eq!(
            lines(&["01-01-2024", "07-01-2024"], &absent),
            vec![
                "Started on 01-01-2024",
                "Missing: 02-01-2024 ... 06-01-2024 (5 dates)",
                "Restarted on 07-01-2024",
                "Last Present Date: 07-01-2024",
            ]
        );
        // Four dates are still listed in full.
        assert_eq!(
            lines(&["01-01-2024", "07-01-2024"], &absent[..4])[1],
            "Missing: 02-01-2024, 03-01-2024, 04-01-2024, 05-01-2024"
        );
    }

    #[test]
    fn test_present_wins_on_shared_date() {
        assert_eq!(
            lines(&["01-01-2024"], &["01-01-2024"]),
            vec!["Started on 01-01-2024", "Last Present Date: 01-01-2024"]
        );
    }

    #[test]
    fn test_only_absent() {
        assert_eq!(
            lines(&[], &["01-01-2024", "02-01-2024"]),
            vec!["Ends with Missing: 01-01-2024, 02-01-2024"]
        );
    }

    #[test]
    fn test_undated_records_are_ignored() {
        let present = vec![FileRecord::new("x.834", None, true)];
        assert_eq!(
            render(&summarize(&present, &[])),
            vec!["No valid dated records found."]
        );

        let mut absent = recs(&["02-01-2024"]);
        absent.insert(0, FileRecord::new("y.834", None, false));
        assert_eq!(
            render(&summarize(&recs(&["01-01-2024"]), &absent)),
            vec![
                "Started on 01-01-2024",
                "Ends with Missing: 02-01-2024",
                "Last Present Date: 01-01-2024",
            ]
        );
    }

    #[test]
    fn test_impossible_dates_are_treated_as_undated() {
        let teladoc = |name: &str, matched| {
            FileRecord::new(name, crate::codec::extract_teladoc("MEI", name), matched)
        };
        let present = vec![
            teladoc("MEITD_20240115.834", true),
            teladoc("MEITD_20241399.834", true),
        ];
        let absent = vec![teladoc("MEITD_20241201.834", false)];
        assert_eq!(
            render(&summarize(&present, &absent)),
            vec![
                "Started on 01-15-2024",
                "Ends with Missing: 12-01-2024",
                "Last Present Date: 01-15-2024",
            ]
        );

        let only_odd = vec![teladoc("MEITD_20241399.834", true)];
        assert_eq!(
            render(&summarize(&only_odd, &[])),
            vec!["No valid dated records found."]
        );
    }

    #[test]
    fn test_no_records() {
        assert_eq!(lines(&[], &[]), vec!["No records found."]);
    }

    #[test]
    fn test_order_of_input_does_not_matter() {
        assert_eq!(
            lines(&["03-01-2024", "01-01-2024"], &["02-01-2024"]),
            lines(&["01-01-2024", "03-01-2024"], &["02-01-2024"])
        );
    }
}
