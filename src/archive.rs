//! Archive access and the shared scanner.
//!
//! The scanner never touches the filesystem directly: it asks an
//! [`ArchiveSource`] to list each folder once and to read each candidate
//! file once. Failures on either call are logged and treated as absence.

use crate::matcher::{self, IdentifierMatcher};
use crate::model::{FileRecord, sort_by_date};
use crate::range::DateRange;
use crate::selection::Selection;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

pub trait ArchiveSource {
    /// Names of the regular files directly inside `dir`.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>>;

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads archives straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArchive;

impl ArchiveSource for FsArchive {
    /// Entries that cannot be inspected, and names that are not UTF-8, are
    /// skipped one by one rather than failing the whole folder.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            match entry.file_type() {
                Ok(kind) if kind.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    log::warn!("Skipping {}: {}", entry.path().display(), e);
                    continue;
                }
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => log::warn!(
                    "Skipping non UTF-8 file name {} in {}",
                    raw.to_string_lossy(),
                    dir.display()
                ),
            }
        }
        // read_dir order is platform dependent.
        names.sort();
        Ok(names)
    }

    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// Lossy text of a file; unreadable files read as empty.
fn read_text(archive: &dyn ArchiveSource, path: &Path) -> String {
    match archive.read_bytes(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            String::new()
        }
    }
}

fn list_or_empty(archive: &dyn ArchiveSource, dir: &Path) -> Vec<String> {
    match archive.list_files(dir) {
        Ok(names) => names,
        Err(e) => {
            log::warn!("Could not list {}: {}", dir.display(), e);
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub present: Vec<FileRecord>,
    pub absent: Vec<FileRecord>,
}

impl ScanOutcome {
    pub fn total(&self) -> usize {
        self.present.len() + self.absent.len()
    }
}

/// Classifies every eligible file of the selection as mentioning the
/// identifier or not. Both lists come back sorted by date, undated first.
pub fn scan(
    archive: &dyn ArchiveSource,
    selection: &Selection,
    matcher: &IdentifierMatcher,
) -> ScanOutcome {
    let profile = selection.profile();
    let mut outcome = ScanOutcome::default();

    for location in selection.locations() {
        log::debug!("Scanning {}", location.dir.display());
        for name in list_or_empty(archive, &location.dir) {
            if !profile.accepts(&name) {
                continue;
            }
            let date = profile.date_of(&location.folder, &name);
            if date.is_none() && profile.skip_undated {
                log::debug!("Skipping {name}: no date in filename");
                continue;
            }

            let content = read_text(archive, &location.dir.join(&name));
            let matched = matcher.is_match(&content);
            log::debug!(
                "{name}: {}",
                if matched { "present" } else { "absent" }
            );

            let record = FileRecord::new(name, date, matched);
            if matched {
                outcome.present.push(record);
            } else {
                outcome.absent.push(record);
            }
        }
    }

    sort_by_date(&mut outcome.present);
    sort_by_date(&mut outcome.absent);
    log::info!(
        "{} {}: {} present, {} absent",
        selection.company,
        matcher.query(),
        outcome.present.len(),
        outcome.absent.len()
    );
    outcome
}

/// Every tax ID mentioned by an eligible file dated inside `range`,
/// de-duplicated and sorted.
pub fn collect_tax_ids(
    archive: &dyn ArchiveSource,
    selection: &Selection,
    range: &DateRange,
) -> Vec<String> {
    let profile = selection.profile();
    let mut ids = BTreeSet::new();
    let mut files = 0usize;

    for location in selection.locations() {
        for name in list_or_empty(archive, &location.dir) {
            if !profile.accepts(&name) {
                continue;
            }
            let Some(date) = profile.date_of(&location.folder, &name) else {
                continue;
            };
            if !range.contains(&date) {
                continue;
            }
            files += 1;
            let content = read_text(archive, &location.dir.join(&name));
            ids.extend(matcher::tax_ids(&content).map(str::to_string));
        }
    }

    log::info!(
        "{}: {} tax IDs across {} files in range",
        selection.company,
        ids.len(),
        files
    );
    ids.into_iter().collect()
}
