// Per-company scanning strategy.
//
// The four archives differ only in a handful of knobs: how a filename turns
// into a date, how the member reference segment is written, which files are
// eligible, whether the archive is split into folders, and whether files
// without a date are worth classifying at all. Everything else in a scan is
// shared, so the knobs live in one static table looked up once per request.
use crate::codec::{self, DateCodec};
use crate::matcher::MemberIdRule;
use crate::model::{CalendarDate, Company};

/// Where the files of one folder live relative to the company base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `<base>/<backups>`; the company has no folders.
    SingleBucket,
    /// `<base>/<folder>/<backups>`.
    PerFolder,
}

pub type FileFilter = fn(&str) -> bool;

#[derive(Debug, Clone, Copy)]
pub struct CompanyProfile {
    pub company: Company,
    pub codec: DateCodec,
    pub member_id_rule: MemberIdRule,
    pub file_filter: FileFilter,
    pub layout: Layout,
    /// Anthem files whose date cannot be resolved are never classified.
    pub skip_undated: bool,
    /// Default base directory, relative to the archive root.
    pub default_path: &'static str,
    pub default_folders: &'static [&'static str],
}

impl CompanyProfile {
    pub fn date_of(&self, folder: &str, filename: &str) -> Option<CalendarDate> {
        (self.codec)(folder, filename)
    }

    pub fn accepts(&self, filename: &str) -> bool {
        (self.file_filter)(filename)
    }
}

fn edi_only(name: &str) -> bool {
    name.ends_with(".834")
}

fn edi_or_text(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".txt") || lower.ends_with(".834")
}

fn any_file(_name: &str) -> bool {
    true
}

const ANTHEM_FOLDERS: &[&str] = &[
    "152", "480", "521", "HWL", "IWU", "J84", "L82", "L480", "LAF", "LBU", "OCU", "OEW", "P42",
    "S98", "TRI", "TRI_MED",
];

const SAVRX_FOLDERS: &[&str] = &[
    "480",
    "521",
    "J84",
    "L82",
    "MEI",
    "OEW",
    "TRI",
    "TRI_NONMEDICARE",
];

const REF_QUALIFIERS: &[&str] = &["0F", "OF", "ABB"];

static PROFILES: [CompanyProfile; 4] = [
    CompanyProfile {
        company: Company::Anthem,
        codec: codec::codec_for(Company::Anthem),
        member_id_rule: MemberIdRule::Exact,
        file_filter: edi_only,
        layout: Layout::PerFolder,
        skip_undated: true,
        default_path: "ANTHEM_ABC_MUSGROW/834s",
        default_folders: ANTHEM_FOLDERS,
    },
    CompanyProfile {
        company: Company::AhhAmo,
        codec: codec::codec_for(Company::AhhAmo),
        member_id_rule: MemberIdRule::Loose(&["0F", "ABB"]),
        file_filter: edi_or_text,
        layout: Layout::SingleBucket,
        skip_undated: false,
        default_path: "AHH_AMO",
        default_folders: &[],
    },
    CompanyProfile {
        company: Company::Teladoc,
        codec: codec::codec_for(Company::Teladoc),
        member_id_rule: MemberIdRule::Terminated(REF_QUALIFIERS),
        file_filter: edi_only,
        layout: Layout::PerFolder,
        skip_undated: false,
        default_path: "TELADOC",
        default_folders: &["MEI"],
    },
    CompanyProfile {
        company: Company::SavRx,
        codec: codec::codec_for(Company::SavRx),
        member_id_rule: MemberIdRule::Loose(REF_QUALIFIERS),
        file_filter: any_file,
        layout: Layout::PerFolder,
        skip_undated: false,
        default_path: "SAVRX",
        default_folders: SAVRX_FOLDERS,
    },
];

pub fn profile_for(company: Company) -> &'static CompanyProfile {
    match company {
        Company::Anthem => &PROFILES[0],
        Company::AhhAmo => &PROFILES[1],
        Company::Teladoc => &PROFILES[2],
        Company::SavRx => &PROFILES[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_table_is_keyed_by_company() {
        for company in Company::iter() {
            assert_eq!(profile_for(company).company, company);
        }
    }

    #[test]
    fn test_file_filters() {
        let anthem = profile_for(Company::Anthem);
        assert!(anthem.accepts("480250901.834"));
        assert!(!anthem.accepts("480250901.834.bak"));
        assert!(!anthem.accepts("480250901.TXT"));

        let ahh = profile_for(Company::AhhAmo);
        assert!(ahh.accepts("AHH_250901123941.TXT"));
        assert!(ahh.accepts("AHH_250901123941.txt"));
        assert!(ahh.accepts("AHH_250901123941.834"));
        assert!(!ahh.accepts("AHH_250901123941.zip"));

        assert!(profile_for(Company::SavRx).accepts("anything.at.all"));
    }

    #[test]
    fn test_profile_codec_matches_codec_table() {
        let teladoc = profile_for(Company::Teladoc);
        assert_eq!(
            teladoc.date_of("MEI", "MEITD_20240115.834"),
            CalendarDate::new(2024, 1, 15)
        );
        assert!(profile_for(Company::Anthem).skip_undated);
        assert_eq!(profile_for(Company::AhhAmo).layout, Layout::SingleBucket);
    }
}
