// SavRx filenames. Each folder has its own short list of grammars, tried in
// order; the first one that matches decides the date. None of them check
// month/day ranges.
use crate::model::{CalendarDate, SavRxFolder};
use once_cell::sync::Lazy;
use regex::Regex;

/// How the captured digit run maps onto a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// `YYYYMMDD`
    Yyyymmdd,
    /// `YYMMDD` (the date half of a `YYMMDDhhmmss` stamp)
    Yymmdd,
    /// `MMDDYY`
    Mmddyy,
}

struct Rule {
    pattern: Regex,
    layout: Layout,
}

impl Rule {
    fn new(pattern: &str, layout: Layout) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("Invalid SavRx filename regex"),
            layout,
        }
    }

    fn apply(&self, name: &str) -> Option<CalendarDate> {
        let stamp = self.pattern.captures(name)?.get(1)?.as_str();
        match self.layout {
            Layout::Yyyymmdd => super::yyyymmdd(stamp),
            Layout::Yymmdd => super::yymmdd(stamp),
            Layout::Mmddyy => super::mmddyy(stamp),
        }
    }
}

/// `<PREFIX>YYYYMMDD` then `<PREFIX>YYMMDDhhmmss`, both anchored at the end.
fn prefixed(prefix: &str) -> Vec<Rule> {
    vec![
        Rule::new(&format!(r"{prefix}([0-9]{{8}})$"), Layout::Yyyymmdd),
        Rule::new(&format!(r"{prefix}([0-9]{{6}})[0-9]{{6}}$"), Layout::Yymmdd),
    ]
}

/// `_MMDDYY` then `_YYMMDDhhmmss`, both anchored at the end.
fn underscore_suffix() -> Vec<Rule> {
    vec![
        Rule::new(r"_([0-9]{6})$", Layout::Mmddyy),
        Rule::new(r"_([0-9]{6})[0-9]{6}$", Layout::Yymmdd),
    ]
}

static IBEW480: Lazy<Vec<Rule>> = Lazy::new(|| prefixed("IBEW480_"));
static PP521: Lazy<Vec<Rule>> = Lazy::new(|| prefixed("PP521_"));
static L82: Lazy<Vec<Rule>> = Lazy::new(|| prefixed("L82EDI_"));

static J84: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"J84_EDI([0-9]{6})$", Layout::Mmddyy),
        Rule::new(r"J84_EDI([0-9]{6})[0-9]{6}$", Layout::Yymmdd),
        Rule::new(r"_([0-9]{6})$", Layout::Mmddyy),
    ]
});

static OEW: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"_([0-9]{6})[0-9]{6}$", Layout::Yymmdd),
        // Unanchored: the first `_YYYYMMDD` anywhere in the name.
        Rule::new(r"_([0-9]{8})", Layout::Yyyymmdd),
    ]
});

static UNDERSCORE_SUFFIX: Lazy<Vec<Rule>> = Lazy::new(underscore_suffix);

fn rules_for(folder: SavRxFolder) -> &'static [Rule] {
    match folder {
        SavRxFolder::Ibew480 => &IBEW480,
        SavRxFolder::Pp521 => &PP521,
        SavRxFolder::J84 => &J84,
        SavRxFolder::L82 => &L82,
        SavRxFolder::Oew => &OEW,
        SavRxFolder::Mei | SavRxFolder::Tri | SavRxFolder::TriNonMedicare => &UNDERSCORE_SUFFIX,
    }
}

/// Date codec entry point; unknown folder names have no grammar.
pub fn extract(folder: &str, filename: &str) -> Option<CalendarDate> {
    extract_for(SavRxFolder::from_name(folder)?, filename)
}

fn extract_for(folder: SavRxFolder, filename: &str) -> Option<CalendarDate> {
    let upper = filename.to_uppercase();
    let name = upper.split('.').next().unwrap_or_default();
    rules_for(folder).iter().find_map(|rule| rule.apply(name))
}
