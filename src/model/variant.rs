// Company and folder identifiers that select a filename grammar.
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Company {
    Anthem,
    AhhAmo,
    Teladoc,
    SavRx,
}

impl Company {
    /// The archive-level name, also used as the default directory name.
    pub fn name(&self) -> &'static str {
        match self {
            Company::Anthem => "ANTHEM_ABC_MUSGROW",
            Company::AhhAmo => "AHH_AMO",
            Company::Teladoc => "TELADOC",
            Company::SavRx => "SAVRX",
        }
    }

    /// Comma-separated list of every known company name.
    pub fn available() -> String {
        Company::iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Company {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Company::iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| wanted.to_string())
    }
}

/// The eight SavRx folders, each with its own filename grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SavRxFolder {
    Ibew480,
    Pp521,
    J84,
    L82,
    Mei,
    Oew,
    Tri,
    TriNonMedicare,
}

impl SavRxFolder {
    pub fn name(&self) -> &'static str {
        match self {
            SavRxFolder::Ibew480 => "480",
            SavRxFolder::Pp521 => "521",
            SavRxFolder::J84 => "J84",
            SavRxFolder::L82 => "L82",
            SavRxFolder::Mei => "MEI",
            SavRxFolder::Oew => "OEW",
            SavRxFolder::Tri => "TRI",
            SavRxFolder::TriNonMedicare => "TRI_NONMEDICARE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SavRxFolder::iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for SavRxFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_names_round_trip() {
        for c in Company::iter() {
            assert_eq!(c.name().parse::<Company>(), Ok(c));
        }
        assert_eq!(" TELADOC ".parse::<Company>(), Ok(Company::Teladoc));
        assert!("teladoc".parse::<Company>().is_err());
    }

    #[test]
    fn test_savrx_folder_lookup() {
        assert_eq!(SavRxFolder::from_name("480"), Some(SavRxFolder::Ibew480));
        assert_eq!(
            SavRxFolder::from_name("TRI_NONMEDICARE"),
            Some(SavRxFolder::TriNonMedicare)
        );
        assert_eq!(SavRxFolder::from_name("TRI_MED"), None);
    }
}
