// Request-scoped choice of company and folders.
use crate::config::Config;
use crate::error::SelectionError;
use crate::model::Company;
use crate::profile::{CompanyProfile, Layout, profile_for};
use std::path::PathBuf;

/// Everything a scan needs to know about where to look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub company: Company,
    pub base_path: PathBuf,
    /// Active folders; empty for single-bucket companies.
    pub folders: Vec<String>,
    pub backups_dir: String,
}

/// A directory to list, tagged with the folder name its codec expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderLocation {
    pub folder: String,
    pub dir: PathBuf,
}

impl Selection {
    /// Resolves a company name and optional subfolder against the config.
    ///
    /// A subfolder that is not one of the company's folders selects every
    /// folder, as does `None`.
    pub fn resolve(
        config: &Config,
        company_name: &str,
        subfolder: Option<&str>,
    ) -> Result<Self, SelectionError> {
        let company: Company =
            company_name
                .parse()
                .map_err(|name| SelectionError::UnknownCompany {
                    name,
                    available: Company::available(),
                })?;
        let profile = profile_for(company);
        let overrides = config.override_for(company.name());

        let base_path = match overrides.and_then(|o| o.path.as_deref()) {
            Some(path) => config.archive_root().join(path),
            None => config.archive_root().join(profile.default_path),
        };

        let mut folders: Vec<String> = match overrides.and_then(|o| o.folders.clone()) {
            Some(list) => list,
            None => profile
                .default_folders
                .iter()
                .map(|f| f.to_string())
                .collect(),
        };
        if profile.layout == Layout::SingleBucket {
            folders.clear();
        }

        if let Some(wanted) = subfolder.map(str::trim).filter(|s| !s.is_empty()) {
            if folders.iter().any(|f| f == wanted) {
                folders = vec![wanted.to_string()];
            } else if profile.layout == Layout::PerFolder {
                log::warn!(
                    "Unknown folder '{}' for {}, searching all folders",
                    wanted,
                    company
                );
            }
        }

        Ok(Self {
            company,
            base_path,
            folders,
            backups_dir: config.backups_dir.clone(),
        })
    }

    pub fn profile(&self) -> &'static CompanyProfile {
        profile_for(self.company)
    }

    /// The directories to list, in folder order.
    pub fn locations(&self) -> Vec<FolderLocation> {
        match self.profile().layout {
            Layout::SingleBucket => vec![FolderLocation {
                folder: String::new(),
                dir: self.base_path.join(&self.backups_dir),
            }],
            Layout::PerFolder => self
                .folders
                .iter()
                .map(|folder| FolderLocation {
                    folder: folder.clone(),
                    dir: self.base_path.join(folder).join(&self.backups_dir),
                })
                .collect(),
        }
    }
}
