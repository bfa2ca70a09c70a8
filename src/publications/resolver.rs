use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use spdlog::{info, warn};

use crate::config::Config;
use crate::publications::Publication;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Publications {
    pub records: Vec<Publication>,
    /// Candidate the records came from, as configured
    pub source_path: String,
}

/// Ordered list of candidate publication files.
pub struct PublicationSource {
    root: PathBuf,
    candidates: Vec<String>,
}

impl PublicationSource {
    pub fn new(root: PathBuf, candidates: Vec<String>) -> Self {
        PublicationSource { root, candidates }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.paths.site_root.clone(), config.publications.candidates.clone())
    }

    /// First candidate present on disk, or the last one when none is.
    pub fn select(&self) -> Option<&str> {
        self.candidates
            .iter()
            .find(|candidate| self.root.join(candidate).exists())
            .or_else(|| self.candidates.last())
            .map(String::as_str)
    }

    /// Never fails: unreadable or malformed files give an empty record list.
    pub fn resolve(&self) -> Publications {
        let Some(candidate) = self.select() else {
            warn!("No publication file candidates configured");
            return Publications {
                records: vec![],
                source_path: String::new(),
            };
        };

        let records = match self.read(candidate) {
            Ok(records) => {
                info!("Loaded {} publications from {}", records.len(), candidate);
                records
            }
            Err(err) => {
                warn!("Unable to read {}: {}", candidate, err);
                vec![]
            }
        };

        Publications {
            records,
            source_path: candidate.to_string(),
        }
    }

    fn read(&self, candidate: &str) -> Result<Vec<Publication>, String> {
        let payload = fs::read_to_string(self.root.join(candidate)).map_err(|e| e.to_string())?;
        serde_json::from_str::<Vec<Publication>>(&payload).map_err(|e| e.to_string())
    }
}
