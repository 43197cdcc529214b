use std::{io::Read, path::Path};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::data::{open_data_file, read_csv_rows};
use crate::errors::TurismoError;
use crate::profile::ProfileGroup;

/// One row of the recommendation table as it appears in the CSV file.
#[derive(Debug, Deserialize)]
struct RecommendationRow {
    group: String,
    recommendation_type: String,
    recommendation: String,
}

/// A precomputed recommendation for a profile group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub group: ProfileGroup,
    /// Kind of plan, e.g. "Museo" or "Restaurante"
    pub recommendation_type: String,
    pub text: String,
}

/// A recommendation ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRecommendation {
    pub recommendation_type: String,
    pub text: String,
}

impl std::fmt::Display for RenderedRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.recommendation_type, self.text)
    }
}

impl From<&RecommendationEntry> for RenderedRecommendation {
    fn from(entry: &RecommendationEntry) -> Self {
        Self {
            recommendation_type: entry.recommendation_type.clone(),
            text: entry.text.clone(),
        }
    }
}

/// Read-only recommendation table, in the order rows appear in the source file.
#[derive(Debug, Clone, Default)]
pub struct RecommendationTable {
    entries: Vec<RecommendationEntry>,
}

impl RecommendationTable {
    /// Wrap already parsed entries. No coverage check is made here, see [`Self::validate`].
    pub fn from_entries(entries: Vec<RecommendationEntry>) -> Self {
        Self { entries }
    }

    /// Load and validate the table from a CSV file with the columns
    /// `group,recommendation_type,recommendation`.
    pub fn load(path: &Path) -> Result<Self, TurismoError> {
        let table = Self::from_reader(open_data_file(path)?, path)?;
        debug!(
            "Loaded {} recommendations from {:?}",
            table.entries.len(),
            path
        );
        Ok(table)
    }

    /// Parse and validate a table from any reader. `path` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, path: &Path) -> Result<Self, TurismoError> {
        let mut entries = Vec::new();
        for (line, row) in read_csv_rows::<RecommendationRow, _>(reader, path)? {
            let group = row
                .group
                .parse::<ProfileGroup>()
                .map_err(|e| TurismoError::DataFileInvalidRow {
                    path: path.to_path_buf(),
                    line,
                    reason: e.to_string(),
                })?;
            if row.recommendation.is_empty() {
                warn!("Empty recommendation text at {:?} line {}", path, line);
            }
            entries.push(RecommendationEntry {
                group,
                recommendation_type: row.recommendation_type,
                text: row.recommendation,
            });
        }

        let table = Self::from_entries(entries);
        table.validate()?;
        Ok(table)
    }

    /// Every profile group the classifier can produce must have at least one row.
    pub fn validate(&self) -> Result<(), TurismoError> {
        for group in ProfileGroup::ALL {
            if !self.entries.iter().any(|e| e.group == group) {
                return Err(TurismoError::MissingRecommendations {
                    group: group.label().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows for `group`, in table order. Empty when nothing matches.
    pub fn lookup(&self, group: ProfileGroup) -> impl Iterator<Item = &RecommendationEntry> {
        self.entries.iter().filter(move |e| e.group == group)
    }

    /// Display lines for `group`, in table order.
    pub fn render(&self, group: ProfileGroup) -> Vec<RenderedRecommendation> {
        self.lookup(group).map(RenderedRecommendation::from).collect()
    }
}
