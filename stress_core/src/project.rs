//! # Project Data Structures
//!
//! The `StressProject` struct is the root container for saved analyses.
//! Projects serialize to `.sbx` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! StressProject
//! ├── meta: ProjectMetadata (version, engineer, title, timestamps)
//! ├── settings: ReportSettings (output precision)
//! └── items: HashMap<Uuid, AnalysisItem> (labelled parameter sets)
//! ```
//!
//! Only parameters are stored. Tables are regenerated on demand, so a file
//! can never hold a table that disagrees with its parameters.
//!
//! ## Example
//!
//! ```rust
//! use stress_core::project::{AnalysisItem, StressProject};
//! use stress_core::calculations::BeamSectionParameters;
//!
//! let mut project = StressProject::new("Jane Engineer", "Floor beam B-3");
//! let params = BeamSectionParameters::new(2.5e7, 8.36e7, -150.0, 150.0, 10.0);
//! let id = project.add_item(AnalysisItem::new("Midspan", params));
//!
//! let table = project.get_item(&id).unwrap().table().unwrap();
//! assert_eq!(table.len(), 31);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::flexure::{calculate, BeamSectionParameters, StressTable};
use crate::errors::StressResult;

/// Current schema version for .sbx files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressProject {
    /// Project metadata (version, engineer, title)
    pub meta: ProjectMetadata,

    /// Output settings shared by every analysis in the project
    #[serde(default)]
    pub settings: ReportSettings,

    /// All analyses, keyed by UUID
    pub items: HashMap<Uuid, AnalysisItem>,
}

impl StressProject {
    /// Create a new empty project.
    ///
    /// ```rust
    /// use stress_core::project::StressProject;
    ///
    /// let project = StressProject::new("John Doe", "Lintel check");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        StressProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                title: title.into(),
                created: now,
                modified: now,
            },
            settings: ReportSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add an analysis to the project, returning its UUID.
    pub fn add_item(&mut self, item: AnalysisItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove an analysis by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<AnalysisItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&AnalysisItem> {
        self.items.get(id)
    }

    /// Find the first analysis with the given label.
    pub fn find_by_label(&self, label: &str) -> Option<(&Uuid, &AnalysisItem)> {
        self.items.iter().find(|(_, item)| item.label == label)
    }

    /// Analyses ordered by label, then UUID, for stable listings.
    pub fn items_sorted(&self) -> Vec<(&Uuid, &AnalysisItem)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label.cmp(&b.1.label).then_with(|| a.0.cmp(b.0)));
        items
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for StressProject {
    fn default() -> Self {
        StressProject::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Report title
    pub title: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// A labelled parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisItem {
    /// User label (e.g., "B-1 midspan")
    pub label: String,

    pub parameters: BeamSectionParameters,
}

impl AnalysisItem {
    pub fn new(label: impl Into<String>, parameters: BeamSectionParameters) -> Self {
        AnalysisItem {
            label: label.into(),
            parameters,
        }
    }

    /// Regenerate the stress table for this analysis.
    pub fn table(&self) -> StressResult<StressTable> {
        calculate(&self.parameters)
    }
}

/// Output formatting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Decimal places for section coordinates
    pub y_precision: usize,

    /// Decimal places for stresses
    pub stress_precision: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            y_precision: 2,
            stress_precision: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_params() -> BeamSectionParameters {
        BeamSectionParameters::new(1000.0, 500.0, -50.0, 50.0, 10.0)
    }

    #[test]
    fn test_project_creation() {
        let project = StressProject::new("John Doe", "Lintel check");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.title, "Lintel check");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings, ReportSettings::default());
    }

    #[test]
    fn test_project_serialization() {
        let mut project = StressProject::new("Jane Engineer", "Roof purlin");
        project.add_item(AnalysisItem::new("P-1", sample_params()));
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("bending_moment_nmm"));

        let roundtrip: StressProject = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.item_count(), 1);
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let project = StressProject::new("A", "B");
        let mut value = serde_json::to_value(&project).unwrap();
        value.as_object_mut().unwrap().remove("settings");

        let loaded: StressProject = serde_json::from_value(value).unwrap();
        assert_eq!(loaded.settings.y_precision, 2);
        assert_eq!(loaded.settings.stress_precision, 4);
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = StressProject::new("Engineer", "Title");

        let id = project.add_item(AnalysisItem::new("B-1", sample_params()));
        assert_eq!(project.item_count(), 1);
        assert_eq!(project.get_item(&id).unwrap().table().unwrap().len(), 11);

        let removed = project.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
        assert!(project.remove_item(&id).is_none());
    }

    #[test]
    fn test_items_sorted_and_lookup() {
        let mut project = StressProject::new("Engineer", "Title");
        project.add_item(AnalysisItem::new("B-2", sample_params()));
        project.add_item(AnalysisItem::new("A-1", sample_params()));

        let labels: Vec<_> = project
            .items_sorted()
            .into_iter()
            .map(|(_, item)| item.label.as_str())
            .collect();
        assert_eq!(labels, vec!["A-1", "B-2"]);

        assert!(project.find_by_label("B-2").is_some());
        assert!(project.find_by_label("C-9").is_none());
    }
}
