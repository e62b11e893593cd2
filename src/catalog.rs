// SPDX-License-Identifier: PMPL-1.0-or-later
//! RGAA criteria catalog.
//!
//! The catalog is versioned reference data describing each RGAA criterion.
//! Only the "1.x" family (images) is exposed for lookup: a criterion from
//! another family never resolves, even when the full catalog contains it.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Prefix shared by every image-related criterion number
pub const IMAGE_CRITERIA_PREFIX: &str = "1.";

const BUILTIN_CATALOG: &str = include_str!("../data/rgaa-criteria.json");

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json(BUILTIN_CATALOG).expect("embedded RGAA catalog is valid")
});

/// Cross references from a criterion to WCAG and its techniques
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionReferences {
    /// WCAG success criteria covered by this criterion
    pub wcag: String,
    /// WCAG techniques, when listed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub techniques: Option<String>,
}

/// One numbered rule of the RGAA reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Dotted identifier, e.g. "1.1"
    pub number: String,
    pub title: String,
    pub description: String,
    /// Test procedures, informational only
    #[serde(default)]
    pub tests: Vec<String>,
    pub references: CriterionReferences,
    #[serde(
        default,
        rename = "cas_particuliers",
        skip_serializing_if = "Option::is_none"
    )]
    pub special_cases: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Criterion {
    /// WCAG cross-reference string
    pub fn wcag_reference(&self) -> &str {
        &self.references.wcag
    }

    /// Whether this criterion belongs to the images family
    pub fn is_image_criterion(&self) -> bool {
        self.number.starts_with(IMAGE_CRITERIA_PREFIX)
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    version: Option<String>,
    #[serde(rename = "rgaaCriteria")]
    criteria: Vec<Criterion>,
}

/// Read-only RGAA criteria catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    version: Option<String>,
    criteria: Vec<Criterion>,
    images: Vec<Criterion>,
}

impl Catalog {
    /// The catalog embedded in the binary, parsed on first use
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.version, file.criteria)
    }

    /// Load a catalog from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            criteria = catalog.criteria.len(),
            "Loaded criteria catalog"
        );
        Ok(catalog)
    }

    /// Build a catalog, rejecting duplicate criterion numbers
    pub fn new(version: Option<String>, criteria: Vec<Criterion>) -> Result<Self> {
        let mut seen = HashSet::new();
        for criterion in &criteria {
            if !seen.insert(criterion.number.as_str()) {
                return Err(Error::Catalog(format!(
                    "duplicate criterion number {}",
                    criterion.number
                )));
            }
        }

        let images = criteria
            .iter()
            .filter(|c| c.is_image_criterion())
            .cloned()
            .collect();

        Ok(Self {
            version,
            criteria,
            images,
        })
    }

    /// RGAA version of this catalog, if declared
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Every criterion of the catalog, in catalog order
    pub fn all(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Image criteria ("1.x"), in catalog order
    pub fn image_criteria(&self) -> &[Criterion] {
        &self.images
    }

    /// Resolve a criterion number against the image subset only
    pub fn resolve(&self, number: &str) -> Option<&Criterion> {
        self.images.iter().find(|c| c.number == number)
    }

    /// Title of an image criterion, or a synthesized fallback
    pub fn title_for(&self, number: &str) -> String {
        match self.resolve(number) {
            Some(criterion) => criterion.title.clone(),
            None => format!("RGAA criterion {}", number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(number: &str) -> Criterion {
        Criterion {
            number: number.to_string(),
            title: format!("Title {}", number),
            description: String::new(),
            tests: vec![],
            references: CriterionReferences {
                wcag: "1.1.1".to_string(),
                techniques: None,
            },
            special_cases: None,
            notes: None,
        }
    }

    #[test]
    fn test_builtin_image_criteria() {
        let catalog = Catalog::builtin();
        let numbers: Vec<_> = catalog
            .image_criteria()
            .iter()
            .map(|c| c.number.as_str())
            .collect();
        assert_eq!(
            numbers,
            vec!["1.1", "1.2", "1.3", "1.4", "1.5", "1.6", "1.7", "1.8", "1.9"]
        );
        assert_eq!(catalog.version(), Some("4.1"));
    }

    #[test]
    fn test_resolve_is_scoped_to_images() {
        let catalog = Catalog::builtin();
        assert!(catalog.all().iter().any(|c| c.number == "2.1"));
        assert!(catalog.resolve("2.1").is_none());
        assert!(catalog.resolve("1.9").is_some());
    }

    #[test]
    fn test_title_fallback() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.title_for("1.42"), "RGAA criterion 1.42");
        assert_eq!(catalog.title_for("3.1"), "RGAA criterion 3.1");
        assert!(catalog.title_for("1.1").contains("text alternative"));
    }

    #[test]
    fn test_duplicate_numbers_rejected() {
        let result = Catalog::new(None, vec![criterion("1.1"), criterion("1.1")]);
        assert!(matches!(result, Err(Error::Catalog(_))));
    }

    #[test]
    fn test_prefix_is_exact() {
        // "11.1" belongs to the forms family, not images
        let catalog = Catalog::new(None, vec![criterion("11.1"), criterion("1.3")]).unwrap();
        assert_eq!(catalog.image_criteria().len(), 1);
        assert_eq!(catalog.image_criteria()[0].number, "1.3");
    }

    #[test]
    fn test_wcag_reference() {
        let catalog = Catalog::builtin();
        let c = catalog.resolve("1.8").unwrap();
        assert!(c.wcag_reference().contains("1.4.5"));
        assert!(c.special_cases.is_some());
    }
}
