// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility issue types.
//!
//! An [`AccessibilityIssue`] is one concrete violation of an RGAA criterion
//! found in a specific document. Issues are created fresh by every
//! validation run and carry no identity across runs.

use crate::catalog::Catalog;
use crate::locator::Position;
use serde::{Deserialize, Serialize};

/// Severity of an issue, ordered `Critical > Major > Minor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Inconvenience; content stays usable
    Minor,
    /// Information is degraded for some users
    Major,
    /// Information is unavailable to some users
    Critical,
}

impl Impact {
    /// All impacts, most severe first
    pub const ALL: [Impact; 3] = [Impact::Critical, Impact::Major, Impact::Minor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Critical => "critical",
            Impact::Major => "major",
            Impact::Minor => "minor",
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Critical => write!(f, "CRITICAL"),
            Impact::Major => write!(f, "MAJOR"),
            Impact::Minor => write!(f, "MINOR"),
        }
    }
}

/// One violation of an RGAA image criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityIssue {
    /// Unique within one validation run (rule slug + ordinal)
    pub id: String,
    /// Label of the offending markup kind, e.g. `img` or `input type="image"`
    pub element: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Criterion title, copied from the catalog when the issue was created
    pub criterion: String,
    /// Criterion number, e.g. "1.1"
    pub criterion_number: String,
    /// What is wrong
    pub issue: String,
    pub impact: Impact,
    /// How to fix it
    pub recommendation: String,
    /// Offending markup, never truncated
    pub code: String,
}

impl AccessibilityIssue {
    /// Create an issue for `criterion_number`, resolving its title in `catalog`
    pub fn new(
        catalog: &Catalog,
        id: impl Into<String>,
        criterion_number: &str,
        impact: Impact,
        issue: &str,
    ) -> Self {
        Self {
            id: id.into(),
            element: String::new(),
            line: 1,
            column: 1,
            criterion: catalog.title_for(criterion_number),
            criterion_number: criterion_number.to_string(),
            issue: issue.to_string(),
            impact,
            recommendation: String::new(),
            code: String::new(),
        }
    }

    /// Set the element label
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.to_string();
        self
    }

    /// Set the source position
    pub fn at(mut self, position: Position) -> Self {
        self.line = position.line;
        self.column = position.column;
        self
    }

    /// Set the recommendation
    pub fn with_recommendation(mut self, recommendation: &str) -> Self {
        self.recommendation = recommendation.to_string();
        self
    }

    /// Set the offending markup
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// `line:column` for display
    pub fn location_string(&self) -> String {
        format!("{}:{}", self.line, self.column)
    }
}

/// Issue counts per impact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub total: usize,
    pub critical: usize,
    pub major: usize,
    pub minor: usize,
}

/// Ordered collection of issues with aggregation helpers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSet {
    /// Issues in check order, then document order
    pub issues: Vec<AccessibilityIssue>,
}

impl IssueSet {
    /// Count issues with the given impact
    pub fn count(&self, impact: Impact) -> usize {
        self.issues.iter().filter(|i| i.impact == impact).count()
    }

    /// Counts per impact
    pub fn summary(&self) -> ImpactSummary {
        ImpactSummary {
            total: self.len(),
            critical: self.count(Impact::Critical),
            major: self.count(Impact::Major),
            minor: self.count(Impact::Minor),
        }
    }

    /// Group issues by criterion number, in order of first appearance
    pub fn by_criterion(&self) -> Vec<(&str, Vec<&AccessibilityIssue>)> {
        let mut groups: Vec<(&str, Vec<&AccessibilityIssue>)> = Vec::new();
        for issue in &self.issues {
            match groups
                .iter_mut()
                .find(|(number, _)| *number == issue.criterion_number)
            {
                Some((_, members)) => members.push(issue),
                None => groups.push((issue.criterion_number.as_str(), vec![issue])),
            }
        }
        groups
    }

    /// Check if any issue is critical
    pub fn has_critical(&self) -> bool {
        self.issues.iter().any(|i| i.impact == Impact::Critical)
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl From<Vec<AccessibilityIssue>> for IssueSet {
    fn from(issues: Vec<AccessibilityIssue>) -> Self {
        Self { issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: &str, number: &str, impact: Impact) -> AccessibilityIssue {
        AccessibilityIssue::new(Catalog::builtin(), id, number, impact, "problem")
            .with_element("img")
    }

    #[test]
    fn test_impact_ordering() {
        assert!(Impact::Critical > Impact::Major);
        assert!(Impact::Major > Impact::Minor);
        let mut impacts = vec![Impact::Minor, Impact::Critical, Impact::Major];
        impacts.sort();
        assert_eq!(impacts, vec![Impact::Minor, Impact::Major, Impact::Critical]);
    }

    #[test]
    fn test_issue_serializes_with_camel_case() {
        let issue = issue("img-alt-missing-0", "1.1", Impact::Critical);
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["criterionNumber"], "1.1");
        assert_eq!(json["impact"], "critical");
        assert_eq!(json["line"], 1);
        assert_eq!(json["column"], 1);
    }

    #[test]
    fn test_new_resolves_title() {
        let known = issue("a", "1.2", Impact::Minor);
        assert!(known.criterion.contains("decorative"));
        let unknown = issue("b", "1.99", Impact::Minor);
        assert_eq!(unknown.criterion, "RGAA criterion 1.99");
    }

    #[test]
    fn test_summary_and_grouping() {
        let set = IssueSet::from(vec![
            issue("a", "1.1", Impact::Critical),
            issue("b", "1.3", Impact::Major),
            issue("c", "1.1", Impact::Critical),
            issue("d", "1.2", Impact::Minor),
        ]);
        assert_eq!(
            set.summary(),
            ImpactSummary { total: 4, critical: 2, major: 1, minor: 1 }
        );
        let groups = set.by_criterion();
        let numbers: Vec<_> = groups.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec!["1.1", "1.3", "1.2"]);
        assert_eq!(groups[0].1.len(), 2);
        assert!(set.has_critical());
    }
}
