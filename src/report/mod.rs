// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for image accessibility issues.
//!
//! Supports multiple output formats:
//! - Text: human-readable issues grouped by criterion
//! - JSON: the issue records for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration
//! - HTML: standalone audit page, see [`html`]

pub mod html;

use crate::catalog::Catalog;
use crate::issue::{Impact, ImpactSummary, IssueSet};
use crate::scanner::FileReport;
use serde::Serialize;

/// Code snippets longer than this are shortened in text output
pub const SNIPPET_WIDTH: usize = 50;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
    /// Standalone HTML page
    Html,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report for the scanned files
pub fn generate_report(reports: &[FileReport], catalog: &Catalog, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(reports),
        OutputFormat::Json => generate_json_report(reports),
        OutputFormat::Sarif => generate_sarif_report(reports),
        OutputFormat::Html => html::generate_html_report(reports, catalog),
    }
}

/// Shorten `code` for display; the issue itself keeps the full markup
pub fn truncate_snippet(code: &str, width: usize) -> String {
    if code.chars().count() <= width {
        return code.to_string();
    }
    let kept: String = code.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Counts across every scanned file
pub fn combined_summary(reports: &[FileReport]) -> ImpactSummary {
    reports
        .iter()
        .map(|r| r.issues.summary())
        .fold(ImpactSummary::default(), |acc, s| ImpactSummary {
            total: acc.total + s.total,
            critical: acc.critical + s.critical,
            major: acc.major + s.major,
            minor: acc.minor + s.minor,
        })
}

/// Generate human-readable text report
fn generate_text_report(reports: &[FileReport]) -> String {
    let mut output = String::new();

    output.push_str("=== RGAA Image Accessibility Report ===\n\n");

    let summary = combined_summary(reports);
    if summary.total == 0 {
        output.push_str("No image accessibility issues found.\n");
        return output;
    }

    output.push_str(&format!(
        "Found {} issue(s): {} critical, {} major, {} minor\n\n",
        summary.total, summary.critical, summary.major, summary.minor
    ));

    for report in reports.iter().filter(|r| !r.issues.is_empty()) {
        output.push_str(&format!("### {}\n\n", report.path.display()));
        push_text_issues(&mut output, &report.issues);
    }

    if summary.critical > 0 {
        output.push_str("RESULT: FAIL (critical issues found)\n");
    } else {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    }

    output
}

fn push_text_issues(output: &mut String, issues: &IssueSet) {
    for (number, group) in issues.by_criterion() {
        output.push_str(&format!(
            "--- RGAA {} - {} ({}) ---\n",
            number,
            group[0].criterion,
            group.len()
        ));

        for issue in group {
            output.push_str(&format!(
                "[{}] {} <{}> {}\n",
                issue.impact, issue.id, issue.element, issue.issue
            ));
            output.push_str(&format!("  Location: {}\n", issue.location_string()));
            output.push_str(&format!(
                "  Code: {}\n",
                truncate_snippet(&issue.code, SNIPPET_WIDTH)
            ));
            output.push_str(&format!("  Fix: {}\n\n", issue.recommendation));
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: ImpactSummary,
    files: &'a [FileReport],
}

/// Generate JSON report
fn generate_json_report(reports: &[FileReport]) -> String {
    let report = JsonReport {
        summary: combined_summary(reports),
        files: reports,
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize issues: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
    region: SarifRegion,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
    #[serde(rename = "startColumn")]
    start_column: usize,
}

/// Generate SARIF report
fn generate_sarif_report(reports: &[FileReport]) -> String {
    let results: Vec<SarifResult> = reports
        .iter()
        .flat_map(|report| {
            report.issues.issues.iter().map(move |issue| {
                let level = match issue.impact {
                    Impact::Critical => "error",
                    Impact::Major => "warning",
                    Impact::Minor => "note",
                };

                SarifResult {
                    rule_id: format!("RGAA-{}", issue.criterion_number),
                    level: level.to_string(),
                    message: SarifMessage {
                        text: format!("{}. {}", issue.issue, issue.recommendation),
                    },
                    locations: vec![SarifLocation {
                        physical_location: SarifPhysicalLocation {
                            artifact_location: SarifArtifactLocation {
                                uri: report.path.display().to_string(),
                            },
                            region: SarifRegion {
                                start_line: issue.line,
                                start_column: issue.column,
                            },
                        },
                    }],
                }
            })
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate;
    use std::path::PathBuf;

    fn sample_reports() -> Vec<FileReport> {
        vec![FileReport {
            path: PathBuf::from("index.html"),
            issues: validate(
                "<p>hi</p>\n<img src=\"assets/very/long/path/to/some/portrait-image-file.jpg\">",
            )
            .into(),
        }]
    }

    #[test]
    fn test_text_report_empty() {
        let report = generate_report(&[], Catalog::builtin(), OutputFormat::Text);
        assert!(report.contains("No image accessibility issues found"));
    }

    #[test]
    fn test_text_report_with_issues() {
        let report = generate_report(&sample_reports(), Catalog::builtin(), OutputFormat::Text);
        assert!(report.contains("img-alt-missing-0"));
        assert!(report.contains("RGAA 1.1"));
        assert!(report.contains("Location: 2:1"));
        assert!(report.contains("RESULT: FAIL"));
    }

    #[test]
    fn test_truncate_snippet() {
        assert_eq!(truncate_snippet("<img>", 50), "<img>");
        let long = "x".repeat(60);
        let short = truncate_snippet(&long, 50);
        assert_eq!(short.chars().count(), 50);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_json_report_keeps_full_code() {
        let reports = sample_reports();
        let report = generate_report(&reports, Catalog::builtin(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["summary"]["critical"], 1);
        let issue = &parsed["files"][0]["issues"][0];
        assert_eq!(issue["criterionNumber"], "1.1");
        assert_eq!(issue["code"], reports[0].issues.issues[0].code.as_str());
    }

    #[test]
    fn test_sarif_report() {
        let report = generate_report(&sample_reports(), Catalog::builtin(), OutputFormat::Sarif);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");
        let result = &parsed["runs"][0]["results"][0];
        assert_eq!(result["ruleId"], "RGAA-1.1");
        assert_eq!(result["level"], "error");
        assert_eq!(result["locations"][0]["physicalLocation"]["region"]["startLine"], 2);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
