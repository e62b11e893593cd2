// SPDX-License-Identifier: PMPL-1.0-or-later
//! Standalone HTML audit report.
//!
//! A single page with inline CSS: per-impact summary, a table of issues per
//! file with the full offending markup, then the list of evaluated image
//! criteria. Every interpolated value is escaped.

use super::combined_summary;
use crate::catalog::Catalog;
use crate::issue::Impact;
use crate::scanner::FileReport;
use chrono::Local;

const INLINE_CSS: &str = r#"
body { font-family: system-ui, -apple-system, sans-serif; line-height: 1.5; margin: 0; padding: 20px; color: #333; }
.container { max-width: 1200px; margin: 0 auto; }
header { margin-bottom: 30px; border-bottom: 1px solid #ddd; padding-bottom: 20px; }
h1 { margin-top: 0; color: #2563eb; }
.summary { display: flex; gap: 15px; margin-bottom: 20px; }
.stat { padding: 15px; border-radius: 8px; flex: 1; }
.critical { background-color: #fee2e2; color: #b91c1c; }
.major { background-color: #ffedd5; color: #c2410c; }
.minor { background-color: #fef3c7; color: #b45309; }
table { width: 100%; border-collapse: collapse; margin-bottom: 30px; }
th, td { text-align: left; padding: 12px; border-bottom: 1px solid #ddd; vertical-align: top; }
th { background-color: #f9fafb; }
.issue-critical { background-color: #fee2e2; }
.issue-major { background-color: #ffedd5; }
.issue-minor { background-color: #fef3c7; }
code { display: block; padding: 10px; background-color: #f1f5f9; border-radius: 4px; white-space: pre-wrap; font-family: monospace; margin-top: 5px; }
footer { margin-top: 40px; border-top: 1px solid #ddd; padding-top: 20px; color: #666; font-size: 0.9em; }
"#;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn impact_class(impact: Impact) -> &'static str {
    match impact {
        Impact::Critical => "critical",
        Impact::Major => "major",
        Impact::Minor => "minor",
    }
}

/// Generate the HTML report
pub fn generate_html_report(reports: &[FileReport], catalog: &Catalog) -> String {
    let summary = combined_summary(reports);
    let title = match reports {
        [single] => format!(
            "RGAA image accessibility report for {}",
            single.path.display()
        ),
        _ => "RGAA image accessibility report".to_string(),
    };

    let mut html = String::with_capacity(8192);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    html.push_str("<style>");
    html.push_str(INLINE_CSS);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");

    html.push_str("<header>\n<h1>RGAA accessibility audit - Images</h1>\n");
    for report in reports {
        html.push_str(&format!(
            "<p>Analyzed file: <strong>{}</strong></p>\n",
            escape_html(&report.path.display().to_string())
        ));
    }
    html.push_str(&format!(
        "<p>Date: {}</p>\n</header>\n",
        Local::now().format("%B %-d, %Y")
    ));

    html.push_str("<h2>Summary</h2>\n<div class=\"summary\">\n");
    for (impact, label, count) in [
        (Impact::Critical, "Critical issues", summary.critical),
        (Impact::Major, "Major issues", summary.major),
        (Impact::Minor, "Minor issues", summary.minor),
    ] {
        html.push_str(&format!(
            "<div class=\"stat {}\"><h3>{}</h3><p>{}</p></div>\n",
            impact_class(impact),
            label,
            count
        ));
    }
    html.push_str("</div>\n");

    html.push_str("<h2>Detailed issues</h2>\n");
    if summary.total == 0 {
        html.push_str("<p>No image accessibility issues were found.</p>\n");
    }
    for report in reports.iter().filter(|r| !r.issues.is_empty()) {
        html.push_str(&format!(
            "<h3>{}</h3>\n",
            escape_html(&report.path.display().to_string())
        ));
        html.push_str("<table>\n<thead><tr><th>Element</th><th>Line</th><th>Issue</th><th>RGAA criterion</th><th>Recommendation</th></tr></thead>\n<tbody>\n");
        for issue in &report.issues.issues {
            html.push_str(&format!(
                "<tr class=\"issue-{}\">\n<td>{}</td>\n<td>{}</td>\n<td>{}</td>\n<td>{} - {}</td>\n<td>{}<code>{}</code></td>\n</tr>\n",
                impact_class(issue.impact),
                escape_html(&issue.element),
                issue.line,
                escape_html(&issue.issue),
                escape_html(&issue.criterion_number),
                escape_html(&issue.criterion),
                escape_html(&issue.recommendation),
                escape_html(&issue.code),
            ));
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("<h2>RGAA image criteria</h2>\n");
    html.push_str("<p>The following criteria of the RGAA (R\u{e9}f\u{e9}rentiel G\u{e9}n\u{e9}ral d'Am\u{e9}lioration de l'Accessibilit\u{e9}) were evaluated:</p>\n<ul>\n");
    for criterion in catalog.image_criteria() {
        html.push_str(&format!(
            "<li><strong>{} - {}:</strong> {}</li>\n",
            escape_html(&criterion.number),
            escape_html(&criterion.title),
            escape_html(&criterion.description)
        ));
    }
    html.push_str("</ul>\n");

    html.push_str(&format!(
        "<footer><p>Generated by {} {}. RGAA version: {}</p></footer>\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        escape_html(catalog.version().unwrap_or("4.1"))
    ));
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate;
    use std::path::PathBuf;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img alt="a & b">"#),
            "&lt;img alt=&quot;a &amp; b&quot;&gt;"
        );
    }

    #[test]
    fn test_html_report_contents() {
        let reports = vec![FileReport {
            path: PathBuf::from("page.html"),
            issues: validate(r#"<img src="a.jpg"><img src="b.jpg" alt="">"#).into(),
        }];
        let html = generate_html_report(&reports, Catalog::builtin());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>RGAA image accessibility report for page.html</title>"));
        assert!(html.contains("<div class=\"stat critical\"><h3>Critical issues</h3><p>1</p></div>"));
        assert!(html.contains("<div class=\"stat minor\"><h3>Minor issues</h3><p>1</p></div>"));
        assert!(html.contains("<code>&lt;img src=&quot;a.jpg&quot;&gt;</code>"));
        assert!(!html.contains("<img src"));
        assert!(html.contains("<li><strong>1.9 - "));
        assert!(!html.contains("<li><strong>2.1 - "));
    }

    #[test]
    fn test_html_report_without_issues() {
        let html = generate_html_report(&[], Catalog::builtin());
        assert!(html.contains("No image accessibility issues were found."));
        assert!(!html.contains("<table>"));
    }
}
