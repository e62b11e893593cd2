// SPDX-License-Identifier: PMPL-1.0-or-later
//! RGAA 1.8 - Images of text should be replaced by styled text.
//!
//! The parser cannot see pixels, so this check guesses from the alternative
//! and from the `src` filename. False positives are expected.

use crate::checks::{Check, CheckContext};
use crate::error::Result;
use crate::issue::{AccessibilityIssue, Impact};
use crate::locator::locate_element;
use regex::Regex;
use tracing::debug;

const CRITERION: &str = "1.8";

/// Heuristic check for images that probably contain text
pub struct TextImageCheck;

impl Check for TextImageCheck {
    fn name(&self) -> &str {
        "text-image"
    }

    fn criterion(&self) -> &str {
        CRITERION
    }

    fn description(&self) -> &str {
        "Flags images whose alternative or filename suggests they contain text (RGAA 1.8)"
    }

    fn check(&self, cx: &CheckContext<'_>) -> Result<Vec<AccessibilityIssue>> {
        let mut issues = Vec::new();

        for (idx, img) in cx.select("img[alt]")?.iter().enumerate() {
            let alt = img.value().attr("alt").unwrap_or_default();
            let src = img.value().attr("src").unwrap_or_default();

            let suggests_text = matches_any(&cx.rules.alt_text_indicators, alt)
                || matches_any(&cx.rules.filename_text_indicators, file_name(src));
            if !suggests_text {
                continue;
            }

            issues.push(
                cx.issue(
                    format!("img-text-{}", idx),
                    CRITERION,
                    Impact::Minor,
                    "Image likely contains text",
                )
                .with_element("img")
                .at(locate_element(cx.source, img))
                .with_recommendation(
                    "If possible, replace this image of text with real text styled with CSS. Images of text cannot be resized, restyled or adapted by users.",
                )
                .with_code(img.html()),
            );
        }

        debug!(criterion = CRITERION, count = issues.len(), "Text image check done");
        Ok(issues)
    }
}

fn matches_any(patterns: &[Regex], text: &str) -> bool {
    !text.is_empty() && patterns.iter().any(|re| re.is_match(text))
}

/// Last path segment of a URL-ish `src`
fn file_name(src: &str) -> &str {
    src.rsplit('/').next().unwrap_or(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::run;

    #[test]
    fn test_alt_indicator() {
        let issues = run(&TextImageCheck, r#"<img src="a.jpg" alt="Famous quote by Ada Lovelace">"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "img-text-0");
        assert_eq!(issues[0].impact, Impact::Minor);
        assert_eq!(issues[0].criterion_number, "1.8");
    }

    #[test]
    fn test_filename_indicator_uses_last_segment() {
        let html = r#"
            <img src="/img/banner-summer.png" alt="Summer sale">
            <img src="/title/photo.png" alt="Our office">
        "#;
        let issues = run(&TextImageCheck, html);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "img-text-0");
        assert_eq!(issues[0].line, 2);
    }

    #[test]
    fn test_case_insensitive() {
        let issues = run(&TextImageCheck, r#"<img src="HEADER.PNG" alt="Welcome">"#);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_one_issue_per_image() {
        let issues = run(&TextImageCheck, r#"<img src="slogan-typo.png" alt="Slogan text">"#);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_requires_alt_attribute() {
        assert!(run(&TextImageCheck, r#"<img src="title.png">"#).is_empty());
        assert_eq!(run(&TextImageCheck, r#"<img src="title.png" alt="">"#).len(), 1);
    }

    #[test]
    fn test_no_indicator() {
        let issues = run(
            &TextImageCheck,
            r#"<img src="a.jpg" alt="Portrait of the author smiling outdoors">"#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("https://cdn.example.com/a/b/title.png"), "title.png");
        assert_eq!(file_name("title.png"), "title.png");
        assert_eq!(file_name("dir/"), "");
    }
}
