// SPDX-License-Identifier: PMPL-1.0-or-later
//! RGAA 1.2 - Is each decorative image correctly ignored by assistive technologies?
//!
//! An `<img alt="">` is treated as decorative; it must also carry
//! `role="presentation"` or `role="none"`.

use crate::checks::{has_role, Check, CheckContext};
use crate::error::Result;
use crate::issue::{AccessibilityIssue, Impact};
use crate::locator::locate_element;
use tracing::debug;

const CRITERION: &str = "1.2";

/// Roles that remove an element from the accessibility tree
const IGNORED_ROLES: &[&str] = &["presentation", "none"];

/// Check that decorative images are hidden from assistive technologies
pub struct DecorativeImageCheck;

impl Check for DecorativeImageCheck {
    fn name(&self) -> &str {
        "decorative-image"
    }

    fn criterion(&self) -> &str {
        CRITERION
    }

    fn description(&self) -> &str {
        "Checks that images with an empty alt are ignored by assistive technologies (RGAA 1.2)"
    }

    fn check(&self, cx: &CheckContext<'_>) -> Result<Vec<AccessibilityIssue>> {
        let mut issues = Vec::new();

        for (idx, img) in cx.select(r#"img[alt=""]"#)?.iter().enumerate() {
            if has_role(img, IGNORED_ROLES) {
                continue;
            }

            issues.push(
                cx.issue(
                    format!("img-decorative-{}", idx),
                    CRITERION,
                    Impact::Minor,
                    "Image with alt=\"\" has neither role=\"presentation\" nor role=\"none\"",
                )
                .with_element("img")
                .at(locate_element(cx.source, img))
                .with_recommendation(
                    "Add role=\"presentation\" or role=\"none\" to the decorative image so assistive technologies ignore it.",
                )
                .with_code(img.html()),
            );
        }

        debug!(criterion = CRITERION, count = issues.len(), "Decorative image check done");
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::run;

    #[test]
    fn test_decorative_without_role() {
        let issues = run(&DecorativeImageCheck, r#"<img src="divider.png" alt="">"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].impact, Impact::Minor);
        assert_eq!(issues[0].criterion_number, "1.2");
        assert_eq!(issues[0].id, "img-decorative-0");
    }

    #[test]
    fn test_presentation_role_suppresses() {
        let html = r#"
            <img src="a.png" alt="" role="presentation">
            <img src="b.png" alt="" role="none">
            <img src="c.png" alt="" role="NONE">
        "#;
        assert!(run(&DecorativeImageCheck, html).is_empty());
    }

    #[test]
    fn test_other_role_does_not_suppress() {
        let issues = run(&DecorativeImageCheck, r#"<img src="a.png" alt="" role="img">"#);
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_informative_and_missing_alt_ignored() {
        let html = r#"<img src="a.png" alt="Sunset over the bay"><img src="b.png">"#;
        assert!(run(&DecorativeImageCheck, html).is_empty());
    }
}
