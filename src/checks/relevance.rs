// SPDX-License-Identifier: PMPL-1.0-or-later
//! RGAA 1.3 - Is the text alternative of each informative image relevant?
//!
//! A non-empty alternative is not relevant when it is too short, when it is
//! a generic word such as "image", or when it looks like a filename or path.
//! Each cause is reported separately, so one image may yield several issues.

use crate::checks::{Check, CheckContext};
use crate::error::Result;
use crate::issue::{AccessibilityIssue, Impact};
use crate::locator::locate_element;
use tracing::debug;

const CRITERION: &str = "1.3";

/// Check that text alternatives describe the image
pub struct RelevantAlternativeCheck;

impl Check for RelevantAlternativeCheck {
    fn name(&self) -> &str {
        "relevant-alternative"
    }

    fn criterion(&self) -> &str {
        CRITERION
    }

    fn description(&self) -> &str {
        "Checks image alternatives for short, generic or filename-like text (RGAA 1.3)"
    }

    fn check(&self, cx: &CheckContext<'_>) -> Result<Vec<AccessibilityIssue>> {
        let mut issues = Vec::new();

        for (idx, img) in cx.select(r#"img[alt]:not([alt=""])"#)?.iter().enumerate() {
            let alt = img.value().attr("alt").unwrap_or_default();
            let position = locate_element(cx.source, img);
            let code = img.html();

            if alt.chars().count() < cx.rules.min_alt_length {
                issues.push(
                    cx.issue(
                        format!("img-alt-too-short-{}", idx),
                        CRITERION,
                        Impact::Major,
                        "Text alternative is too short to be relevant",
                    )
                    .with_element("img")
                    .at(position)
                    .with_recommendation(
                        "Provide a more descriptive alternative that conveys the content and function of the image.",
                    )
                    .with_code(code.clone()),
                );
            }

            if cx.rules.is_generic_term(alt) {
                issues.push(
                    cx.issue(
                        format!("img-alt-generic-{}", idx),
                        CRITERION,
                        Impact::Major,
                        "Text alternative is generic and does not describe this image",
                    )
                    .with_element("img")
                    .at(position)
                    .with_recommendation(
                        "Replace the generic alternative with a specific description of the image content and function.",
                    )
                    .with_code(code.clone()),
                );
            }

            if cx.rules.has_image_extension(alt) || alt.contains('/') {
                issues.push(
                    cx.issue(
                        format!("img-alt-filename-{}", idx),
                        CRITERION,
                        Impact::Major,
                        "Text alternative contains a filename or a path",
                    )
                    .with_element("img")
                    .at(position)
                    .with_recommendation("Replace the filename with a description of the image content.")
                    .with_code(code),
                );
            }
        }

        debug!(criterion = CRITERION, count = issues.len(), "Relevant alternative check done");
        Ok(issues)
    }
}
