// SPDX-License-Identifier: PMPL-1.0-or-later
//! RGAA 1.9 - Is each image caption correctly linked to its image?
//!
//! A `<figure>` holding an image and a `<figcaption>` must expose the
//! grouping with `role="group"` or name itself with `aria-label` /
//! `aria-labelledby`.

use crate::checks::{has_any_attr, has_role, parse_selector, Check, CheckContext};
use crate::error::Result;
use crate::issue::{AccessibilityIssue, Impact};
use crate::locator::locate_element;
use tracing::debug;

const CRITERION: &str = "1.9";

/// Check that figure captions are associated with their image
pub struct FigureCaptionCheck;

impl Check for FigureCaptionCheck {
    fn name(&self) -> &str {
        "figure-caption"
    }

    fn criterion(&self) -> &str {
        CRITERION
    }

    fn description(&self) -> &str {
        "Checks that figures with an image and a caption expose their grouping (RGAA 1.9)"
    }

    fn check(&self, cx: &CheckContext<'_>) -> Result<Vec<AccessibilityIssue>> {
        let image_like = parse_selector("img, svg, canvas")?;
        let caption = parse_selector("figcaption")?;
        let mut issues = Vec::new();

        for (idx, figure) in cx.select("figure")?.iter().enumerate() {
            let has_image = figure.select(&image_like).next().is_some();
            let has_caption = figure.select(&caption).next().is_some();
            if !has_image || !has_caption {
                continue;
            }

            let is_group = has_role(figure, &["group"]);
            if is_group || has_any_attr(figure, &["aria-label", "aria-labelledby"]) {
                continue;
            }

            issues.push(
                cx.issue(
                    format!("figure-no-role-{}", idx),
                    CRITERION,
                    Impact::Minor,
                    "Figure with a caption has no role=\"group\"",
                )
                .with_element("figure")
                .at(locate_element(cx.source, figure))
                .with_recommendation(
                    "Add role=\"group\" to the figure element so assistive technologies associate the caption with the image.",
                )
                .with_code(figure.html()),
            );
        }

        debug!(criterion = CRITERION, count = issues.len(), "Figure caption check done");
        Ok(issues)
    }
}
