// SPDX-License-Identifier: PMPL-1.0-or-later
//! RGAA 1.1 - Does each informative image have a text alternative?
//!
//! Flags image-like elements that expose no text alternative at all:
//! - `<img>` without an `alt` attribute (an empty `alt` is a decision, not an omission)
//! - `<svg role="img">` without `<title>`, `aria-label` or `aria-labelledby`
//! - `<area href>` without `alt`
//! - `<input type="image">` without `alt`

use crate::checks::{has_any_attr, parse_selector, Check, CheckContext};
use crate::error::Result;
use crate::issue::{AccessibilityIssue, Impact};
use crate::locator::{locate_element, opening_tag};
use tracing::debug;

const CRITERION: &str = "1.1";

/// Check for missing text alternatives
pub struct TextAlternativeCheck;

impl Check for TextAlternativeCheck {
    fn name(&self) -> &str {
        "text-alternative"
    }

    fn criterion(&self) -> &str {
        CRITERION
    }

    fn description(&self) -> &str {
        "Checks images, SVG images, image map areas and image buttons for a text alternative (RGAA 1.1)"
    }

    fn check(&self, cx: &CheckContext<'_>) -> Result<Vec<AccessibilityIssue>> {
        let mut issues = Vec::new();

        check_images(cx, &mut issues)?;
        check_svg_images(cx, &mut issues)?;
        check_areas(cx, &mut issues)?;
        check_image_buttons(cx, &mut issues)?;

        debug!(criterion = CRITERION, count = issues.len(), "Text alternative check done");
        Ok(issues)
    }
}

fn check_images(cx: &CheckContext<'_>, issues: &mut Vec<AccessibilityIssue>) -> Result<()> {
    for (idx, img) in cx.select("img")?.iter().enumerate() {
        if img.value().attr("alt").is_some() {
            continue;
        }

        issues.push(
            cx.issue(
                format!("img-alt-missing-{}", idx),
                CRITERION,
                Impact::Critical,
                "Image has no text alternative",
            )
            .with_element("img")
            .at(locate_element(cx.source, img))
            .with_recommendation(
                "Add an alt attribute describing the content or function of the image. Use alt=\"\" if the image is decorative.",
            )
            .with_code(opening_tag(img)),
        );
    }
    Ok(())
}

fn check_svg_images(cx: &CheckContext<'_>, issues: &mut Vec<AccessibilityIssue>) -> Result<()> {
    let title = parse_selector("title")?;

    for (idx, svg) in cx.select(r#"svg[role="img"]"#)?.iter().enumerate() {
        let has_title = svg.select(&title).next().is_some();
        if has_title || has_any_attr(svg, &["aria-label", "aria-labelledby"]) {
            continue;
        }

        issues.push(
            cx.issue(
                format!("svg-alt-missing-{}", idx),
                CRITERION,
                Impact::Critical,
                "Vector image (SVG) with role=\"img\" has no text alternative",
            )
            .with_element("svg")
            .at(locate_element(cx.source, svg))
            .with_recommendation(
                "Add a <title> element, an aria-label attribute or an aria-labelledby attribute to the SVG element.",
            )
            .with_code(svg.html()),
        );
    }
    Ok(())
}

fn check_areas(cx: &CheckContext<'_>, issues: &mut Vec<AccessibilityIssue>) -> Result<()> {
    for (idx, area) in cx.select("area[href]")?.iter().enumerate() {
        if area.value().attr("alt").is_some() {
            continue;
        }

        issues.push(
            cx.issue(
                format!("area-alt-missing-{}", idx),
                CRITERION,
                Impact::Critical,
                "Image map area has no text alternative",
            )
            .with_element("area")
            .at(locate_element(cx.source, area))
            .with_recommendation(
                "Add an alt attribute to the <area> element describing the link destination.",
            )
            .with_code(area.html()),
        );
    }
    Ok(())
}

fn check_image_buttons(cx: &CheckContext<'_>, issues: &mut Vec<AccessibilityIssue>) -> Result<()> {
    for (idx, input) in cx.select(r#"input[type="image"]"#)?.iter().enumerate() {
        if input.value().attr("alt").is_some() {
            continue;
        }

        issues.push(
            cx.issue(
                format!("input-image-alt-missing-{}", idx),
                CRITERION,
                Impact::Critical,
                "Image button has no text alternative",
            )
            .with_element(r#"input type="image""#)
            .at(locate_element(cx.source, input))
            .with_recommendation("Add an alt attribute to the image button describing its function.")
            .with_code(input.html()),
        );
    }
    Ok(())
}
