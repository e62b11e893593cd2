// SPDX-License-Identifier: PMPL-1.0-or-later
//! RGAA image checks.
//!
//! Each check evaluates one criterion of the RGAA "1.x" family against a
//! parsed document and the source text it came from. Checks never mutate
//! the document and report issues in document order.

pub mod alternatives;
pub mod captions;
pub mod decorative;
pub mod relevance;
pub mod text_images;

use crate::catalog::Catalog;
use crate::config::CompiledRules;
use crate::error::{Error, Result};
use crate::issue::{AccessibilityIssue, Impact};
use scraper::{ElementRef, Html, Selector};

/// Everything a check may read during one validation run
pub struct CheckContext<'a> {
    /// Parsed document
    pub document: &'a Html,
    /// Original source text, used for positions
    pub source: &'a str,
    pub catalog: &'a Catalog,
    pub rules: &'a CompiledRules,
}

impl<'a> CheckContext<'a> {
    /// Elements matching `selector`, in document order
    pub fn select(&self, selector: &str) -> Result<Vec<ElementRef<'a>>> {
        let selector = parse_selector(selector)?;
        Ok(self.document.select(&selector).collect())
    }

    /// Start an issue for `criterion_number` with its title resolved
    pub fn issue(
        &self,
        id: impl Into<String>,
        criterion_number: &str,
        impact: Impact,
        message: &str,
    ) -> AccessibilityIssue {
        AccessibilityIssue::new(self.catalog, id, criterion_number, impact, message)
    }
}

/// Trait implemented by all checks
pub trait Check: Send + Sync {
    /// Short identifier of this check
    fn name(&self) -> &str;

    /// RGAA criterion evaluated by this check
    fn criterion(&self) -> &str;

    /// Short description of what this check looks for
    fn description(&self) -> &str;

    /// Evaluate the document and return issues in document order
    fn check(&self, cx: &CheckContext<'_>) -> Result<Vec<AccessibilityIssue>>;
}

/// The image checks, in the order their issues are reported
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(alternatives::TextAlternativeCheck),
        Box::new(decorative::DecorativeImageCheck),
        Box::new(relevance::RelevantAlternativeCheck),
        Box::new(text_images::TextImageCheck),
        Box::new(captions::FigureCaptionCheck),
    ]
}

/// Parse a CSS selector, reporting failures as [`Error::Selector`]
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Whether any of `names` is present on the element
fn has_any_attr(element: &ElementRef<'_>, names: &[&str]) -> bool {
    names.iter().any(|name| element.value().attr(name).is_some())
}

/// Whether the element's `role` is one of `roles`, ignoring case and
/// surrounding whitespace
fn has_role(element: &ElementRef<'_>, roles: &[&str]) -> bool {
    element
        .value()
        .attr("role")
        .map(|role| roles.iter().any(|r| role.trim().eq_ignore_ascii_case(r)))
        .unwrap_or(false)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::validator::parse_document;

    /// Run one check against `html` with the built-in catalog and default rules
    pub fn run(check: &dyn Check, html: &str) -> Vec<AccessibilityIssue> {
        let document = parse_document(html);
        let rules = CompiledRules::default();
        let cx = CheckContext {
            document: &document,
            source: html,
            catalog: Catalog::builtin(),
            rules: &rules,
        };
        check.check(&cx).expect("check should succeed")
    }
}
