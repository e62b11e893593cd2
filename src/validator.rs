// SPDX-License-Identifier: PMPL-1.0-or-later
//! Validation entry point.
//!
//! Parses one HTML source with a forgiving parser, runs every image check in
//! a fixed order and concatenates their issues. There is no deduplication:
//! the same element may be reported by several checks.
//!
//! Documents are parsed with scripting disabled, so `<noscript>` content is
//! built as elements and its images are checked like any other.

use crate::catalog::Catalog;
use crate::checks::{self, Check, CheckContext};
use crate::config::{CompiledRules, RuleConfig};
use crate::error::Result;
use crate::issue::AccessibilityIssue;
use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::Html;
use std::sync::LazyLock;
use tracing::{debug, error};

static DEFAULT_VALIDATOR: LazyLock<Validator> = LazyLock::new(Validator::default);

/// Parse a full document with scripting disabled
pub fn parse_document(source: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(Html::new_document(), opts).one(source)
}

/// Runs the RGAA image checks against HTML sources
pub struct Validator {
    catalog: Catalog,
    rules: CompiledRules,
    checks: Vec<Box<dyn Check>>,
}

impl Validator {
    /// Create a validator from a catalog and compiled rules
    pub fn new(catalog: Catalog, rules: CompiledRules) -> Self {
        Self::with_checks(catalog, rules, checks::default_checks())
    }

    /// Create a validator running `checks` in the given order
    pub fn with_checks(
        catalog: Catalog,
        rules: CompiledRules,
        checks: Vec<Box<dyn Check>>,
    ) -> Self {
        Self {
            catalog,
            rules,
            checks,
        }
    }

    /// Create a validator from rule configuration and the built-in catalog
    pub fn from_config(rules: &RuleConfig) -> Result<Self> {
        Ok(Self::new(
            Catalog::builtin().clone(),
            CompiledRules::compile(rules)?,
        ))
    }

    /// The catalog used to resolve criterion titles
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The checks run by this validator, in order
    pub fn checks(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|c| c.as_ref())
    }

    /// Validate `source`, surfacing check failures as errors
    pub fn try_validate(&self, source: &str) -> Result<Vec<AccessibilityIssue>> {
        let document = parse_document(source);
        if !document.errors.is_empty() {
            debug!(count = document.errors.len(), "Recovered from HTML parse errors");
        }

        let cx = CheckContext {
            document: &document,
            source,
            catalog: &self.catalog,
            rules: &self.rules,
        };

        let mut issues = Vec::new();
        for check in &self.checks {
            let found = check.check(&cx)?;
            debug!(check = check.name(), count = found.len(), "Check finished");
            issues.extend(found);
        }

        Ok(issues)
    }

    /// Validate `source`; a failed analysis is logged and yields no issues
    pub fn validate(&self, source: &str) -> Vec<AccessibilityIssue> {
        match self.try_validate(source) {
            Ok(issues) => issues,
            Err(e) => {
                error!(error = %e, "Image accessibility analysis failed");
                Vec::new()
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Catalog::builtin().clone(), CompiledRules::default())
    }
}

/// Validate `source` with the built-in catalog and default rules
pub fn validate(source: &str) -> Vec<AccessibilityIssue> {
    DEFAULT_VALIDATOR.validate(source)
}
