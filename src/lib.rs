// SPDX-License-Identifier: PMPL-1.0-or-later
//! rgaa-image-checker - RGAA 4.1 image accessibility checker
//!
//! Detects image accessibility problems in HTML documents according to the
//! "1.x" family of the RGAA (Référentiel Général d'Amélioration de
//! l'Accessibilité). Each issue is traceable to a criterion, a severity and
//! a position in the original source.
//!
//! ## Checks
//!
//! - **1.1**: Missing text alternative (`img`, `svg role="img"`, `area`, `input type="image"`)
//! - **1.2**: Decorative image not ignored by assistive technologies
//! - **1.3**: Irrelevant alternative (too short, generic, filename)
//! - **1.8**: Image likely containing text
//! - **1.9**: Figure caption not associated with its image
//!
//! ```
//! let issues = rgaa_image_checker::validate(r#"<img src="a.jpg">"#);
//! assert_eq!(issues[0].criterion_number, "1.1");
//! ```

pub mod catalog;
pub mod checks;
pub mod config;
pub mod error;
pub mod issue;
pub mod locator;
pub mod report;
pub mod scanner;
pub mod validator;

pub use catalog::{Catalog, Criterion};
pub use error::{Error, Result};
pub use issue::{AccessibilityIssue, Impact, IssueSet};
pub use validator::{validate, Validator};
