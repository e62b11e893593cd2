// SPDX-License-Identifier: PMPL-1.0-or-later
//! Maps markup fragments back to positions in the original source text.
//!
//! The parser does not keep source offsets, so positions are recovered by a
//! case-insensitive substring search over the original text. Fragments are
//! rebuilt from the parsed tree and may differ from the source in quoting or
//! attribute order; [`locate_element`] falls back to anchoring on the tag
//! name and a distinctive attribute value when the serialized tag is absent.
//!
//! Known limitation: the search is line based, so a start tag split across
//! several lines (`<img\n  src="hero.jpg">`) is never matched and resolves to
//! (1,1). Identical elements all resolve to the first occurrence.

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

/// Attributes tried, in order, when anchoring an element by value
const ANCHOR_ATTRIBUTES: &[&str] = &["id", "src", "href", "name"];

/// 1-based position in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Sentinel used when a fragment cannot be found
    pub const START: Position = Position { line: 1, column: 1 };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// Locate `fragment` in `source`, or return (1,1) when it is not found
pub fn locate(source: &str, fragment: &str) -> Position {
    find(source, fragment).unwrap_or_default()
}

/// First line containing `fragment` (case-insensitive) and the column of
/// the match within it
pub fn find(source: &str, fragment: &str) -> Option<Position> {
    if fragment.is_empty() {
        return None;
    }
    let needle = fragment.to_lowercase();

    source.lines().enumerate().find_map(|(idx, line)| {
        let lower = line.to_lowercase();
        lower.find(&needle).map(|byte_offset| Position {
            line: idx + 1,
            column: lower[..byte_offset].chars().count() + 1,
        })
    })
}

/// Locate a parsed element in the source it was parsed from
pub fn locate_element(source: &str, element: &ElementRef<'_>) -> Position {
    if let Some(position) = find(source, &opening_tag(element)) {
        return position;
    }

    let opener = format!("<{}", element.value().name());
    let anchor = ANCHOR_ATTRIBUTES
        .iter()
        .filter_map(|attr| element.value().attr(attr))
        .find(|value| !value.is_empty());

    anchor
        .and_then(|value| find_with_anchor(source, &opener, value))
        .unwrap_or_default()
}

/// First line holding `anchor` after an `opener`, positioned on the last
/// `opener` preceding the anchor
fn find_with_anchor(source: &str, opener: &str, anchor: &str) -> Option<Position> {
    let opener = opener.to_lowercase();
    let anchor = anchor.to_lowercase();

    source.lines().enumerate().find_map(|(idx, line)| {
        let lower = line.to_lowercase();
        let anchor_offset = lower.find(&anchor)?;
        lower[..anchor_offset].rfind(&opener).map(|byte_offset| Position {
            line: idx + 1,
            column: lower[..byte_offset].chars().count() + 1,
        })
    })
}

/// Serialize the start tag of an element, attributes in source order
pub fn opening_tag(element: &ElementRef<'_>) -> String {
    let value = element.value();
    let attrs: String = value
        .attrs()
        .map(|(name, val)| format!(" {}=\"{}\"", name, escape_attribute(val)))
        .collect();
    format!("<{}{}>", value.name(), attrs)
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
