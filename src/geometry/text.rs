//! Text forms of edge and polygon collections.
//!
//! Collections are `;`-joined in emission order, e.g.
//! `(0,0;0,1000);(1000,0;0,0)` for edges.

use std::fmt::Display;

use crate::error::GeometryError;

use super::{Edge, Polygon};

/// Joins items with `;`.
#[must_use]
pub fn to_text<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

/// Parses a `;`-joined edge list.
///
/// # Errors
///
/// Returns `GeometryError::Parse` if any element is malformed.
pub fn parse_edges(s: &str) -> Result<Vec<Edge>, GeometryError> {
    split_top_level(s, ';')
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Parses a `;`-joined polygon list.
///
/// # Errors
///
/// Returns `GeometryError::Parse` if any element is malformed.
pub fn parse_polygons(s: &str) -> Result<Vec<Polygon>, GeometryError> {
    split_top_level(s, ';')
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Splits at `sep` occurrences outside parentheses.
pub(crate) fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            c if c == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}
