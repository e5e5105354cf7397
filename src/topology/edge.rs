use std::cmp::Ordering;
use std::collections::HashMap;

use crate::geometry::{Edge, Point};
use crate::math::intersect_2d::cross;

slotmap::new_key_type! {
    /// Unique identifier for a boundary edge in the graph.
    pub struct EdgeId;
}

/// Canonical emission order of result edges.
///
/// Edges sort by their low point (y first), then non-horizontal before
/// horizontal, then by the direction angle from the low point, then by the
/// high point.
#[must_use]
pub fn edge_order(a: &Edge, b: &Edge) -> Ordering {
    a.low()
        .cmp(&b.low())
        .then(a.is_horizontal().cmp(&b.is_horizontal()))
        .then_with(|| {
            // Same low point here; the higher ends lie in the upper half plane.
            0.cmp(&cross(a.low(), a.high(), b.high()))
        })
        .then(a.high().cmp(&b.high()))
        .then(a.p1.cmp(&b.p1))
}

/// Joins collinear fragments meeting at vertices of degree two.
///
/// A fragment continues into the next one only where the shared vertex has
/// exactly one incoming and one outgoing edge and both point the same way.
#[must_use]
pub fn join_collinear(edges: &[Edge]) -> Vec<Edge> {
    let mut incoming: HashMap<Point, usize> = HashMap::new();
    let mut outgoing: HashMap<Point, Vec<usize>> = HashMap::new();
    for (i, e) in edges.iter().enumerate() {
        *incoming.entry(e.p2).or_default() += 1;
        outgoing.entry(e.p1).or_default().push(i);
    }

    let successor: Vec<Option<usize>> = edges
        .iter()
        .map(|e| {
            if incoming.get(&e.p2) != Some(&1) {
                return None;
            }
            match outgoing.get(&e.p2).map(Vec::as_slice) {
                Some(&[j]) if continues_straight(e, &edges[j]) => Some(j),
                _ => None,
            }
        })
        .collect();

    let mut has_predecessor = vec![false; edges.len()];
    for &j in successor.iter().flatten() {
        has_predecessor[j] = true;
    }

    let mut used = vec![false; edges.len()];
    let mut result = Vec::new();
    let chain = |start: usize, used: &mut [bool]| {
        used[start] = true;
        let mut end = edges[start].p2;
        let mut k = start;
        while let Some(j) = successor[k] {
            if used[j] {
                break;
            }
            used[j] = true;
            end = edges[j].p2;
            k = j;
        }
        Edge::new(edges[start].p1, end)
    };

    for i in 0..edges.len() {
        if !has_predecessor[i] {
            result.push(chain(i, &mut used));
        }
    }
    // Closed chains have no start; they cannot enclose area but are kept.
    for i in 0..edges.len() {
        if !used[i] {
            result.push(chain(i, &mut used));
        }
    }
    result
}

fn continues_straight(a: &Edge, b: &Edge) -> bool {
    cross(a.p1, a.p2, b.p2) == 0 && a.dx() * b.dx() + a.dy() * b.dy() > 0
}
