use std::f64::consts::TAU;

use crate::geometry::{Edge, Point};

use super::{BoundaryGraph, EdgeId};

/// Walks the boundary graph into closed contours.
///
/// At a vertex with several outgoing edges the walk takes the rightmost turn
/// when `min_coherence` is set, which keeps regions touching at a corner
/// apart, and the leftmost turn otherwise, which joins them. Returned
/// contours keep the direction of the boundary edges.
pub fn trace_contours(graph: &mut BoundaryGraph, min_coherence: bool) -> Vec<Vec<Point>> {
    let mut contours = Vec::new();

    for start_id in graph.ids_in_order() {
        let Some(start) = graph.remove_edge(start_id) else {
            continue;
        };

        let mut points = vec![start.p1];
        let mut current = start;
        loop {
            match next_step(graph, &current, &start, min_coherence) {
                Step::Edge(id) => {
                    let Some(next) = graph.remove_edge(id) else {
                        break;
                    };
                    points.push(current.p2);
                    current = next;
                }
                Step::Close => break,
            }
        }
        contours.push(points);
    }

    contours
}

enum Step {
    Edge(EdgeId),
    Close,
}

/// Chooses how to leave the end vertex of `current`.
///
/// Candidates are the unused outgoing edges plus the start edge when the
/// walk is back at its start vertex. Choosing the start edge, or running
/// out of candidates, closes the contour.
fn next_step(graph: &BoundaryGraph, current: &Edge, start: &Edge, min_coherence: bool) -> Step {
    let vertex = current.p2;
    let back = (
        f64::from(current.p1.x) - f64::from(vertex.x),
        f64::from(current.p1.y) - f64::from(vertex.y),
    );

    let mut best: Option<(f64, Step)> = None;
    let candidates = graph
        .outgoing(vertex)
        .map(|(id, e)| (Step::Edge(id), e))
        .chain((start.p1 == vertex).then_some((Step::Close, *start)));

    for (step, e) in candidates {
        let theta = ccw_angle(back, direction(&e));
        let better = match &best {
            None => true,
            Some((b, _)) if min_coherence => theta < *b,
            Some((b, _)) => theta > *b,
        };
        if better {
            best = Some((theta, step));
        }
    }

    best.map_or(Step::Close, |(_, step)| step)
}

fn direction(e: &Edge) -> (f64, f64) {
    (
        f64::from(e.p2.x) - f64::from(e.p1.x),
        f64::from(e.p2.y) - f64::from(e.p1.y),
    )
}

/// Counter-clockwise angle from `from` to `to`, in `(0, 2pi]`.
pub(super) fn ccw_angle(from: (f64, f64), to: (f64, f64)) -> f64 {
    let cross = from.0 * to.1 - from.1 * to.0;
    let dot = from.0 * to.0 + from.1 * to.1;
    let theta = cross.atan2(dot);
    if theta <= 0.0 {
        theta + TAU
    } else {
        theta
    }
}
