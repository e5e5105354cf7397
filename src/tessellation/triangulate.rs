use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::geometry::{Point, Polygon};
use crate::math::snap;

use super::{Triangle, TriangulationParams};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Decomposes a polygon, holes included, into triangles over its own vertices.
pub struct Triangulate<'a> {
    polygon: &'a Polygon,
    params: TriangulationParams,
}

impl<'a> Triangulate<'a> {
    /// Creates a new `Triangulate` operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon) -> Self {
        Self {
            polygon,
            params: TriangulationParams::default(),
        }
    }

    /// Sets the triangulation parameters.
    #[must_use]
    pub fn with_params(mut self, params: TriangulationParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// - `TessellationError::InvalidParameters` if the hull has fewer than
    ///   `min_points` points
    /// - `TessellationError::Failed` if a vertex cannot be inserted or two
    ///   contour edges cross
    pub fn execute(&self) -> Result<Vec<Triangle>> {
        let hull_points = self.polygon.hull().len();
        if hull_points < self.params.min_points.max(3) {
            return Err(TessellationError::InvalidParameters(format!(
                "polygon hull has {hull_points} points, at least {} required",
                self.params.min_points.max(3)
            ))
            .into());
        }

        let mut cdt = Cdt::new();
        let mut handles: HashMap<Point, FixedVertexHandle> = HashMap::new();
        for contour in self.polygon.contours() {
            for &p in contour {
                if let Entry::Vacant(slot) = handles.entry(p) {
                    let h = cdt
                        .insert(SpadePoint2::new(f64::from(p.x), f64::from(p.y)))
                        .map_err(|e: InsertionError| {
                            TessellationError::Failed(format!("CDT insert: {e}"))
                        })?;
                    slot.insert(h);
                }
            }
        }

        for (a, b) in constraint_edges(self.polygon) {
            let (Some(&from), Some(&to)) = (handles.get(&a), handles.get(&b)) else {
                continue;
            };
            if from == to {
                continue;
            }
            if !cdt.can_add_constraint(from, to) {
                return Err(TessellationError::Failed(format!(
                    "contour edge ({a};{b}) crosses another edge"
                ))
                .into());
            }
            cdt.add_constraint(from, to);
        }

        let interior = inside_faces(&cdt);
        let triangles: Vec<Triangle> = cdt
            .inner_faces()
            .filter(|f| interior.contains(&f.fix().index()))
            .map(|f| {
                f.vertices().map(|v| {
                    let pos = v.position();
                    Point::new(snap(pos.x), snap(pos.y))
                })
            })
            .collect();

        tracing::debug!(
            points = self.polygon.num_points(),
            triangles = triangles.len(),
            "triangulated polygon"
        );
        Ok(triangles)
    }
}

/// Undirected contour edges that occur an odd number of times.
///
/// Cut lines of resolved holes are traversed twice and drop out, so they do
/// not separate the interior.
fn constraint_edges(polygon: &Polygon) -> Vec<(Point, Point)> {
    let mut count: HashMap<(Point, Point), usize> = HashMap::new();
    let mut order = Vec::new();
    for e in polygon.edges() {
        if e.is_degenerate() {
            continue;
        }
        let key = (e.low(), e.high());
        let c = count.entry(key).or_insert(0);
        if *c == 0 {
            order.push(key);
        }
        *c += 1;
    }
    order.into_iter().filter(|k| count[k] % 2 == 1).collect()
}

/// Indices of the inner faces lying inside the polygon.
///
/// Faces touching the outer face start outside unless the edge between them
/// is a contour edge. Every contour edge crossed on the way to a face flips
/// its side.
fn inside_faces(cdt: &Cdt) -> HashSet<usize> {
    let outer = cdt.outer_face().fix();
    let mut side: HashMap<usize, bool> = HashMap::new();
    let mut stack: Vec<(FixedFaceHandle<InnerTag>, bool)> = cdt
        .directed_edges()
        .filter(|edge| edge.face().fix() == outer)
        .filter_map(|edge| {
            let face = edge.rev().face().as_inner()?;
            Some((face.fix(), cdt.is_constraint_edge(edge.as_undirected().fix())))
        })
        .collect();

    while let Some((face, inside)) = stack.pop() {
        let Entry::Vacant(slot) = side.entry(face.index()) else {
            continue;
        };
        slot.insert(inside);
        for edge in cdt.face(face).adjacent_edges() {
            if let Some(next) = edge.rev().face().as_inner() {
                if !side.contains_key(&next.fix().index()) {
                    let flip = cdt.is_constraint_edge(edge.as_undirected().fix());
                    stack.push((next.fix(), inside != flip));
                }
            }
        }
    }

    side.into_iter().filter_map(|(face, inside)| inside.then_some(face)).collect()
}
