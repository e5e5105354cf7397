//! `EdgeProcessor`: one entry point for merge, size and Boolean operations.
//!
//! The processor holds only [`ProcessorParams`]. Every call is independent;
//! nothing is accumulated between calls.

use std::time::Instant;

use crate::geometry::{Edge, Polygon};
use crate::math::Coord;
use crate::operations::{Boolean, BooleanMode, Merge, SimpleMerge, Size, WindingRule, DEFAULT_SIZE_MODE};
use crate::topology::OutputOptions;

/// Configuration for an [`EdgeProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorParams {
    /// Log the elapsed time of every operation at `info` level.
    pub report_timing: bool,
    /// Corner mode used by the isotropic sizing shortcuts.
    pub default_size_mode: u32,
}

impl Default for ProcessorParams {
    fn default() -> Self {
        Self {
            report_timing: false,
            default_size_mode: DEFAULT_SIZE_MODE,
        }
    }
}

/// Polygon and edge processor.
///
/// `_p2e` methods take polygons and return edges, `_p2p` return polygons,
/// `_e2e` and `_e2p` take raw directed edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeProcessor {
    params: ProcessorParams,
}

fn output(resolve_holes: bool, min_coherence: bool) -> OutputOptions {
    OutputOptions {
        resolve_holes,
        min_coherence,
    }
}

impl EdgeProcessor {
    /// Creates a processor with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the processor parameters.
    #[must_use]
    pub fn with_params(mut self, params: ProcessorParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the processor parameters.
    #[must_use]
    pub fn params(&self) -> ProcessorParams {
        self.params
    }

    fn timed<T>(&self, operation: &'static str, run: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = run();
        if self.params.report_timing {
            tracing::info!(operation, elapsed = ?start.elapsed(), "edge processor");
        }
        result
    }

    // --- simple merge ---

    /// Merges polygons under the non-zero rule, returning edges.
    #[must_use]
    pub fn simple_merge_p2e(&self, polygons: &[Polygon]) -> Vec<Edge> {
        self.simple_merge_p2e_with_rule(polygons, WindingRule::NonZero)
    }

    /// Merges polygons under the given winding rule, returning edges.
    #[must_use]
    pub fn simple_merge_p2e_with_rule(&self, polygons: &[Polygon], rule: WindingRule) -> Vec<Edge> {
        self.timed("simple_merge_p2e", || {
            SimpleMerge::new().with_rule(rule).execute_p2e(polygons)
        })
    }

    /// Merges polygons under the non-zero rule, returning polygons.
    #[must_use]
    pub fn simple_merge_p2p(
        &self,
        polygons: &[Polygon],
        resolve_holes: bool,
        min_coherence: bool,
    ) -> Vec<Polygon> {
        self.simple_merge_p2p_with_rule(polygons, resolve_holes, min_coherence, WindingRule::NonZero)
    }

    /// Merges polygons under the given winding rule, returning polygons.
    #[must_use]
    pub fn simple_merge_p2p_with_rule(
        &self,
        polygons: &[Polygon],
        resolve_holes: bool,
        min_coherence: bool,
        rule: WindingRule,
    ) -> Vec<Polygon> {
        self.timed("simple_merge_p2p", || {
            SimpleMerge::new()
                .with_rule(rule)
                .with_output(output(resolve_holes, min_coherence))
                .execute_p2p(polygons)
        })
    }

    /// Merges raw edges under the non-zero rule, returning edges.
    #[must_use]
    pub fn simple_merge_e2e(&self, edges: &[Edge]) -> Vec<Edge> {
        self.simple_merge_e2e_with_rule(edges, WindingRule::NonZero)
    }

    /// Merges raw edges under the given winding rule, returning edges.
    #[must_use]
    pub fn simple_merge_e2e_with_rule(&self, edges: &[Edge], rule: WindingRule) -> Vec<Edge> {
        self.timed("simple_merge_e2e", || SimpleMerge::new().with_rule(rule).execute_e2e(edges))
    }

    /// Merges raw edges under the non-zero rule, returning polygons.
    #[must_use]
    pub fn simple_merge_e2p(
        &self,
        edges: &[Edge],
        resolve_holes: bool,
        min_coherence: bool,
    ) -> Vec<Polygon> {
        self.simple_merge_e2p_with_rule(edges, resolve_holes, min_coherence, WindingRule::NonZero)
    }

    /// Merges raw edges under the given winding rule, returning polygons.
    #[must_use]
    pub fn simple_merge_e2p_with_rule(
        &self,
        edges: &[Edge],
        resolve_holes: bool,
        min_coherence: bool,
        rule: WindingRule,
    ) -> Vec<Polygon> {
        self.timed("simple_merge_e2p", || {
            SimpleMerge::new()
                .with_rule(rule)
                .with_output(output(resolve_holes, min_coherence))
                .execute_e2p(edges)
        })
    }

    // --- merge with threshold ---

    /// Keeps what more than `min_count` polygons cover, returning edges.
    #[must_use]
    pub fn merge_p2e(&self, polygons: &[Polygon], min_count: usize) -> Vec<Edge> {
        self.timed("merge_p2e", || Merge::new(min_count).execute_p2e(polygons))
    }

    /// Keeps what more than `min_count` polygons cover, returning polygons.
    #[must_use]
    pub fn merge_p2p(
        &self,
        polygons: &[Polygon],
        min_count: usize,
        resolve_holes: bool,
        min_coherence: bool,
    ) -> Vec<Polygon> {
        self.timed("merge_p2p", || {
            Merge::new(min_count)
                .with_output(output(resolve_holes, min_coherence))
                .execute_p2p(polygons)
        })
    }

    // --- size ---

    /// Sizes polygons by `dx` and `dy`, returning edges.
    #[must_use]
    pub fn size_p2e(&self, polygons: &[Polygon], dx: Coord, dy: Coord, mode: u32) -> Vec<Edge> {
        self.timed("size_p2e", || Size::new(dx, dy).with_mode(mode).execute_p2e(polygons))
    }

    /// Sizes polygons by `d` in both directions with the default corner mode.
    #[must_use]
    pub fn size_p2e_iso(&self, polygons: &[Polygon], d: Coord) -> Vec<Edge> {
        self.size_p2e(polygons, d, d, self.params.default_size_mode)
    }

    /// Sizes polygons by `dx` and `dy`, returning polygons.
    #[must_use]
    pub fn size_p2p(
        &self,
        polygons: &[Polygon],
        dx: Coord,
        dy: Coord,
        mode: u32,
        resolve_holes: bool,
        min_coherence: bool,
    ) -> Vec<Polygon> {
        self.timed("size_p2p", || {
            Size::new(dx, dy)
                .with_mode(mode)
                .with_output(output(resolve_holes, min_coherence))
                .execute_p2p(polygons)
        })
    }

    /// Sizes polygons by `d` in both directions with the default corner mode.
    #[must_use]
    pub fn size_p2p_iso(
        &self,
        polygons: &[Polygon],
        d: Coord,
        resolve_holes: bool,
        min_coherence: bool,
    ) -> Vec<Polygon> {
        self.size_p2p(
            polygons,
            d,
            d,
            self.params.default_size_mode,
            resolve_holes,
            min_coherence,
        )
    }

    // --- boolean ---

    /// Combines two polygon sets, returning edges.
    #[must_use]
    pub fn boolean_p2e(&self, a: &[Polygon], b: &[Polygon], mode: BooleanMode) -> Vec<Edge> {
        self.timed("boolean_p2e", || Boolean::new(mode).execute_p2e(a, b))
    }

    /// Combines two polygon sets, returning polygons.
    #[must_use]
    pub fn boolean_p2p(
        &self,
        a: &[Polygon],
        b: &[Polygon],
        mode: BooleanMode,
        resolve_holes: bool,
        min_coherence: bool,
    ) -> Vec<Polygon> {
        self.timed("boolean_p2p", || {
            Boolean::new(mode)
                .with_output(output(resolve_holes, min_coherence))
                .execute_p2p(a, b)
        })
    }

    /// Combines two edge sets, returning edges.
    #[must_use]
    pub fn boolean_e2e(&self, a: &[Edge], b: &[Edge], mode: BooleanMode) -> Vec<Edge> {
        self.timed("boolean_e2e", || Boolean::new(mode).execute_e2e(a, b))
    }

    /// Combines two edge sets, returning polygons.
    #[must_use]
    pub fn boolean_e2p(
        &self,
        a: &[Edge],
        b: &[Edge],
        mode: BooleanMode,
        resolve_holes: bool,
        min_coherence: bool,
    ) -> Vec<Polygon> {
        self.timed("boolean_e2p", || {
            Boolean::new(mode)
                .with_output(output(resolve_holes, min_coherence))
                .execute_e2p(a, b)
        })
    }
}
