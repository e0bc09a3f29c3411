//! Adjacency views the Dijkstra kernel can run over.
//!
//! This module is the re-expression, recommended by the distilled spec's own
//! Design Notes, of the "mostly-const array with mutable suffix"
//! super-source layout: `Csr` stays genuinely immutable, and a
//! `SuperSourceRow` (one small dense array per in-flight EMV call) is
//! composed with it through `ExtendedAdjacency` only for the duration of
//! that call.

use crate::graph::csr::Csr;

/// Something the Dijkstra kernel can enumerate out-edges from.
///
/// Vertex ids are a single flat namespace `0..vertex_count()`; an
/// implementor is free to map some of that range onto synthetic vertices
/// (as `ExtendedAdjacency` does for its super-source).
pub trait Adjacency {
    fn vertex_count(&self) -> usize;
    fn neighbors(&self, v: usize) -> Box<dyn Iterator<Item = (u32, i64)> + '_>;
}

impl Adjacency for Csr {
    fn vertex_count(&self) -> usize {
        Csr::vertex_count(self)
    }

    fn neighbors(&self, v: usize) -> Box<dyn Iterator<Item = (u32, i64)> + '_> {
        Box::new(Csr::neighbors(self, v))
    }
}

/// The per-call, per-worker mutable super-source adjacency row.
///
/// `weights[v]` is the weight of the synthetic edge `super_source -> v`.
/// Exactly `n` entries, rewritten by the EMV engine before every
/// terminal-edge Dijkstra step (spec.md §4.4(b)); never shared across
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct SuperSourceRow {
    weights: Vec<i64>,
}

impl SuperSourceRow {
    pub fn new(n: usize) -> Self {
        SuperSourceRow {
            weights: vec![crate::MATH_INF; n],
        }
    }

    pub fn set(&mut self, v: usize, weight: i64) {
        self.weights[v] = weight;
    }

    pub fn get(&self, v: usize) -> i64 {
        self.weights[v]
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }
}

/// Composes a real-vertex `Csr` with one `SuperSourceRow`, appended as
/// vertex id `n` (the single synthetic vertex this view ever exposes).
///
/// This resolves the "n+1 vs n+T" open question from spec.md §9: every
/// Dijkstra call here sees exactly one super-source, never a block of `T`,
/// because each call already owns its own private `SuperSourceRow`.
pub struct ExtendedAdjacency<'a> {
    csr: &'a Csr,
    source_row: &'a SuperSourceRow,
}

impl<'a> ExtendedAdjacency<'a> {
    pub fn new(csr: &'a Csr, source_row: &'a SuperSourceRow) -> Self {
        ExtendedAdjacency { csr, source_row }
    }

    /// The id of the synthetic super-source vertex in this view (`n`).
    pub fn super_source(&self) -> usize {
        self.csr.vertex_count()
    }
}

impl<'a> Adjacency for ExtendedAdjacency<'a> {
    fn vertex_count(&self) -> usize {
        self.csr.vertex_count() + 1
    }

    fn neighbors(&self, v: usize) -> Box<dyn Iterator<Item = (u32, i64)> + '_> {
        if v == self.super_source() {
            let n = self.csr.vertex_count();
            Box::new((0..n as u32).map(move |v| (v, self.source_row.get(v as usize))))
        } else {
            Box::new(self.csr.neighbors(v))
        }
    }
}
