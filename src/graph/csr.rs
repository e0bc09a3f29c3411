//! Immutable CSR (compressed sparse row) adjacency for the real graph.
//!
//! Grounded on the teacher crate's `graph::directed::DirectedGraph`, but
//! replacing its `HashMap`-of-`Vec` adjacency with a contiguous
//! offsets/neighbours/weights layout, the idiomatic shape also seen in the
//! pack's `csr_graph.rs` reference file. Unlike the distilled spec's literal
//! layout (one shared structure padded with `T` super-source pseudo-vertices
//! whose weights are mutated in place), this `Csr` holds only the `n` real
//! vertices and is never mutated after construction — see `graph::view` for
//! how a per-call super-source row is composed on top of it.

use crate::SteinerError;

/// Compressed sparse row adjacency over `n` real, 0-based vertex ids.
///
/// Every undirected edge `(u, v, w)` is stored twice: once as `(v, w)` in
/// `u`'s run and once as `(u, w)` in `v`'s run.
#[derive(Debug, Clone)]
pub struct Csr {
    n: usize,
    offsets: Vec<u32>,
    neighbors: Vec<u32>,
    weights: Vec<i64>,
}

impl Csr {
    /// Builds a CSR adjacency from an undirected edge list `(u, v, w)`,
    /// 0-based, `w >= 0`.
    ///
    /// Mirrors the two-pass counting-then-filling approach in spec.md
    /// §4.2: a degree sweep, an exclusive prefix scan, then a second sweep
    /// that appends each endpoint's entry into its slot.
    pub fn build(n: usize, edges: &[(u32, u32, i64)]) -> crate::Result<Self> {
        for &(u, v, _) in edges {
            if u as usize >= n {
                return Err(SteinerError::VertexOutOfRange {
                    vertex: u,
                    n: n as u32,
                });
            }
            if v as usize >= n {
                return Err(SteinerError::VertexOutOfRange {
                    vertex: v,
                    n: n as u32,
                });
            }
        }

        let mut degree = vec![0u32; n];
        for &(u, v, _) in edges {
            degree[u as usize] += 1;
            degree[v as usize] += 1;
        }

        let mut offsets = vec![0u32; n + 1];
        for v in 0..n {
            offsets[v + 1] = offsets[v] + degree[v];
        }

        let total = offsets[n] as usize;
        let mut neighbors = vec![0u32; total];
        let mut weights = vec![0i64; total];
        let mut cursor = offsets.clone();

        for &(u, v, w) in edges {
            let pu = cursor[u as usize] as usize;
            neighbors[pu] = v;
            weights[pu] = w;
            cursor[u as usize] += 1;

            let pv = cursor[v as usize] as usize;
            neighbors[pv] = u;
            weights[pv] = w;
            cursor[v as usize] += 1;
        }

        Ok(Csr {
            n,
            offsets,
            neighbors,
            weights,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    pub fn degree(&self, v: usize) -> usize {
        (self.offsets[v + 1] - self.offsets[v]) as usize
    }

    /// Iterates `(neighbor, weight)` pairs for the real vertex `v`.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = (u32, i64)> + '_ {
        let start = self.offsets[v] as usize;
        let end = self.offsets[v + 1] as usize;
        self.neighbors[start..end]
            .iter()
            .copied()
            .zip(self.weights[start..end].iter().copied())
    }

    /// `true` iff `(u, v)` appears in the adjacency with weight `w`.
    pub fn has_edge(&self, u: usize, v: usize, w: i64) -> bool {
        self.neighbors(u).any(|(nbr, nw)| nbr as usize == v && nw == w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_edges_are_symmetric() {
        let edges = [(0u32, 1u32, 5i64), (1, 2, 3), (0, 2, 9)];
        let csr = Csr::build(3, &edges).unwrap();
        assert!(csr.has_edge(0, 1, 5));
        assert!(csr.has_edge(1, 0, 5));
        assert!(csr.has_edge(1, 2, 3));
        assert!(csr.has_edge(2, 1, 3));
        assert_eq!(csr.degree(0), 2);
        assert_eq!(csr.degree(1), 2);
        assert_eq!(csr.degree(2), 2);
        assert_eq!(csr.edge_count(), 3);
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let edges = [(0u32, 5u32, 1i64)];
        assert!(Csr::build(3, &edges).is_err());
    }

    #[test]
    fn isolated_vertex_has_zero_degree() {
        let edges = [(0u32, 1u32, 1i64)];
        let csr = Csr::build(3, &edges).unwrap();
        assert_eq!(csr.degree(2), 0);
        assert_eq!(csr.neighbors(2).count(), 0);
    }
}
