//! The shortest-path kernel shared by plain Dijkstra and the EMV
//! terminal-edge step.
//!
//! Grounded on the teacher crate's `algorithm::dijkstra::Dijkstra`, replaced
//! here by a free function generic over `graph::Adjacency` so it runs
//! unchanged whether `source` is a real vertex of a plain `Csr` or the
//! synthetic super-source of an `ExtendedAdjacency`.

use crate::data_structures::IndexedBinaryHeap;
use crate::graph::Adjacency;
use crate::MATH_INF;

/// Per-thread scratch reused across every Dijkstra call issued by the
/// thread that owns it, matching spec.md §3's "per-worker arrays...
/// reused across all Dijkstra invocations by that worker".
pub struct Scratch {
    pub dist: Vec<i64>,
    pub parent: Vec<i32>,
    heap: IndexedBinaryHeap,
}

impl Scratch {
    pub fn with_capacity(capacity: usize) -> Self {
        Scratch {
            dist: vec![MATH_INF; capacity],
            parent: vec![-1; capacity],
            heap: IndexedBinaryHeap::with_capacity(capacity),
        }
    }

    pub(crate) fn reset(&mut self, capacity: usize) {
        if self.dist.len() != capacity {
            self.dist = vec![MATH_INF; capacity];
            self.parent = vec![-1; capacity];
            self.heap = IndexedBinaryHeap::with_capacity(capacity);
        } else {
            self.dist.fill(MATH_INF);
            self.parent.fill(-1);
            self.heap.clear();
        }
    }
}

/// Runs single-source shortest paths from `source` over `graph`, writing
/// `scratch.dist` and `scratch.parent`. Unreached vertices keep `MATH_INF`
/// and parent `-1`.
///
/// This is the kernel described in spec.md §4.3: a lazy-delete-free
/// Dijkstra driven by an indexed heap, decreasing keys in place rather than
/// pushing stale duplicates.
pub fn dijkstra<G: Adjacency + ?Sized>(graph: &G, source: usize, scratch: &mut Scratch) {
    let n = graph.vertex_count();
    scratch.reset(n);
    scratch.dist[source] = 0;
    scratch.heap.insert(source as u32, 0);

    while let Some((u, dist_u)) = scratch.heap.extract_min() {
        let u = u as usize;
        if dist_u > scratch.dist[u] {
            continue;
        }
        for (v, w) in graph.neighbors(u) {
            let v = v as usize;
            if scratch.dist[v] == MATH_INF {
                // Unreached vertex: never the left operand of an overflowing
                // add, per spec.md §4.3's numeric contract.
                if dist_u == MATH_INF {
                    continue;
                }
                let cand = dist_u + w;
                scratch.dist[v] = cand;
                scratch.parent[v] = u as i32;
                scratch.heap.insert(v as u32, cand);
            } else {
                let cand = dist_u + w;
                if cand < scratch.dist[v] {
                    scratch.dist[v] = cand;
                    scratch.parent[v] = u as i32;
                    if scratch.heap.contains(v as u32) {
                        scratch.heap.decrease_key(v as u32, cand);
                    } else {
                        scratch.heap.insert(v as u32, cand);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Csr;

    #[test]
    fn shortest_path_on_triangle() {
        let csr = Csr::build(3, &[(0, 1, 1), (1, 2, 1), (0, 2, 5)]).unwrap();
        let mut scratch = Scratch::with_capacity(3);
        dijkstra(&csr, 0, &mut scratch);
        assert_eq!(scratch.dist, vec![0, 1, 2]);
        assert_eq!(scratch.parent[2], 1);
    }

    #[test]
    fn unreachable_vertex_stays_at_infinity() {
        let csr = Csr::build(3, &[(0, 1, 1)]).unwrap();
        let mut scratch = Scratch::with_capacity(3);
        dijkstra(&csr, 0, &mut scratch);
        assert_eq!(scratch.dist[2], MATH_INF);
        assert_eq!(scratch.parent[2], -1);
    }
}
