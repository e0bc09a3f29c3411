//! The Erickson-Monma-Veinott dynamic program.
//!
//! Grounded on spec.md §4.4's per-cardinality fork-join rounds. The teacher
//! crate carries `rayon` as a dependency without exercising it, so the
//! actual `rayon::ThreadPool`/`scope`/`spawn` usage here follows
//! `neo4j-labs-graph`'s `rayon::scope(|s| { ... s.spawn(...) ... })` pattern
//! (see its `graph_ops.rs` and `input/edgelist.rs`), with the pool itself
//! built once via `ThreadPoolBuilder` the way that crate's own test code
//! builds one (`graph/csr.rs`). Terminals are numbered `kk[0..k]`; `kk[k-1]`
//! is the distinguished root and `kk[0..k-1]` are the `k-1` terminals the
//! subset masks range over, matching spec.md §3's "f[C][q] is the final
//! answer" convention.

use std::cell::RefCell;

use crate::algorithm::dijkstra::{dijkstra, Scratch};
use crate::algorithm::dp_table::{DpTables, UNSET};
use crate::algorithm::subsets::{masks_with_popcount, ProperSubmasks};
use crate::algorithm::traceback::traceback;
use crate::graph::{Csr, ExtendedAdjacency, SuperSourceRow};
use crate::{SteinerError, MATH_INF, MAX_K};

thread_local! {
    static PLAIN_SCRATCH: RefCell<Option<Scratch>> = RefCell::new(None);
    static EXTENDED_SCRATCH: RefCell<Option<(Scratch, SuperSourceRow)>> = RefCell::new(None);
}

/// The cost and, optionally, the edge set of a minimum Steiner tree.
#[derive(Debug, Clone)]
pub struct SteinerSolution {
    pub cost: i64,
    pub edges: Vec<(u32, u32)>,
}

/// Owns the worker pool the DP rounds are dispatched across.
///
/// One `Emv` can solve many instances; the pool is built once and reused,
/// matching the teacher crate's `SmartSssp::new` amortising its
/// `ThreadPool` across repeated queries.
pub struct Emv {
    pool: rayon::ThreadPool,
    track_solution: bool,
}

impl Emv {
    /// `workers == 0` asks for one worker per available hardware thread.
    pub fn new(workers: usize, track_solution: bool) -> crate::Result<Self> {
        let workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            workers
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| SteinerError::ThreadPoolInit(e.to_string()))?;
        Ok(Emv {
            pool,
            track_solution,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Solves for the minimum Steiner tree spanning `terminals` in `graph`.
    ///
    /// `terminals` must be non-empty, at most `MAX_K` long, and every id
    /// must be a valid vertex of `graph`. The last terminal is used as the
    /// DP's root; callers that care which vertex that is should pass a
    /// fixed order rather than relying on one.
    pub fn solve(&self, graph: &Csr, terminals: &[u32]) -> crate::Result<SteinerSolution> {
        let k = terminals.len();
        if k == 0 || k > MAX_K {
            return Err(SteinerError::InvalidTerminalCount(k));
        }
        let n = graph.vertex_count();
        for &t in terminals {
            if t as usize >= n {
                return Err(SteinerError::VertexOutOfRange { vertex: t, n: n as u32 });
            }
        }

        if k == 1 {
            return Ok(SteinerSolution {
                cost: 0,
                edges: Vec::new(),
            });
        }

        let root = terminals[k - 1];
        if k == 2 {
            return self.solve_pair(graph, terminals[0], root);
        }

        self.solve_dp(graph, terminals, root)
    }

    /// `k == 2` never needs the DP machinery: the Steiner tree on two
    /// terminals is their shortest path (spec.md §8's dedicated scenario).
    fn solve_pair(&self, graph: &Csr, from: u32, to: u32) -> crate::Result<SteinerSolution> {
        let n = graph.vertex_count();
        let mut scratch = Scratch::with_capacity(n);
        dijkstra(graph, from as usize, &mut scratch);
        let cost = scratch.dist[to as usize];
        if cost >= MATH_INF {
            return Err(SteinerError::Unreachable(to));
        }
        let mut edges = Vec::new();
        if self.track_solution {
            let mut v = to as usize;
            while v != from as usize {
                let p = scratch.parent[v];
                if p == -1 {
                    break;
                }
                edges.push((v as u32, p as u32));
                v = p as usize;
            }
        }
        Ok(SteinerSolution { cost, edges })
    }

    fn solve_dp(&self, graph: &Csr, terminals: &[u32], root: u32) -> crate::Result<SteinerSolution> {
        let k = terminals.len();
        let n = graph.vertex_count();
        let tables = DpTables::new(n, (k - 1) as u32, self.track_solution)?;

        // Base case: f[{i}][v] = dist(kk[i], v) for every non-root terminal.
        self.pool.scope(|scope| {
            for i in 0..k - 1 {
                let tables = &tables;
                let source = terminals[i];
                scope.spawn(move |_| {
                    PLAIN_SCRATCH.with(|cell| {
                        let mut slot = cell.borrow_mut();
                        let scratch = slot.get_or_insert_with(|| Scratch::with_capacity(n));
                        dijkstra(graph, source as usize, scratch);
                        let mask = 1u32 << i;
                        tables.f_row(mask).write().copy_from_slice(&scratch.dist);
                        if tables.tracks_solution() {
                            let mut brow = tables.b_row(mask).write();
                            for v in 0..n {
                                if scratch.parent[v] != -1 {
                                    brow[v] = (scratch.parent[v], mask);
                                }
                            }
                        }
                    });
                });
            }
        });

        // Main loop: grow the terminal subsets one cardinality at a time, so
        // every mask read inside a round was finalised by an earlier round
        // (spec.md §4.4's "strictly smaller cardinality" ordering).
        for m in 2..(k as u32) {
            let masks = masks_with_popcount((k - 1) as u32, m);
            self.pool.scope(|scope| {
                for &x in &masks {
                    let tables = &tables;
                    scope.spawn(move |_| {
                        self.fill_mask(graph, &tables, x, n);
                    });
                }
            });
        }

        let full_mask = (1u32 << (k - 1)) - 1;
        let cost = tables.cost(full_mask, root as usize);
        if cost >= MATH_INF {
            return Err(SteinerError::Unreachable(root));
        }

        let edges = if self.track_solution {
            traceback(&tables, root as usize, full_mask)
        } else {
            Vec::new()
        };

        Ok(SteinerSolution { cost, edges })
    }

    /// Fills `f[x][·]` (and `b[x][·]` when tracked) for one terminal-subset
    /// mask: the submask convolution (spec.md §4.4(a)) seeds a super-source
    /// row, then a single Dijkstra run (spec.md §4.4(b)) relaxes it through
    /// the rest of the graph.
    fn fill_mask(&self, graph: &Csr, tables: &DpTables, x: u32, n: usize) {
        let mut best = vec![MATH_INF; n];
        let mut best_split = if tables.tracks_solution() {
            vec![(UNSET, 0u32); n]
        } else {
            Vec::new()
        };

        for x_prime in ProperSubmasks::new(x) {
            let y = x ^ x_prime;
            let f_x_prime = tables.f_row(x_prime).read();
            let f_y = tables.f_row(y).read();
            for v in 0..n {
                let a = f_x_prime[v];
                let b = f_y[v];
                if a < MATH_INF && b < MATH_INF {
                    let candidate = a + b;
                    if candidate < best[v] {
                        best[v] = candidate;
                        if tables.tracks_solution() {
                            best_split[v] = (v as i32, x_prime);
                        }
                    }
                }
            }
        }

        EXTENDED_SCRATCH.with(|cell| {
            let mut slot = cell.borrow_mut();
            let (scratch, source_row) =
                slot.get_or_insert_with(|| (Scratch::with_capacity(n + 1), SuperSourceRow::new(n)));
            if source_row.len() != n {
                *source_row = SuperSourceRow::new(n);
            }
            for v in 0..n {
                source_row.set(v, best[v]);
            }
            let extended = ExtendedAdjacency::new(graph, source_row);
            let super_source = extended.super_source();
            dijkstra(&extended, super_source, scratch);

            tables.f_row(x).write()[..n].copy_from_slice(&scratch.dist[..n]);

            if tables.tracks_solution() {
                let mut brow = tables.b_row(x).write();
                for v in 0..n {
                    let parent = scratch.parent[v];
                    if parent == -1 {
                        continue;
                    }
                    brow[v] = if parent as usize == super_source {
                        best_split[v]
                    } else {
                        (parent, x)
                    };
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emv(track: bool) -> Emv {
        Emv::new(2, track).unwrap()
    }

    #[test]
    fn single_terminal_costs_nothing() {
        let csr = Csr::build(3, &[(0, 1, 1), (1, 2, 1)]).unwrap();
        let solver = emv(true);
        let solution = solver.solve(&csr, &[1]).unwrap();
        assert_eq!(solution.cost, 0);
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn two_terminals_use_shortest_path() {
        let csr = Csr::build(3, &[(0, 1, 1), (1, 2, 1), (0, 2, 5)]).unwrap();
        let solver = emv(true);
        let solution = solver.solve(&csr, &[0, 2]).unwrap();
        assert_eq!(solution.cost, 2);
        assert_eq!(solution.edges.len(), 2);
    }

    #[test]
    fn star_graph_three_terminals() {
        // Hub 0 connects to leaves 1, 2, 3 with weight 1 each; terminals are
        // the three leaves, so the optimum tree is the star itself (cost 3).
        let csr = Csr::build(4, &[(0, 1, 1), (0, 2, 1), (0, 3, 1)]).unwrap();
        let solver = emv(true);
        let solution = solver.solve(&csr, &[1, 2, 3]).unwrap();
        assert_eq!(solution.cost, 3);
        assert_eq!(solution.edges.len(), 3);
    }

    #[test]
    fn tree_shaped_graph_has_a_single_spanning_cost() {
        // 1 - 0 - 2 - 3, a path; with only 3 edges over 4 vertices there is
        // exactly one spanning tree, so any terminal set must pay its full
        // weight regardless of which vertices are terminals.
        let csr = Csr::build(4, &[(0, 1, 1), (0, 2, 1), (2, 3, 1)]).unwrap();
        let solver = emv(true);
        let solution = solver.solve(&csr, &[0, 1, 3]).unwrap();
        assert_eq!(solution.cost, 3);
        assert_eq!(solution.edges.len(), 3);
    }

    #[test]
    fn unreachable_terminal_is_reported() {
        let csr = Csr::build(4, &[(0, 1, 1), (2, 3, 1)]).unwrap();
        let solver = emv(false);
        let err = solver.solve(&csr, &[0, 1, 3]).unwrap_err();
        assert!(matches!(err, SteinerError::Unreachable(_)));
    }

    #[test]
    fn out_of_range_terminal_is_rejected() {
        let csr = Csr::build(3, &[(0, 1, 1)]).unwrap();
        let solver = emv(false);
        let err = solver.solve(&csr, &[0, 5]).unwrap_err();
        assert!(matches!(err, SteinerError::VertexOutOfRange { .. }));
    }
}
