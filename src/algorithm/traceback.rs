//! Reconstructs the Steiner tree edge set from the DP back-pointer table.
//!
//! Grounded on spec.md §4.5, implemented with an explicit stack rather than
//! recursion so the depth is bounded by heap allocation, not the call stack
//! (the teacher crate's own `get_path` reconstruction in
//! `algorithm/traits.rs` uses an explicit loop with a cycle guard for the
//! same reason).

use crate::algorithm::dp_table::{DpTables, UNSET};

/// Walks `b[·][·]` starting from `(root, full_mask)`, returning the tree's
/// edges in visitation order. No deduplication is performed: the DP's own
/// invariants guarantee each edge is recorded at most once (spec.md §4.5).
pub fn traceback(tables: &DpTables, root: usize, full_mask: u32) -> Vec<(u32, u32)> {
    let mut edges = Vec::new();
    let mut stack = vec![(root, full_mask)];

    while let Some((v, x)) = stack.pop() {
        if x == 0 {
            continue;
        }
        let (u, x_prime) = tables.b_row(x).read()[v];
        if u == UNSET {
            continue;
        }
        let u = u as usize;
        if u != v {
            edges.push((v as u32, u as u32));
            stack.push((u, x_prime));
        } else if x_prime != x {
            stack.push((v, x_prime));
            stack.push((v, x ^ x_prime));
        }
    }

    edges
}
