//! The subset-indexed DP tables f[X][v] and b[X][v].
//!
//! Grounded on the sharing discipline in spec.md §5: "for a fixed m,
//! different tasks write disjoint X rows; within a row all writes belong
//! to the same worker... no locking required". This crate keeps that
//! discipline as an invariant the EMV engine must respect, but represents
//! each row behind a `parking_lot::RwLock` rather than raw unsafe slicing,
//! so the invariant is enforced by the type system instead of by caller
//! discipline alone (see SPEC_FULL.md §5 and DESIGN.md for the tradeoff).

use parking_lot::RwLock;

use crate::SteinerError;

/// Back-pointer sentinel meaning "no predecessor recorded yet".
pub const UNSET: i32 = -1;

/// One back-pointer cell: either `(neighbour, X)` ("attach via a real
/// edge, same terminal subset") or `(v, X')` with `X' != X` ("split at v
/// into X' and X \ X'").
pub type BackPointer = (i32, u32);

/// `f[X][v]` / `b[X][v]` for `X` in `0..2^k`, `v` in `0..n`.
pub struct DpTables {
    n: usize,
    f: Vec<RwLock<Vec<i64>>>,
    b: Vec<RwLock<Vec<BackPointer>>>,
    track_solution: bool,
}

/// Hard ceiling on `n * 2^k` cells kept in either table, chosen so a
/// misconfigured large `k` fails with a diagnostic (spec.md §8's "k = 32
/// upper limit... fail cleanly") instead of attempting a multi-terabyte
/// allocation.
const MAX_CELLS: usize = 1 << 30;

impl DpTables {
    pub fn new(n: usize, k: u32, track_solution: bool) -> crate::Result<Self> {
        let num_masks = 1usize << k;
        let cells = num_masks
            .checked_mul(n)
            .filter(|&c| c <= MAX_CELLS)
            .ok_or(SteinerError::AllocationTooLarge { n, k })?;
        let _ = cells;

        let f = (0..num_masks)
            .map(|_| RwLock::new(vec![crate::MATH_INF; n]))
            .collect();
        let b = if track_solution {
            (0..num_masks)
                .map(|_| RwLock::new(vec![(UNSET, 0u32); n]))
                .collect()
        } else {
            Vec::new()
        };

        Ok(DpTables {
            n,
            f,
            b,
            track_solution,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn tracks_solution(&self) -> bool {
        self.track_solution
    }

    pub fn f_row(&self, x: u32) -> &RwLock<Vec<i64>> {
        &self.f[x as usize]
    }

    pub fn b_row(&self, x: u32) -> &RwLock<Vec<BackPointer>> {
        debug_assert!(self.track_solution, "solution tracking is disabled");
        &self.b[x as usize]
    }

    pub fn cost(&self, x: u32, v: usize) -> i64 {
        self.f[x as usize].read()[v]
    }
}
