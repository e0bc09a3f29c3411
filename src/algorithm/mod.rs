//! The algorithmic core: shortest paths, subset enumeration, the DP tables
//! they feed, and the dynamic program itself.

pub mod dijkstra;
pub mod dp_table;
pub mod emv;
pub mod subsets;
pub mod traceback;

pub use dijkstra::{dijkstra, Scratch};
pub use emv::Emv;
