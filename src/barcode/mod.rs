//! Barcode Module: Birth-Death Decomposition of Weighted Networks
//!
//! Turns a weighted, undirected, simple graph into a fixed-length feature
//! vector summarizing its connectivity structure:
//!
//! - `condition.rs`: adjacency preprocessing (pass-through, clamp
//!   negatives, absolute value)
//! - `decompose.rs`: maximum-weight spanning forest split into "birth"
//!   edges (component merges) and "death" edges (cycle closures)
//! - `builder.rs`: barcode assembly from the sorted birth/death sets,
//!   optionally alongside the raw geometric edge weights
//!
//! ## Mathematical Background
//!
//! Adding edges of a weighted graph in decreasing weight order defines a
//! graph filtration. Connected components merge exactly at the spanning
//! forest edges ("births") and independent cycles close at the remaining
//! edges ("deaths"), so the two sorted weight sets summarize the entire
//! 0- and 1-dimensional persistence of the filtration without simulating
//! it step by step.

mod builder;
mod condition;
mod decompose;

pub use builder::{barcode_len, compute_barcode};
pub use condition::condition;
pub use decompose::{bd_decomposition, birth_death_sets};
