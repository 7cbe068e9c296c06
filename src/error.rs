//! Crate-wide error type.
//!
//! Configuration and shape problems are detected before any iteration
//! begins; numerical degeneracies discovered mid-fit are surfaced as typed
//! variants so callers can recover locally instead of receiving NaNs.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A mode string that names no known variant.
    #[error("unrecognized {kind} mode: {value:?}")]
    InvalidMode { kind: &'static str, value: String },

    /// A parameter combination the algorithm cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An adjacency matrix that is not square.
    #[error("adjacency matrix is {rows}x{cols}, expected square")]
    NotSquare { rows: usize, cols: usize },

    /// A matrix or barcode whose size disagrees with the configured layout.
    #[error("dimension mismatch: got {got}, expected {expected}")]
    ShapeMismatch { got: usize, expected: usize },

    /// Spanning forest with fewer than n-1 edges.
    #[error("network is disconnected: spanning forest has {found} edges, expected {expected}")]
    DisconnectedNetwork { found: usize, expected: usize },

    /// More clusters requested than subjects available.
    #[error("cannot fit {n_clusters} clusters to {n_subjects} subjects")]
    TooFewSubjects {
        n_clusters: usize,
        n_subjects: usize,
    },

    /// Two subjects sharing one identifier.
    #[error("duplicate subject id: {0}")]
    DuplicateSubject(String),

    /// A subject whose barcode has not been computed yet.
    #[error("subject {0} has no barcode; call compute_barcodes first")]
    MissingBarcode(String),
}
