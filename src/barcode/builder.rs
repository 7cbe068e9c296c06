//! Barcode assembly.
//!
//! Composes the fixed-length feature vector out of the sorted birth and
//! death sets, optionally carrying the raw upper-triangular weights as a
//! geometric segment. For a fixed node count and configuration the output
//! length never varies across matrices, which is what lets the clustering
//! engine treat barcodes as points of one weighted Euclidean space.

use ndarray::{Array1, Array2};

use super::condition::condition;
use super::decompose::birth_death_sets;
use crate::config::{BarcodeConfig, BarcodeMode, GeoMode};
use crate::error::{Error, Result};

/// Barcode length for a given node count and configuration.
pub fn barcode_len(n_nodes: usize, config: &BarcodeConfig) -> usize {
    let n_edges = n_nodes * (n_nodes - 1) / 2;
    let n_births = n_nodes - 1;
    if config.geo_mode == GeoMode::GeoIncluded {
        return 2 * n_edges;
    }
    match config.barcode_mode {
        BarcodeMode::Component => n_births,
        BarcodeMode::Cycle => n_edges - n_births,
        BarcodeMode::Attached => n_edges,
    }
}

/// Compute the barcode of an adjacency matrix.
///
/// Conditions the matrix, runs the birth-death decomposition, and
/// composes the output per configuration:
///
/// - `Component`: sorted birth set
/// - `Cycle`: sorted death set
/// - `Attached`: birth set followed by death set
/// - `GeoIncluded` geometry: raw upper-triangular weights, then births,
///   then deaths, with the λ blend of [`BarcodeConfig::interpolation`].
///   λ = 1 deliberately keeps the geometric segment at full weight next
///   to unscaled topology; λ < 1 scales geometry by (1 − λ) and topology
///   by λ.
pub fn compute_barcode(adj: &Array2<f64>, config: &BarcodeConfig) -> Result<Array1<f64>> {
    config.validate()?;
    let n = adj.nrows();
    if adj.ncols() != n {
        return Err(Error::NotSquare {
            rows: n,
            cols: adj.ncols(),
        });
    }
    if n < 2 {
        return Err(Error::InvalidConfig(format!(
            "need at least 2 nodes, got {n}"
        )));
    }

    let conditioned = condition(adj, config.adj_mode);
    let (births, deaths) = birth_death_sets(&conditioned);
    if births.len() != n - 1 {
        return Err(Error::DisconnectedNetwork {
            found: births.len(),
            expected: n - 1,
        });
    }

    let out = if config.geo_mode == GeoMode::GeoIncluded {
        let lambda = config.interpolation;
        let (geo_scale, top_scale) = if lambda == 1.0 {
            (1.0, 1.0)
        } else {
            (1.0 - lambda, lambda)
        };
        let mut out = Vec::with_capacity(n * (n - 1));
        for i in 0..n {
            for j in i + 1..n {
                out.push(conditioned[[i, j]] * geo_scale);
            }
        }
        out.extend(births.iter().map(|w| w * top_scale));
        out.extend(deaths.iter().map(|w| w * top_scale));
        out
    } else {
        match config.barcode_mode {
            BarcodeMode::Component => births,
            BarcodeMode::Cycle => deaths,
            BarcodeMode::Attached => {
                let mut out = births;
                out.extend(deaths);
                out
            }
        }
    };

    debug_assert_eq!(out.len(), barcode_len(n, config));
    Ok(Array1::from_vec(out))
}
