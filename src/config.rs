//! Configuration for barcode construction and clustering.
//!
//! All mode flags are plain enums parsed once at the boundary; the
//! algorithms themselves never see a raw string, so an unrecognized mode
//! cannot propagate past configuration parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which parts of the birth-death decomposition enter the barcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarcodeMode {
    /// Birth set only (connected-component merges).
    Component,
    /// Death set only (cycle closures).
    Cycle,
    /// Birth set followed by death set.
    Attached,
}

/// Preprocessing applied to an adjacency matrix before decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjMode {
    /// Pass-through.
    Original,
    /// Strictly negative entries clamped to zero.
    IgnoreNegative,
    /// Entry-wise absolute value.
    Absolute,
}

/// Whether raw edge weights are carried alongside the topological sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoMode {
    /// Topological sets only.
    Topo,
    /// Upper-triangular weights prepended to the topological sets.
    GeoIncluded,
}

impl FromStr for BarcodeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "component" => Ok(Self::Component),
            "cycle" => Ok(Self::Cycle),
            "attached" => Ok(Self::Attached),
            _ => Err(Error::InvalidMode {
                kind: "barcode",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for AdjMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "original" => Ok(Self::Original),
            "ignore_negative" => Ok(Self::IgnoreNegative),
            "absolute" => Ok(Self::Absolute),
            _ => Err(Error::InvalidMode {
                kind: "adjacency",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for GeoMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "topo" => Ok(Self::Topo),
            "geo_included" => Ok(Self::GeoIncluded),
            _ => Err(Error::InvalidMode {
                kind: "geometry",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BarcodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Component => "component",
            Self::Cycle => "cycle",
            Self::Attached => "attached",
        })
    }
}

impl fmt::Display for AdjMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Original => "original",
            Self::IgnoreNegative => "ignore_negative",
            Self::Absolute => "absolute",
        })
    }
}

impl fmt::Display for GeoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Topo => "topo",
            Self::GeoIncluded => "geo_included",
        })
    }
}

/// Full recipe for turning an adjacency matrix into a barcode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarcodeConfig {
    pub barcode_mode: BarcodeMode,
    pub adj_mode: AdjMode,
    pub geo_mode: GeoMode,
    /// Interpolation scalar λ ∈ [0, 1] blending geometric against
    /// topological magnitude in the geometry-included layout. λ = 1 keeps
    /// the geometric segment unscaled alongside full-weight topology.
    pub interpolation: f64,
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            barcode_mode: BarcodeMode::Attached,
            adj_mode: AdjMode::Original,
            geo_mode: GeoMode::Topo,
            interpolation: 1.0,
        }
    }
}

impl BarcodeConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.interpolation) {
            return Err(Error::InvalidConfig(format!(
                "interpolation must lie in [0, 1], got {}",
                self.interpolation
            )));
        }
        Ok(())
    }
}

/// Parameters of the alternating-optimization clustering engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Node count N shared by every subject network.
    pub n_nodes: usize,
    pub n_clusters: usize,
    /// Relative weight of the topological segment in both the distance
    /// metric and the interpolation gradient.
    pub top_relative_weight: f64,
    /// Outer alternating-optimization iteration cap.
    pub max_iter_alt: usize,
    /// Inner topological-interpolation iteration cap.
    pub max_iter_interp: usize,
    pub learning_rate: f64,
    pub random_seed: u64,
    pub barcode: BarcodeConfig,
}

impl ClusteringConfig {
    /// Configuration with the defaults used throughout the experiments.
    pub fn new(n_nodes: usize, n_clusters: usize) -> Self {
        Self {
            n_nodes,
            n_clusters,
            top_relative_weight: 0.5,
            max_iter_alt: 300,
            max_iter_interp: 50,
            learning_rate: 0.05,
            random_seed: 0,
            barcode: BarcodeConfig {
                barcode_mode: BarcodeMode::Attached,
                adj_mode: AdjMode::Original,
                geo_mode: GeoMode::GeoIncluded,
                interpolation: 1.0,
            },
        }
    }

    /// Fail-fast validation, run before any iteration begins.
    ///
    /// The centroid update splits each barcode into an upper-triangular
    /// geometric segment and a birth/death topological segment, which only
    /// exists in the geometry-included attached layout with λ = 1.
    pub fn validate(&self) -> Result<()> {
        self.barcode.validate()?;
        if self.n_nodes < 2 {
            return Err(Error::InvalidConfig(format!(
                "need at least 2 nodes, got {}",
                self.n_nodes
            )));
        }
        if self.n_clusters == 0 {
            return Err(Error::InvalidConfig("n_clusters must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.top_relative_weight) {
            return Err(Error::InvalidConfig(format!(
                "top_relative_weight must lie in [0, 1], got {}",
                self.top_relative_weight
            )));
        }
        if self.learning_rate <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.barcode.geo_mode != GeoMode::GeoIncluded {
            return Err(Error::InvalidConfig(format!(
                "clustering requires geo_mode geo_included, got {}",
                self.barcode.geo_mode
            )));
        }
        if self.barcode.barcode_mode != BarcodeMode::Attached {
            return Err(Error::InvalidConfig(format!(
                "clustering requires barcode_mode attached, got {}",
                self.barcode.barcode_mode
            )));
        }
        if self.barcode.interpolation != 1.0 {
            return Err(Error::InvalidConfig(format!(
                "clustering requires interpolation 1.0, got {}",
                self.barcode.interpolation
            )));
        }
        Ok(())
    }

    /// Number of upper-triangular edges for the configured node count.
    pub fn n_edges(&self) -> usize {
        self.n_nodes * (self.n_nodes - 1) / 2
    }

    /// Number of spanning-forest edges for a connected network.
    pub fn n_births(&self) -> usize {
        self.n_nodes - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        for s in ["component", "cycle", "attached"] {
            assert_eq!(s.parse::<BarcodeMode>().unwrap().to_string(), s);
        }
        for s in ["original", "ignore_negative", "absolute"] {
            assert_eq!(s.parse::<AdjMode>().unwrap().to_string(), s);
        }
        for s in ["topo", "geo_included"] {
            assert_eq!(s.parse::<GeoMode>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_unknown_mode_is_typed_error() {
        let err = "euclidean".parse::<AdjMode>().unwrap_err();
        match err {
            Error::InvalidMode { kind, value } => {
                assert_eq!(kind, "adjacency");
                assert_eq!(value, "euclidean");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&AdjMode::IgnoreNegative).unwrap();
        assert_eq!(json, "\"ignore_negative\"");
        let back: AdjMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AdjMode::IgnoreNegative);
    }

    #[test]
    fn test_clustering_config_validation() {
        let good = ClusteringConfig::new(6, 2);
        assert!(good.validate().is_ok());
        assert_eq!(good.n_edges(), 15);
        assert_eq!(good.n_births(), 5);

        let mut bad = ClusteringConfig::new(6, 2);
        bad.top_relative_weight = 1.5;
        assert!(bad.validate().is_err());

        let mut bad = ClusteringConfig::new(6, 2);
        bad.learning_rate = 0.0;
        assert!(bad.validate().is_err());

        let mut bad = ClusteringConfig::new(6, 2);
        bad.barcode.geo_mode = GeoMode::Topo;
        assert!(bad.validate().is_err());

        let mut bad = ClusteringConfig::new(6, 2);
        bad.barcode.barcode_mode = BarcodeMode::Cycle;
        assert!(bad.validate().is_err());
    }
}
