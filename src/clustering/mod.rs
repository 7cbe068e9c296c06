//! Clustering Module: Topological Centroid Clustering
//!
//! Groups a population of networks around centroids that are themselves
//! valid networks, alternating between weighted nearest-centroid
//! assignment and a gradient-based centroid refinement ("topological
//! interpolation"):
//!
//! - `matching.rs`: rank correspondence between a working centroid
//!   matrix's current birth/death edges and target birth/death values
//! - `kcentroids.rs`: the alternating-optimization engine
//!
//! The refinement pulls every centroid matrix entry toward the cluster's
//! geometric sample mean and, simultaneously, toward the cluster's mean
//! birth/death profile scattered into matrix cells by rank. The rank
//! matching is what keeps the topological gradient well-defined even
//! though birth/death sets carry no persistent edge identity.

mod kcentroids;
mod matching;

pub use kcentroids::TopologicalKCentroids;
pub use matching::optimal_matching;
