//! Alternating-optimization clustering with topological centroids.
//!
//! Assignment assigns every subject to its nearest centroid under a
//! weighted squared distance; the update step refines each centroid by
//! gradient descent on its working matrix, pulling it toward the
//! cluster's geometric sample mean and its mean birth/death profile at
//! the same time. The outer loop stops at an assignment fixed point or
//! after `max_iter_alt` iterations.
//!
//! The per-iteration loss (mean weighted distance to the assigned
//! centroid) is a monitoring quantity only, logged at debug level; it is
//! empirically non-increasing but not a stopping criterion.

use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::barcode::compute_barcode;
use crate::clustering::matching::optimal_matching;
use crate::config::ClusteringConfig;
use crate::error::{Error, Result};

/// Topological centroid clustering engine.
///
/// Barcodes must be in the geometry-included attached layout (see
/// [`ClusteringConfig::validate`]): the first `n_edges` coordinates are
/// upper-triangular weights, the rest the birth and death sets.
pub struct TopologicalKCentroids {
    config: ClusteringConfig,
    /// Per-coordinate distance weights: (1 - w) on the geometric
    /// segment, w on the topological segment.
    weight_array: Array1<f64>,
    /// One centroid per row, same layout as a barcode.
    centroids: Array2<f64>,
    loss_history: Vec<f64>,
}

impl TopologicalKCentroids {
    /// Validate the configuration and build the weight array.
    pub fn new(config: ClusteringConfig) -> Result<Self> {
        config.validate()?;
        let n_edges = config.n_edges();
        let w = config.top_relative_weight;
        let mut weight_array = Array1::zeros(2 * n_edges);
        weight_array.slice_mut(s![..n_edges]).fill(1.0 - w);
        weight_array.slice_mut(s![n_edges..]).fill(w);
        let centroids = Array2::zeros((config.n_clusters, 2 * n_edges));
        Ok(Self {
            config,
            weight_array,
            centroids,
            loss_history: Vec::new(),
        })
    }

    /// Cluster a population of barcodes (one subject per row) and return
    /// the cluster index of each subject.
    ///
    /// Centroids initialize to `n_clusters` distinct subject barcodes
    /// drawn without replacement from a ChaCha8 stream seeded once from
    /// `random_seed`; two fits with identical inputs and seed produce
    /// identical assignments.
    pub fn fit_predict(&mut self, x: ArrayView2<f64>) -> Result<Vec<usize>> {
        let n_subjects = x.nrows();
        let dim = 2 * self.config.n_edges();
        if x.ncols() != dim {
            return Err(Error::ShapeMismatch {
                got: x.ncols(),
                expected: dim,
            });
        }
        if n_subjects < self.config.n_clusters {
            return Err(Error::TooFewSubjects {
                n_clusters: self.config.n_clusters,
                n_subjects,
            });
        }

        self.loss_history.clear();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.random_seed);
        let picks = rand::seq::index::sample(&mut rng, n_subjects, self.config.n_clusters);
        for (cluster, subject) in picks.into_iter().enumerate() {
            self.centroids.row_mut(cluster).assign(&x.row(subject));
        }

        let mut assigned = self.nearest_centroids(&x);
        for iteration in 0..self.config.max_iter_alt {
            for cluster in 0..self.config.n_clusters {
                self.update_centroid(&x, &assigned, cluster);
            }

            let next = self.nearest_centroids(&x);
            let loss = self.loss(&x, &next);
            self.loss_history.push(loss);
            debug!(iteration, loss, "alternating step");

            if next == assigned {
                break;
            }
            assigned = next;
        }
        Ok(assigned)
    }

    /// Refine one cluster's centroid from its current members.
    ///
    /// An empty cluster, or a degenerate interpolation result, retains
    /// the previous centroid unchanged so the fit keeps its progress.
    fn update_centroid(&mut self, x: &ArrayView2<f64>, assigned: &[usize], cluster: usize) {
        let members: Vec<usize> = assigned
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == cluster)
            .map(|(i, _)| i)
            .collect();
        if members.is_empty() {
            warn!(cluster, "empty cluster, retaining previous centroid");
            return;
        }

        let n_edges = self.config.n_edges();
        let n_births = self.config.n_births();

        let mut mean: Array1<f64> = Array1::zeros(2 * n_edges);
        for &i in &members {
            mean += &x.row(i);
        }
        mean /= members.len() as f64;

        let prev = self.scatter_triu(self.centroids.row(cluster).slice(s![..n_edges]));
        let sample_mean = self.scatter_triu(mean.slice(s![..n_edges]));
        let birth_targets = mean.slice(s![n_edges..n_edges + n_births]).to_owned();
        let death_targets = mean.slice(s![n_edges + n_births..]).to_owned();

        let updated = self
            .interpolate(prev, &sample_mean, &birth_targets, &death_targets)
            .and_then(|m| compute_barcode(&m, &self.config.barcode));
        match updated {
            Ok(barcode) => self.centroids.row_mut(cluster).assign(&barcode),
            Err(e) => {
                warn!(cluster, error = %e, "centroid update degenerated, retaining previous centroid");
            }
        }
    }

    /// Topological interpolation: move the working matrix toward the
    /// geometric sample mean and the matched birth/death targets.
    fn interpolate(
        &self,
        mut curr: Array2<f64>,
        sample_mean: &Array2<f64>,
        birth_targets: &Array1<f64>,
        death_targets: &Array1<f64>,
    ) -> Result<Array2<f64>> {
        let w = self.config.top_relative_weight;
        let lr = self.config.learning_rate;

        for _ in 0..self.config.max_iter_interp {
            // Re-derive the rank matching on the current working matrix
            let (birth_cells, death_cells) = optimal_matching(&curr);
            if birth_cells.len() != birth_targets.len() || death_cells.len() != death_targets.len()
            {
                return Err(Error::DisconnectedNetwork {
                    found: birth_cells.len(),
                    expected: birth_targets.len(),
                });
            }

            let mut target = Array2::zeros(curr.raw_dim());
            for (cell, &v) in birth_cells.iter().zip(birth_targets.iter()) {
                target[*cell] = v;
            }
            for (cell, &v) in death_cells.iter().zip(death_targets.iter()) {
                target[*cell] = v;
            }

            let geo_gradient = (&curr - sample_mean) * 2.0;
            let top_gradient = (&curr - &target) * 2.0;
            curr = curr - (geo_gradient * (1.0 - w) + top_gradient * w) * lr;
        }
        Ok(curr)
    }

    /// Arg-min centroid per subject, ties to the first index.
    fn nearest_centroids(&self, x: &ArrayView2<f64>) -> Vec<usize> {
        x.rows()
            .into_iter()
            .map(|subject| {
                let mut best = 0;
                let mut best_dist = f64::INFINITY;
                for (cluster, centroid) in self.centroids.rows().into_iter().enumerate() {
                    let dist = self.weighted_sq_dist(subject, centroid);
                    if dist < best_dist {
                        best_dist = dist;
                        best = cluster;
                    }
                }
                best
            })
            .collect()
    }

    /// Squared coordinate-wise difference dotted with the weight array.
    fn weighted_sq_dist(&self, a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .zip(self.weight_array.iter())
            .map(|((&a, &b), &w)| (a - b) * (a - b) * w)
            .sum()
    }

    /// Mean weighted distance of subjects to their assigned centroids.
    fn loss(&self, x: &ArrayView2<f64>, assigned: &[usize]) -> f64 {
        let total: f64 = assigned
            .iter()
            .enumerate()
            .map(|(i, &c)| self.weighted_sq_dist(x.row(i), self.centroids.row(c)))
            .sum();
        total / x.nrows() as f64
    }

    /// Scatter an n_edges-long segment into the strict upper triangle,
    /// row-major, the inverse of the builder's geometric extraction.
    fn scatter_triu(&self, segment: ArrayView1<f64>) -> Array2<f64> {
        let n = self.config.n_nodes;
        let mut matrix = Array2::zeros((n, n));
        let mut k = 0;
        for i in 0..n {
            for j in i + 1..n {
                matrix[[i, j]] = segment[k];
                k += 1;
            }
        }
        matrix
    }

    /// Centroids after the last fit, one per row.
    pub fn centroids(&self) -> &Array2<f64> {
        &self.centroids
    }

    /// Loss after each outer iteration of the last fit.
    pub fn loss_history(&self) -> &[f64] {
        &self.loss_history
    }

    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }
}
