//! Adjacency matrix conditioning.
//!
//! Connectivity matrices from correlation-based pipelines can carry
//! negative entries; the three policies here decide what those mean
//! before decomposition ever sees the matrix.

use ndarray::Array2;

use crate::config::AdjMode;

/// Apply a conditioning policy to an adjacency matrix.
///
/// Pure function: the input is never mutated, the output is a fresh
/// matrix of the same shape.
pub fn condition(adj: &Array2<f64>, mode: AdjMode) -> Array2<f64> {
    match mode {
        AdjMode::Original => adj.clone(),
        AdjMode::IgnoreNegative => adj.mapv(|w| if w < 0.0 { 0.0 } else { w }),
        AdjMode::Absolute => adj.mapv(f64::abs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Array2<f64> {
        array![[0.0, -2.0, 0.5], [-2.0, 0.0, 1.5], [0.5, 1.5, 0.0]]
    }

    #[test]
    fn test_original_is_identity() {
        let adj = sample();
        assert_eq!(condition(&adj, AdjMode::Original), adj);
    }

    #[test]
    fn test_ignore_negative_clamps_to_zero() {
        let adj = sample();
        let out = condition(&adj, AdjMode::IgnoreNegative);
        assert_eq!(out[[0, 1]], 0.0);
        assert_eq!(out[[1, 0]], 0.0);
        assert!(out.iter().all(|&w| w >= 0.0));
        // Positive entries untouched
        assert_eq!(out[[0, 2]], 0.5);
    }

    #[test]
    fn test_absolute_keeps_magnitude() {
        let adj = sample();
        let out = condition(&adj, AdjMode::Absolute);
        assert_eq!(out[[0, 1]], 2.0);
        for (a, b) in adj.iter().zip(out.iter()) {
            assert_eq!(a.abs(), *b);
        }
    }

    #[test]
    fn test_input_unchanged() {
        let adj = sample();
        let copy = adj.clone();
        let _ = condition(&adj, AdjMode::IgnoreNegative);
        let _ = condition(&adj, AdjMode::Absolute);
        assert_eq!(adj, copy);
    }
}
