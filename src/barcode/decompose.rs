//! Birth-death decomposition.
//!
//! Splits the strict upper triangle of a weighted adjacency matrix into a
//! maximum-weight spanning forest (the "birth" edges, where connected
//! components merge in the filtration) and the remaining edges (the
//! "death" edges, where independent cycles close).
//!
//! Exact-zero entries are promoted to the smallest representable positive
//! value first: a zero after conditioning is a present edge of negligible
//! weight, not a missing edge, so the edge-count invariants of a complete
//! graph hold for any finite input.

use ndarray::Array2;

/// Smallest positive f64 (the subnormal 5e-324), matching
/// `nextafter(0, 1)`. Distinguishes "present with negligible weight"
/// from the structural zeros outside the upper triangle.
const SMALLEST_POSITIVE: f64 = f64::from_bits(1);

/// Strict upper triangle (k = 1) with exact zeros promoted to
/// `SMALLEST_POSITIVE`. Diagonal and lower triangle are structural zeros.
fn upper_triangle(adj: &Array2<f64>) -> Array2<f64> {
    let n = adj.nrows();
    let mut triu = Array2::zeros((n, n));
    for i in 0..n {
        for j in i + 1..n {
            let w = adj[[i, j]];
            triu[[i, j]] = if w == 0.0 { SMALLEST_POSITIVE } else { w };
        }
    }
    triu
}

/// Birth-death decomposition of an adjacency matrix.
///
/// Returns `(forest, nonforest)`, both with the input's shape and
/// non-edges as zero. The forest is the maximum-weight spanning forest of
/// the strict upper triangle (larger weights denote stronger, earlier
/// connections); the non-forest matrix holds every remaining
/// upper-triangular edge.
///
/// Ties between equal weights are broken lexicographically on the
/// (row, col) index pair, so the decomposition is deterministic even when
/// edge weights repeat.
pub fn bd_decomposition(adj: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let n = adj.nrows();
    let triu = upper_triangle(adj);

    // Kruskal on weights sorted descending: accepting an edge iff it joins
    // two different components yields the maximum-weight spanning forest,
    // equivalent to negating, taking the minimum spanning forest, and
    // negating back.
    let mut edges: Vec<(usize, usize, f64)> = Vec::with_capacity(n.saturating_sub(1) * n / 2);
    for i in 0..n {
        for j in i + 1..n {
            edges.push((i, j, triu[[i, j]]));
        }
    }
    edges.sort_by(|a, b| b.2.total_cmp(&a.2).then((a.0, a.1).cmp(&(b.0, b.1))));

    let mut parent: Vec<usize> = (0..n).collect();
    let mut rank = vec![0usize; n];

    fn find(parent: &mut [usize], i: usize) -> usize {
        if parent[i] != i {
            parent[i] = find(parent, parent[i]);
        }
        parent[i]
    }

    let mut forest = Array2::zeros((n, n));
    for (i, j, w) in edges {
        let ri = find(&mut parent, i);
        let rj = find(&mut parent, j);
        if ri != rj {
            if rank[ri] < rank[rj] {
                parent[ri] = rj;
            } else {
                parent[rj] = ri;
                if rank[ri] == rank[rj] {
                    rank[ri] += 1;
                }
            }
            forest[[i, j]] = w;
        }
    }

    // Forest cells cancel exactly, leaving the cycle-closing edges.
    let nonforest = &triu - &forest;
    (forest, nonforest)
}

/// Sorted birth and death sets of an adjacency matrix.
///
/// Both sets are the non-zero weights of the corresponding decomposition
/// output, in ascending order. Order carries no edge identity, only
/// magnitude statistics.
pub fn birth_death_sets(adj: &Array2<f64>) -> (Vec<f64>, Vec<f64>) {
    let (forest, nonforest) = bd_decomposition(adj);
    (nonzero_sorted(&forest), nonzero_sorted(&nonforest))
}

fn nonzero_sorted(m: &Array2<f64>) -> Vec<f64> {
    let mut weights: Vec<f64> = m.iter().copied().filter(|&w| w != 0.0).collect();
    weights.sort_by(f64::total_cmp);
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// 4-node complete graph with pairwise-distinct weights.
    fn four_node() -> Array2<f64> {
        array![
            [0.0, 5.0, 3.0, 1.0],
            [5.0, 0.0, 2.0, 4.0],
            [3.0, 2.0, 0.0, 6.0],
            [1.0, 4.0, 6.0, 0.0]
        ]
    }

    #[test]
    fn test_four_node_split() {
        // Maximum spanning forest picks (3,4)=6, (1,2)=5, (2,4)=4; the
        // remaining edges 1, 2, 3 close cycles.
        let (births, deaths) = birth_death_sets(&four_node());
        assert_eq!(births, vec![4.0, 5.0, 6.0]);
        assert_eq!(deaths, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_edge_counts_partition_upper_triangle() {
        let (forest, nonforest) = bd_decomposition(&four_node());
        let n = 4;
        let forest_edges: Vec<_> = forest
            .indexed_iter()
            .filter(|(_, &w)| w != 0.0)
            .map(|(p, _)| p)
            .collect();
        let nonforest_edges: Vec<_> = nonforest
            .indexed_iter()
            .filter(|(_, &w)| w != 0.0)
            .map(|(p, _)| p)
            .collect();

        assert_eq!(forest_edges.len(), n - 1);
        assert_eq!(nonforest_edges.len(), n * (n - 1) / 2 - (n - 1));

        // Disjoint, upper-triangular, covering every i < j cell
        for &(i, j) in forest_edges.iter().chain(&nonforest_edges) {
            assert!(i < j);
            assert!(!(forest[[i, j]] != 0.0 && nonforest[[i, j]] != 0.0));
        }
        assert_eq!(forest_edges.len() + nonforest_edges.len(), n * (n - 1) / 2);
    }

    #[test]
    fn test_zero_entries_become_negligible_edges() {
        // A zero weight is a present edge of negligible weight, so the
        // forest still spans all nodes.
        let adj = array![[0.0, 0.0, 2.0], [0.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let (births, deaths) = birth_death_sets(&adj);
        assert_eq!(births.len(), 2);
        assert_eq!(deaths.len(), 1);
        assert_eq!(births[1], 2.0);
        assert!(births[0] > 0.0 && births[0] < f64::MIN_POSITIVE);
    }

    #[test]
    fn test_duplicate_weights_deterministic() {
        let adj = array![
            [0.0, 1.0, 1.0, 1.0],
            [1.0, 0.0, 1.0, 1.0],
            [1.0, 0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0, 0.0]
        ];
        let (f1, n1) = bd_decomposition(&adj);
        let (f2, n2) = bd_decomposition(&adj);
        assert_eq!(f1, f2);
        assert_eq!(n1, n2);
        // Lexicographic tie-break: the forest takes (0,1), (0,2), (0,3)
        assert_eq!(f1[[0, 1]], 1.0);
        assert_eq!(f1[[0, 2]], 1.0);
        assert_eq!(f1[[0, 3]], 1.0);
    }

    #[test]
    fn test_input_not_mutated() {
        let adj = four_node();
        let copy = adj.clone();
        let _ = bd_decomposition(&adj);
        assert_eq!(adj, copy);
    }
}
