//! Rank correspondence between centroid edges and target values.

use ndarray::Array2;

use crate::barcode::bd_decomposition;

/// Positions of a working centroid matrix's forest and non-forest edges,
/// each ordered by ascending edge weight.
///
/// The i-th entry of the first list is the matrix cell holding the i-th
/// smallest current birth weight, so the i-th smallest *target* birth
/// value can be scattered into it; symmetrically for deaths. No
/// conditioning is applied: the working matrix is used as-is.
///
/// Weight ties order by (row, col) so the scatter is deterministic.
pub fn optimal_matching(adj: &Array2<f64>) -> (Vec<(usize, usize)>, Vec<(usize, usize)>) {
    let (forest, nonforest) = bd_decomposition(adj);
    (sorted_positions(&forest), sorted_positions(&nonforest))
}

fn sorted_positions(m: &Array2<f64>) -> Vec<(usize, usize)> {
    let mut cells: Vec<((usize, usize), f64)> = m
        .indexed_iter()
        .filter(|&(_, &w)| w != 0.0)
        .map(|(pos, &w)| (pos, w))
        .collect();
    cells.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    cells.into_iter().map(|(pos, _)| pos).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_matching_orders_by_weight() {
        let adj = array![
            [0.0, 5.0, 3.0, 1.0],
            [5.0, 0.0, 2.0, 4.0],
            [3.0, 2.0, 0.0, 6.0],
            [1.0, 4.0, 6.0, 0.0]
        ];
        let (birth_order, death_order) = optimal_matching(&adj);

        // Forest edges (1,3)=4, (0,1)=5, (2,3)=6 ascending
        assert_eq!(birth_order, vec![(1, 3), (0, 1), (2, 3)]);
        // Non-forest edges (0,3)=1, (1,2)=2, (0,2)=3 ascending
        assert_eq!(death_order, vec![(0, 3), (1, 2), (0, 2)]);
    }

    #[test]
    fn test_matching_counts() {
        let n = 6;
        let mut adj = Array2::zeros((n, n));
        for i in 0..n {
            for j in i + 1..n {
                let w = ((i * n + j) as f64 * 0.37).sin().abs() + 0.01;
                adj[[i, j]] = w;
                adj[[j, i]] = w;
            }
        }
        let (birth_order, death_order) = optimal_matching(&adj);
        assert_eq!(birth_order.len(), n - 1);
        assert_eq!(death_order.len(), n * (n - 1) / 2 - (n - 1));
    }
}
