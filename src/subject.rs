//! Subject population contract.
//!
//! The core consumes subjects from an external provider: a stable
//! identifier, a group label that may stay unassigned, and a square
//! adjacency matrix whose size is common to every subject in a run.
//! Loading matrices from storage and label bookkeeping live outside this
//! crate; the pool here only enforces the invariants the algorithms
//! depend on and carries each subject's barcode once computed.

use ndarray::{Array1, Array2};

use crate::barcode::{barcode_len, compute_barcode};
use crate::config::BarcodeConfig;
use crate::error::{Error, Result};

/// One subject: an immutable network plus its derived barcode.
#[derive(Debug, Clone)]
pub struct Subject {
    pub id: String,
    pub group: Option<String>,
    pub data: Array2<f64>,
    pub barcode: Option<Array1<f64>>,
}

impl Subject {
    pub fn new(id: impl Into<String>, data: Array2<f64>) -> Self {
        Self {
            id: id.into(),
            group: None,
            data,
            barcode: None,
        }
    }

    pub fn with_group(id: impl Into<String>, group: impl Into<String>, data: Array2<f64>) -> Self {
        Self {
            id: id.into(),
            group: Some(group.into()),
            data,
            barcode: None,
        }
    }
}

/// Population of subjects sharing one node count.
#[derive(Debug, Clone)]
pub struct SubjectPool {
    n_nodes: usize,
    subjects: Vec<Subject>,
}

impl SubjectPool {
    pub fn new(n_nodes: usize) -> Self {
        Self {
            n_nodes,
            subjects: Vec::new(),
        }
    }

    /// Add a subject, rejecting shape disagreements and duplicate ids
    /// before any decomposition can run on bad input.
    pub fn push(&mut self, subject: Subject) -> Result<()> {
        let (rows, cols) = subject.data.dim();
        if rows != cols {
            return Err(Error::NotSquare { rows, cols });
        }
        if rows != self.n_nodes {
            return Err(Error::ShapeMismatch {
                got: rows,
                expected: self.n_nodes,
            });
        }
        if self.subjects.iter().any(|s| s.id == subject.id) {
            return Err(Error::DuplicateSubject(subject.id));
        }
        self.subjects.push(subject);
        Ok(())
    }

    /// Compute and attach a barcode for every subject.
    pub fn compute_barcodes(&mut self, config: &BarcodeConfig) -> Result<()> {
        for subject in &mut self.subjects {
            subject.barcode = Some(compute_barcode(&subject.data, config)?);
        }
        Ok(())
    }

    /// Stack all barcodes into a subjects-by-features matrix for the
    /// clustering engine. Fails if any subject has no barcode yet.
    pub fn barcode_matrix(&self, config: &BarcodeConfig) -> Result<Array2<f64>> {
        let dim = barcode_len(self.n_nodes, config);
        let mut x = Array2::zeros((self.subjects.len(), dim));
        for (i, subject) in self.subjects.iter().enumerate() {
            let barcode = subject
                .barcode
                .as_ref()
                .ok_or_else(|| Error::MissingBarcode(subject.id.clone()))?;
            if barcode.len() != dim {
                return Err(Error::ShapeMismatch {
                    got: barcode.len(),
                    expected: dim,
                });
            }
            x.row_mut(i).assign(barcode);
        }
        Ok(x)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn by_group(&self, group: &str) -> Vec<&Subject> {
        self.subjects
            .iter()
            .filter(|s| s.group.as_deref() == Some(group))
            .collect()
    }

    /// Group label per subject, aligned with assignment order.
    pub fn labels(&self) -> Vec<Option<&str>> {
        self.subjects.iter().map(|s| s.group.as_deref()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AdjMode, BarcodeMode, GeoMode};
    use ndarray::array;

    fn matrix() -> Array2<f64> {
        array![[0.0, 2.0, 1.0], [2.0, 0.0, 3.0], [1.0, 3.0, 0.0]]
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut pool = SubjectPool::new(4);
        let err = pool.push(Subject::new("s1", matrix())).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { got: 3, expected: 4 }));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut pool = SubjectPool::new(3);
        pool.push(Subject::new("s1", matrix())).unwrap();
        let err = pool.push(Subject::new("s1", matrix())).unwrap_err();
        assert!(matches!(err, Error::DuplicateSubject(_)));
    }

    #[test]
    fn test_barcode_matrix() {
        let config = BarcodeConfig {
            barcode_mode: BarcodeMode::Attached,
            adj_mode: AdjMode::Original,
            geo_mode: GeoMode::GeoIncluded,
            interpolation: 1.0,
        };
        let mut pool = SubjectPool::new(3);
        pool.push(Subject::with_group("s1", "CN", matrix())).unwrap();
        pool.push(Subject::with_group("s2", "AD", matrix() * 2.0))
            .unwrap();

        // Barcodes not computed yet
        assert!(matches!(
            pool.barcode_matrix(&config),
            Err(Error::MissingBarcode(_))
        ));

        pool.compute_barcodes(&config).unwrap();
        let x = pool.barcode_matrix(&config).unwrap();
        assert_eq!(x.dim(), (2, 6));
        assert_eq!(pool.by_group("AD").len(), 1);
        assert_eq!(pool.labels(), vec![Some("CN"), Some("AD")]);
    }
}
