use serde::Serialize;

/// A sparse vector of term weights, entries sorted by dimension
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from (dimension, weight) pairs. Zero weights are dropped.
    #[must_use]
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(dim, _)| dim);
        Self { entries }
    }

    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, dim: usize) -> f64 {
        self.entries
            .binary_search_by_key(&dim, |&(d, _)| d)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Dot product over the shared dimensions (merge walk)
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (da, wa) = self.entries[i];
            let (db, wb) = other.entries[j];
            if da == db {
                sum += wa * wb;
                i += 1;
                j += 1;
            } else if da < db {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Normalize the vector to unit length
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            let inv_norm = 1.0 / norm;
            for (_, w) in &mut self.entries {
                *w *= inv_norm;
            }
        }
    }

    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_dot_is_cosine() {
        let v1 = SparseVector::new(vec![(0, 1.0)]).normalized();
        let v2 = SparseVector::new(vec![(0, 3.0)]).normalized();
        assert!((v1.dot(&v2) - 1.0).abs() < 1e-12);

        let v3 = SparseVector::new(vec![(1, 1.0)]).normalized();
        assert_eq!(v1.dot(&v3), 0.0);
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let zero = SparseVector::default().normalized();
        let v = SparseVector::new(vec![(2, 0.5)]).normalized();
        assert!(zero.is_empty());
        assert_eq!(zero.norm(), 0.0);
        assert_eq!(zero.dot(&v), 0.0);
    }

    #[test]
    fn test_unsorted_input_and_dot() {
        let a = SparseVector::new(vec![(5, 2.0), (1, 1.0), (3, 0.0)]);
        let b = SparseVector::new(vec![(1, 4.0), (5, 0.5), (7, 9.0)]);
        assert_eq!(a.nnz(), 2);
        assert_eq!(a.get(5), 2.0);
        assert_eq!(a.get(3), 0.0);
        assert_eq!(a.dot(&b), 5.0);
    }

    #[test]
    fn test_normalize() {
        let v = SparseVector::new(vec![(0, 3.0), (1, 4.0)]).normalized();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.get(0) - 0.6).abs() < 1e-12);
    }
}
