//! Dense integer distance matrix.

use crate::error::SolveError;
use crate::units;

use super::geo;

/// A dense n×n matrix of whole-meter distances, stored in row-major order.
///
/// Built once per routing day over the depot and that day's selected
/// customers. Integer meters keep the search arithmetic exact; kilometer
/// readback happens only when routes are extracted.
///
/// # Examples
///
/// ```
/// use stockroute::distance::DistanceMatrix;
///
/// let points = [
///     (40.7128, -74.0060), // depot
///     (40.7580, -73.9855),
/// ];
/// let m = DistanceMatrix::from_points(&points).unwrap();
/// assert_eq!(m.size(), 2);
/// assert_eq!(m.get(0, 0), 0);
/// assert_eq!(m.get(0, 1), m.get(1, 0));
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes a haversine meter matrix from `(latitude, longitude)` points.
    ///
    /// Returns [`SolveError::NumericOverflow`] if any pairwise distance
    /// does not fit the solver's scaled integer range.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, SolveError> {
        let n = points.len();
        let mut matrix = Self {
            data: vec![0; n * n],
            size: n,
        };
        for i in 0..n {
            for j in (i + 1)..n {
                let km = geo::distance_km(points[i].0, points[i].1, points[j].0, points[j].1);
                let meters = units::meters_from_km(km)?;
                matrix.set(i, j, meters);
                matrix.set(j, i, meters);
            }
        }
        Ok(matrix)
    }

    /// Creates a matrix from an explicit n×n meter grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<i64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Distance in meters from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, meters: i64) {
        self.data[from * self.size + to] = meters;
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is exactly symmetric.
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the candidate nearest to `from`.
    ///
    /// Ties resolve to the earliest candidate; returns `None` when
    /// `candidates` is empty.
    pub fn nearest(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates.iter().copied().min_by_key(|&c| self.get(from, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<(f64, f64)> {
        vec![
            (40.7128, -74.0060),
            (40.7580, -73.9855),
            (40.6892, -74.0445),
        ]
    }

    #[test]
    fn test_from_points() {
        let m = DistanceMatrix::from_points(&sample_points()).expect("fits");
        assert_eq!(m.size(), 3);
        // Depot to Times Square is about 5.3 km.
        assert!(m.get(0, 1) > 5000 && m.get(0, 1) < 5600);
    }

    #[test]
    fn test_zero_diagonal() {
        let m = DistanceMatrix::from_points(&sample_points()).expect("fits");
        for i in 0..m.size() {
            assert_eq!(m.get(i, i), 0);
        }
    }

    #[test]
    fn test_symmetric() {
        let m = DistanceMatrix::from_points(&sample_points()).expect("fits");
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_from_data() {
        let m = DistanceMatrix::from_data(2, vec![0, 5000, 5000, 0]).expect("valid");
        assert_eq!(m.get(0, 1), 5000);
        assert!(DistanceMatrix::from_data(2, vec![0, 1, 2]).is_none());
    }

    #[test]
    fn test_asymmetric_detected() {
        let m = DistanceMatrix::from_data(2, vec![0, 10, 15, 0]).expect("valid");
        assert!(!m.is_symmetric());
    }

    #[test]
    fn test_nearest() {
        let m = DistanceMatrix::from_points(&sample_points()).expect("fits");
        // From the depot: Times Square ~5.3 km, Battery Park side ~4.2 km.
        assert_eq!(m.nearest(0, &[1, 2]), Some(2));
        assert_eq!(m.nearest(0, &[1]), Some(1));
        assert_eq!(m.nearest(0, &[]), None);
    }

    #[test]
    fn test_nearest_tie_breaks_to_first() {
        let m = DistanceMatrix::from_data(3, vec![0, 7, 7, 7, 0, 7, 7, 7, 0]).expect("valid");
        assert_eq!(m.nearest(0, &[1, 2]), Some(1));
        assert_eq!(m.nearest(0, &[2, 1]), Some(2));
    }

    #[test]
    fn test_empty() {
        let m = DistanceMatrix::from_points(&[]).expect("fits");
        assert_eq!(m.size(), 0);
        assert!(m.is_symmetric());
    }
}
