//! Sampled 1-D profiles
//!
//! Every reader in [`crate::readers`] produces a [`SampleSeries`]: one
//! `(position, value)` pair per spatial cell. Readers do not share series;
//! each call hands a fresh one to its caller.
//!
//! # Example
//!
//! ```rust
//! use rtbench::series::{cell_centers, SampleSeries};
//!
//! let nodes = [0.0, 1.0, 2.0, 4.0];
//! let centers = cell_centers(&nodes);
//! assert_eq!(centers, vec![0.5, 1.5, 3.0]);
//!
//! let series = SampleSeries::new(centers, vec![1.0, 0.5, 0.0]).unwrap();
//! assert_eq!(series.len(), 3);
//! ```

use crate::readers::ReadError;

/// Ordered `(position, value)` samples along a 1-D domain
///
/// Positions and values are stored as two parallel vectors. The only way to
/// build a series is [`SampleSeries::new`], which rejects vectors of
/// different lengths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleSeries {
    positions: Vec<f64>,
    values: Vec<f64>,
}

impl SampleSeries {

    // ======================================= constructors =======================================

    /// Build a series from parallel position and value vectors
    ///
    /// # Errors
    ///
    /// [`ReadError::LengthMismatch`] if the vectors differ in length.
    pub fn new(positions: Vec<f64>, values: Vec<f64>) -> Result<Self, ReadError> {
        if positions.len() != values.len() {
            return Err(ReadError::LengthMismatch {
                positions: positions.len(),
                values: values.len(),
            });
        }
        Ok(Self { positions, values })
    }

    /// Build a series from `(position, value)` pairs, sorting by position
    pub fn from_unsorted_pairs(mut pairs: Vec<(f64, f64)>) -> Self {
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (positions, values) = pairs.into_iter().unzip();
        Self { positions, values }
    }

    // ======================================= accessors ==========================================

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over `(position, value)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions.iter().copied().zip(self.values.iter().copied())
    }

    /// Smallest and largest position, `None` for an empty series
    pub fn x_range(&self) -> Option<(f64, f64)> {
        min_max(&self.positions)
    }

    /// Smallest and largest value, `None` for an empty series
    pub fn value_range(&self) -> Option<(f64, f64)> {
        min_max(&self.values)
    }
}

/// Midpoints of adjacent node coordinates
///
/// Returns one fewer entry than `nodes`; an empty or single-node input gives
/// an empty result.
pub fn cell_centers(nodes: &[f64]) -> Vec<f64> {
    nodes
        .windows(2)
        .map(|pair| pair[0] + (pair[1] - pair[0]) / 2.0)
        .collect()
}

fn min_max(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }
    let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((lo, hi))
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cell_centers_midpoints() {
        let nodes = [0.0, 0.5, 1.5, 3.0];
        let centers = cell_centers(&nodes);

        assert_eq!(centers.len(), nodes.len() - 1);
        assert_relative_eq!(centers[0], 0.25);
        assert_relative_eq!(centers[1], 1.0);
        assert_relative_eq!(centers[2], 2.25);
    }

    #[test]
    fn test_cell_centers_strictly_increasing() {
        let nodes: Vec<f64> = (0..=100).map(|i| i as f64).collect();
        let centers = cell_centers(&nodes);

        assert_eq!(centers.len(), 100);
        assert!(centers.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_cell_centers_degenerate() {
        assert!(cell_centers(&[]).is_empty());
        assert!(cell_centers(&[1.0]).is_empty());
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = SampleSeries::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, ReadError::LengthMismatch { positions: 2, values: 1 }));
    }

    #[test]
    fn test_ranges() {
        let series = SampleSeries::new(vec![0.5, 1.5, 2.5], vec![0.2, 1.0, -0.1]).unwrap();
        assert_eq!(series.x_range(), Some((0.5, 2.5)));
        assert_eq!(series.value_range(), Some((-0.1, 1.0)));
        assert_eq!(SampleSeries::default().x_range(), None);
    }

    #[test]
    fn test_from_unsorted_pairs_sorts_by_position() {
        let series = SampleSeries::from_unsorted_pairs(vec![(2.0, 20.0), (0.0, 0.0), (1.0, 10.0)]);
        assert_eq!(series.positions(), &[0.0, 1.0, 2.0]);
        assert_eq!(series.values(), &[0.0, 10.0, 20.0]);
    }
}
