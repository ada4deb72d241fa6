//! Pairwise distance cache for one computation.

use super::traits::DistanceMeasure;
use crate::dataset::Entity;
use ndarray::Array2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Symmetric matrix of pairwise distances over a fixed list of entities.
///
/// Each unordered pair is evaluated once; the diagonal is zero.
#[derive(Debug, Clone)]
pub struct DistanceCache {
    matrix: Array2<f64>,
}

impl DistanceCache {
    /// Evaluate `measure` on every unordered pair of `entities`.
    pub fn compute<M>(entities: &[&Entity], measure: &M) -> Self
    where
        M: DistanceMeasure + ?Sized,
    {
        let n = entities.len();
        let mut matrix = Array2::zeros((n, n));

        // Row i holds distances to entities i+1..n.
        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| upper_row(entities, i, measure))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<f64>> = (0..n).map(|i| upper_row(entities, i, measure)).collect();

        for (i, row) in rows.into_iter().enumerate() {
            for (offset, d) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                matrix[[i, j]] = d;
                matrix[[j, i]] = d;
            }
        }

        Self { matrix }
    }

    /// Distance between the `i`-th and `j`-th entity.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[[i, j]]
    }

    /// Number of cached entities.
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of distances from entity `i` to entities `range`.
    pub fn row_sum(&self, i: usize, range: std::ops::Range<usize>) -> f64 {
        self.matrix.row(i).slice(ndarray::s![range]).sum()
    }
}

fn upper_row<M>(entities: &[&Entity], i: usize, measure: &M) -> Vec<f64>
where
    M: DistanceMeasure + ?Sized,
{
    entities[i + 1..]
        .iter()
        .map(|other| measure.distance(entities[i], other))
        .collect()
}
