//! Row-stochastic transition matrices

use serde::{Deserialize, Serialize};

use super::ids::StateId;
use crate::error::ConsistencyError;

/// Square table of one-step transition probabilities, stored row-major.
///
/// Row `i`, column `j` is the probability of moving from state `i` to state `j`.
/// Once built the matrix is never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    size: usize,
    data: Vec<f64>,
}

impl TransitionMatrix {
    /// Build from explicit rows. Rows must form a square table.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ConsistencyError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(ConsistencyError::MatrixShape {
                    rows: size,
                    states: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self { size, data })
    }

    pub(crate) fn from_row_major(size: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), size * size);
        Self { size, data }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, from: StateId) -> Option<&[f64]> {
        let i = from.index();
        if i >= self.size {
            return None;
        }
        Some(&self.data[i * self.size..(i + 1) * self.size])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0
        self.data.chunks_exact(self.size.max(1))
    }

    pub fn probability(&self, from: StateId, to: StateId) -> Option<f64> {
        self.row(from).and_then(|row| row.get(to.index()).copied())
    }

    /// Check every entry is non-negative and every row sums to 1 within `tolerance`
    pub fn is_row_stochastic(&self, tolerance: f64) -> bool {
        self.rows().all(|row| {
            row.iter().all(|p| *p >= 0.0) && (row.iter().sum::<f64>() - 1.0).abs() <= tolerance
        })
    }
}
