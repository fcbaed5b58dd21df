//! Random transition matrix generation
//!
//! Every trial gets its own matrix: each row is a vector of independent
//! uniform [0, 1) draws divided by their sum.

use rand::Rng;

use crate::model::{StateSpace, TransitionMatrix};

/// Generate a fresh row-stochastic matrix over `states`
pub fn generate_transition_matrix<R: Rng + ?Sized>(
    states: &StateSpace,
    rng: &mut R,
) -> TransitionMatrix {
    random_stochastic_matrix(states.len(), rng)
}

/// Generate a fresh `size` x `size` row-stochastic matrix.
///
/// `size == 0` yields an empty matrix and `size == 1` yields `[[1.0]]`.
pub fn random_stochastic_matrix<R: Rng + ?Sized>(size: usize, rng: &mut R) -> TransitionMatrix {
    let mut data = Vec::with_capacity(size * size);
    for _ in 0..size {
        let start = data.len();
        loop {
            data.truncate(start);
            data.extend((0..size).map(|_| rng.random::<f64>()));
            let sum: f64 = data[start..].iter().sum();
            // Only an all-zero draw can fail this; draw the row again
            if sum > 0.0 {
                data[start..].iter_mut().for_each(|p| *p /= sum);
                break;
            }
        }
    }
    TransitionMatrix::from_row_major(size, data)
}
