//! A generic fixed-point combinator: wraps an inner operation and solves
//! for the ordinates it doesn't have a closed-form inverse for by
//! repeatedly applying the forward operation and adjusting a working
//! estimate until it converges, or giving up after `max_iterations`.
//!
//! This is the pattern NTv2 grid-shift inversion and other forward-only
//! grid operations rely on: there's no algebraic inverse for "look up a
//! shift at this location", so the inverse is "guess a source location,
//! apply the forward shift, see how far off target you land, adjust".

use crate::error::Error;
use crate::operation::{CoordinateOperation, OperationCapability};
use crate::point::Point;
use crate::Direction;

/// Solve `inner(p) == target` for `p`, iterating the subset of ordinates
/// named by `real_indices` against the corresponding entries of
/// `calc_indices` until every tracked ordinate is within its `tolerance`.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeTransformation {
    pub inner: Box<CoordinateOperation>,
    pub real_indices: Vec<usize>,
    pub calc_indices: Vec<usize>,
    pub tolerances: Vec<f64>,
    pub max_iterations: usize,
    pub precision: f64,
}

impl IterativeTransformation {
    pub fn new(
        inner: CoordinateOperation,
        real_indices: Vec<usize>,
        calc_indices: Vec<usize>,
        tolerances: Vec<f64>,
    ) -> Result<IterativeTransformation, Error> {
        if real_indices.len() != calc_indices.len() || real_indices.len() != tolerances.len() {
            return Err(Error::InvalidParameter(
                "iterative transformation index/tolerance arity mismatch".to_string(),
            ));
        }
        let precision = tolerances.iter().cloned().fold(0.0_f64, f64::max);
        Ok(IterativeTransformation {
            inner: Box::new(inner),
            real_indices,
            calc_indices,
            tolerances,
            max_iterations: 12,
            precision,
        })
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> IterativeTransformation {
        self.max_iterations = max_iterations;
        self
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn inverse(&self) -> Result<CoordinateOperation, Error> {
        Ok(CoordinateOperation::Iterative(Box::new(
            IterativeTransformation {
                inner: Box::new(self.inner.inverse()?),
                real_indices: self.calc_indices.clone(),
                calc_indices: self.real_indices.clone(),
                tolerances: self.tolerances.clone(),
                max_iterations: self.max_iterations,
                precision: self.precision,
            },
        )))
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        if matches!(direction, Direction::Inv) {
            return self.inverse()?.transform(point, Direction::Fwd);
        }

        let target: Vec<f64> = self.real_indices.iter().map(|&i| point.get(i)).collect();
        let mut estimate = point.clone();

        for _ in 0..self.max_iterations {
            let forward = self.inner.transform(&estimate, Direction::Fwd)?;
            let mut converged = true;
            for (k, &calc_idx) in self.calc_indices.iter().enumerate() {
                let residual = target[k] - forward.get(calc_idx);
                if residual.abs() > self.tolerances[k] {
                    converged = false;
                }
                let real_idx = self.real_indices[k];
                estimate.set(real_idx, estimate.get(real_idx) + residual);
            }
            if converged {
                return self.inner.transform(&estimate, Direction::Fwd);
            }
        }

        Err(Error::TooManyIterations {
            op: "IterativeTransformation".to_string(),
            max: self.max_iterations,
        })
    }
}
