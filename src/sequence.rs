//! A pipeline of coordinate operations, simplified at construction time.
//!
//! Cleaning is applied once, in [`CoordinateOperationSequence::new`], not
//! lazily on each access — every other method assumes `self.steps` is
//! already fused, flattened, and identity-free, which is what makes
//! cleaning idempotent: re-cleaning an already-clean sequence is a no-op.

use crate::error::Error;
use crate::operation::{CoordinateOperation, OperationCapability};
use crate::point::Point;
use crate::Direction;

/// `[op1, op2, ..., opN]`, applied left to right in the forward direction.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateOperationSequence {
    pub steps: Vec<CoordinateOperation>,
    precision_override: Option<f64>,
}

impl CoordinateOperationSequence {
    #[must_use]
    pub fn new(steps: Vec<CoordinateOperation>) -> CoordinateOperationSequence {
        CoordinateOperationSequence {
            steps: clean(steps),
            precision_override: None,
        }
    }

    /// Override the aggregate precision instead of summing component
    /// precisions — for a chain whose overall error has been independently
    /// characterized (e.g. against a reference transformation).
    #[must_use]
    pub fn with_precision(mut self, precision: f64) -> CoordinateOperationSequence {
        self.precision_override = Some(precision);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.steps.iter().all(OperationCapability::is_identity)
    }

    /// `true` iff any step is of the same enum variant as `other`.
    #[must_use]
    pub fn includes(&self, predicate: impl Fn(&CoordinateOperation) -> bool) -> bool {
        self.steps.iter().any(predicate)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let mut current = point.clone();
        let indices: Box<dyn Iterator<Item = usize>> = match direction {
            Direction::Fwd => Box::new(0..self.steps.len()),
            Direction::Inv => Box::new((0..self.steps.len()).rev()),
        };
        for index in indices {
            current = self.steps[index]
                .transform(&current, direction)
                .map_err(|source| Error::SequenceStep {
                    index,
                    source: Box::new(source),
                })?;
        }
        Ok(current)
    }

    pub fn inverse(&self) -> Result<CoordinateOperationSequence, Error> {
        let mut inverted = Vec::with_capacity(self.steps.len());
        for step in self.steps.iter().rev() {
            inverted.push(step.inverse()?);
        }
        Ok(CoordinateOperationSequence::new(inverted))
    }

    pub fn precision(&self) -> f64 {
        self.precision_override
            .unwrap_or_else(|| self.steps.iter().map(OperationCapability::precision).sum())
    }
}

/// `a` and `b` fuse away iff `b` is structurally `a.inverse()`.
fn cancels(a: &CoordinateOperation, b: &CoordinateOperation) -> bool {
    a.inverse().map(|inv| &inv == b).unwrap_or(false)
}

fn clean(steps: Vec<CoordinateOperation>) -> Vec<CoordinateOperation> {
    let was_nonempty = !steps.is_empty();

    let mut flat = Vec::with_capacity(steps.len());
    for step in steps {
        match step {
            CoordinateOperation::Identity => {}
            CoordinateOperation::Sequence(inner) => flat.extend(inner.steps),
            other => flat.push(other),
        }
    }

    let mut fused: Vec<CoordinateOperation> = Vec::with_capacity(flat.len());
    for step in flat {
        if fused.last().is_some_and(|top| cancels(top, &step)) {
            fused.pop();
        } else {
            fused.push(step);
        }
    }

    if fused.is_empty() && was_nonempty {
        fused.push(CoordinateOperation::Identity);
    }
    fused
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::primitives::{ChangeCoordinateDimension, LongitudeRotation};

    #[test]
    fn identity_steps_are_dropped() {
        let seq = CoordinateOperationSequence::new(vec![
            CoordinateOperation::Identity,
            CoordinateOperation::LongitudeRotation(LongitudeRotation::new(0.1)),
            CoordinateOperation::Identity,
        ]);
        assert_eq!(seq.steps.len(), 1);
    }

    #[test]
    fn nested_sequences_flatten() {
        let inner = CoordinateOperationSequence::new(vec![CoordinateOperation::LongitudeRotation(
            LongitudeRotation::new(0.1),
        )]);
        let outer = CoordinateOperationSequence::new(vec![CoordinateOperation::Sequence(inner)]);
        assert_eq!(outer.steps.len(), 1);
    }

    #[test]
    fn inverse_pairs_cancel_transitively() {
        let rot = LongitudeRotation::new(0.1);
        let seq = CoordinateOperationSequence::new(vec![
            CoordinateOperation::LongitudeRotation(rot),
            CoordinateOperation::LongitudeRotation(rot.inverted()),
        ]);
        assert!(seq.is_identity());
        assert_eq!(seq.steps, vec![CoordinateOperation::Identity]);
    }

    #[test]
    fn to3d_to2d_cancels() {
        let seq = CoordinateOperationSequence::new(vec![
            CoordinateOperation::ChangeDimension(ChangeCoordinateDimension::to3d(0.0)),
            CoordinateOperation::ChangeDimension(ChangeCoordinateDimension::to2d()),
        ]);
        assert_eq!(seq.steps, vec![CoordinateOperation::Identity]);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let seq = CoordinateOperationSequence::new(vec![CoordinateOperation::LongitudeRotation(
            LongitudeRotation::new(0.2),
        )]);
        let recleaned = CoordinateOperationSequence::new(seq.steps.clone());
        assert_eq!(seq, recleaned);
    }

    #[test]
    fn empty_sequence_stays_empty() {
        let seq = CoordinateOperationSequence::new(vec![]);
        assert!(seq.is_empty());
    }

    #[test]
    fn transform_runs_steps_in_order_and_reverses_for_inverse() -> Result<(), Error> {
        let seq = CoordinateOperationSequence::new(vec![
            CoordinateOperation::LongitudeRotation(LongitudeRotation::new(0.1)),
            CoordinateOperation::LongitudeRotation(LongitudeRotation::new(0.2)),
        ]);
        let p = Point::xy(1.0, 2.0);
        let fwd = seq.transform(&p, Direction::Fwd)?;
        assert!((fwd.get(0) - 1.3).abs() < 1e-12);
        let back = seq.transform(&fwd, Direction::Inv)?;
        assert!((back.get(0) - p.get(0)).abs() < 1e-12);
        Ok(())
    }
}
