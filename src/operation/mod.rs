//! Coordinate operations: the small, invertible building blocks a
//! [`Planner`](crate::planner::Planner) assembles into pipelines.
//!
//! `CoordinateOperation` is a tagged sum of variants rather than a class
//! hierarchy: every primitive, every projection, and every datum
//! transformation is a variant of one enum, and the shared capability
//! set (`transform`, `inverse`, `precision`, `is_identity`, structural
//! equality) is a single `impl` dispatching on the tag. This keeps a
//! pipeline a plain `Vec<CoordinateOperation>` with no trait objects,
//! dynamic dispatch, or downcasting anywhere in the hot path.

pub mod geocentric;
pub mod iterative;
pub mod primitives;

use crate::error::Error;
use crate::point::Point;
use crate::projection::Projection;
use crate::transform::DatumTransformation;
use crate::Direction;
use iterative::IterativeTransformation;
use primitives::*;

/// The capability set every `CoordinateOperation` variant provides.
pub trait OperationCapability {
    fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error>;
    fn inverse(&self) -> Result<CoordinateOperation, Error>;
    fn precision(&self) -> f64;
    fn is_identity(&self) -> bool;
}

/// A coordinate operation: one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateOperation {
    Identity,
    ChangeDimension(ChangeCoordinateDimension),
    Switch(CoordinateSwitch),
    Opposite(OppositeCoordinate),
    LongitudeRotation(LongitudeRotation),
    UnitConversion(UnitConversionOp),
    Rounding(CoordinateRounding),
    Memorize(MemorizeCoordinate),
    LoadMemorize(LoadMemorizeCoordinate),
    CheckInExtent(CheckInExtent),
    Geographic2Geocentric(geocentric::Geographic2Geocentric),
    Geocentric2Geographic(geocentric::Geocentric2Geographic),
    Iterative(Box<IterativeTransformation>),
    Projection(Projection),
    Datum(DatumTransformation),
    Sequence(crate::sequence::CoordinateOperationSequence),
    /// Flips the `Direction` handed to the wrapped operation. Used to
    /// invert operations (projections, most datum transformations) whose
    /// own `transform` already branches on direction internally, so their
    /// "inverse" is the same struct run the other way rather than a
    /// separately-built object.
    Reversed(Box<CoordinateOperation>),
}

impl CoordinateOperation {
    #[must_use]
    pub fn identity() -> CoordinateOperation {
        CoordinateOperation::Identity
    }
}

impl OperationCapability for CoordinateOperation {
    fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        match self {
            CoordinateOperation::Identity => Ok(point.clone()),
            CoordinateOperation::ChangeDimension(op) => op.transform(point, direction),
            CoordinateOperation::Switch(op) => op.transform(point, direction),
            CoordinateOperation::Opposite(op) => op.transform(point, direction),
            CoordinateOperation::LongitudeRotation(op) => op.transform(point, direction),
            CoordinateOperation::UnitConversion(op) => op.transform(point, direction),
            CoordinateOperation::Rounding(op) => op.transform(point, direction),
            CoordinateOperation::Memorize(op) => op.transform(point, direction),
            CoordinateOperation::LoadMemorize(op) => op.transform(point, direction),
            CoordinateOperation::CheckInExtent(op) => op.transform(point, direction),
            CoordinateOperation::Geographic2Geocentric(op) => op.transform(point, direction),
            CoordinateOperation::Geocentric2Geographic(op) => op.transform(point, direction),
            CoordinateOperation::Iterative(op) => op.transform(point, direction),
            CoordinateOperation::Projection(op) => op.transform(point, direction),
            CoordinateOperation::Datum(op) => op.transform(point, direction),
            CoordinateOperation::Sequence(op) => op.transform(point, direction),
            CoordinateOperation::Reversed(op) => op.transform(point, direction.flipped()),
        }
    }

    fn inverse(&self) -> Result<CoordinateOperation, Error> {
        match self {
            CoordinateOperation::Identity => Ok(CoordinateOperation::Identity),
            CoordinateOperation::ChangeDimension(op) => {
                Ok(CoordinateOperation::ChangeDimension(op.inverted()))
            }
            CoordinateOperation::Switch(op) => Ok(CoordinateOperation::Switch(op.clone())),
            CoordinateOperation::Opposite(op) => Ok(CoordinateOperation::Opposite(op.clone())),
            CoordinateOperation::LongitudeRotation(op) => {
                Ok(CoordinateOperation::LongitudeRotation(op.inverted()))
            }
            CoordinateOperation::UnitConversion(op) => {
                Ok(CoordinateOperation::UnitConversion(op.inverted()))
            }
            CoordinateOperation::Rounding(_) => Err(Error::NonInvertible {
                op: "CoordinateRounding".to_string(),
            }),
            CoordinateOperation::Memorize(op) => {
                Ok(CoordinateOperation::LoadMemorize(op.paired_load()))
            }
            CoordinateOperation::LoadMemorize(op) => {
                Ok(CoordinateOperation::Memorize(op.paired_memorize()))
            }
            CoordinateOperation::CheckInExtent(op) => {
                Ok(CoordinateOperation::CheckInExtent(op.clone()))
            }
            CoordinateOperation::Geographic2Geocentric(op) => {
                Ok(CoordinateOperation::Geocentric2Geographic(op.inverted()))
            }
            CoordinateOperation::Geocentric2Geographic(op) => {
                Ok(CoordinateOperation::Geographic2Geocentric(op.inverted()))
            }
            CoordinateOperation::Iterative(op) => op.inverse(),
            CoordinateOperation::Projection(_) => {
                Ok(CoordinateOperation::Reversed(Box::new(self.clone())))
            }
            CoordinateOperation::Datum(op) => op.inverse(),
            CoordinateOperation::Sequence(op) => Ok(CoordinateOperation::Sequence(op.inverse()?)),
            CoordinateOperation::Reversed(op) => Ok((**op).clone()),
        }
    }

    fn precision(&self) -> f64 {
        match self {
            CoordinateOperation::Identity => 0.0,
            CoordinateOperation::ChangeDimension(_) => 0.0,
            CoordinateOperation::Switch(_) => 0.0,
            CoordinateOperation::Opposite(_) => 0.0,
            CoordinateOperation::LongitudeRotation(_) => 0.0,
            CoordinateOperation::UnitConversion(_) => 0.0,
            CoordinateOperation::Rounding(op) => op.resolution / 2.0,
            CoordinateOperation::Memorize(_) | CoordinateOperation::LoadMemorize(_) => 0.0,
            CoordinateOperation::CheckInExtent(_) => 0.0,
            CoordinateOperation::Geographic2Geocentric(_) => 0.001,
            CoordinateOperation::Geocentric2Geographic(_) => 1e-4,
            CoordinateOperation::Iterative(op) => op.precision(),
            CoordinateOperation::Projection(op) => op.precision(),
            CoordinateOperation::Datum(op) => op.precision(),
            CoordinateOperation::Sequence(op) => op.precision(),
            CoordinateOperation::Reversed(op) => op.precision(),
        }
    }

    fn is_identity(&self) -> bool {
        match self {
            CoordinateOperation::Identity => true,
            CoordinateOperation::LongitudeRotation(op) => op.theta == 0.0,
            CoordinateOperation::Sequence(op) => op.is_empty() || op.is_identity(),
            CoordinateOperation::Reversed(op) => op.is_identity(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips() -> Result<(), Error> {
        let op = CoordinateOperation::identity();
        let p = Point::xy(1.0, 2.0);
        assert_eq!(op.transform(&p, Direction::Fwd)?, p);
        assert!(op.is_identity());
        assert_eq!(op.precision(), 0.0);
        Ok(())
    }
}
