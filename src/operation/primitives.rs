//! Small, mostly-trivial pipeline stages: dimension changes, axis
//! permutation, unit conversion, rounding, and the memorize/load pair
//! used to park an ordinate across an intervening sub-pipeline.

use crate::error::Error;
use crate::point::Point;
use crate::units::Unit;
use crate::Direction;

/// Add or drop the third (height/Z) ordinate.
///
/// `TO3D` and `TO2D` are each other's inverse: appending a height and then
/// dropping it is the identity on the first two ordinates, which is what
/// lets [`crate::sequence::CoordinateOperationSequence`] cancel adjacent
/// `TO3D`/`TO2D` pairs during cleaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeCoordinateDimension {
    to3d: bool,
    default_height: f64,
}

impl ChangeCoordinateDimension {
    #[must_use]
    pub fn to3d(default_height: f64) -> ChangeCoordinateDimension {
        ChangeCoordinateDimension {
            to3d: true,
            default_height,
        }
    }

    #[must_use]
    pub fn to2d() -> ChangeCoordinateDimension {
        ChangeCoordinateDimension {
            to3d: false,
            default_height: 0.0,
        }
    }

    #[must_use]
    pub fn inverted(&self) -> ChangeCoordinateDimension {
        if self.to3d {
            ChangeCoordinateDimension::to2d()
        } else {
            ChangeCoordinateDimension::to3d(self.default_height)
        }
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let forward = matches!(direction, Direction::Fwd) == self.to3d;
        let mut out = point.clone();
        if forward {
            if out.len() < 3 {
                out.resize(2);
                out.push(self.default_height);
            }
        } else if out.len() >= 3 {
            let mut ordinates = out.ordinates().to_vec();
            ordinates.truncate(2);
            out = Point::from(ordinates);
        }
        Ok(out)
    }
}

/// Swap ordinates at indices `i` and `j` — e.g. lat/lon vs lon/lat axis order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSwitch {
    pub i: usize,
    pub j: usize,
}

impl CoordinateSwitch {
    #[must_use]
    pub fn new(i: usize, j: usize) -> CoordinateSwitch {
        CoordinateSwitch { i, j }
    }

    pub fn transform(&self, point: &Point, _direction: Direction) -> Result<Point, Error> {
        let mut out = point.clone();
        let a = out.get(self.i);
        let b = out.get(self.j);
        out.set(self.i, b);
        out.set(self.j, a);
        Ok(out)
    }
}

/// Negate the ordinate at index `i` — used for south-oriented axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OppositeCoordinate {
    pub index: usize,
}

impl OppositeCoordinate {
    #[must_use]
    pub fn new(index: usize) -> OppositeCoordinate {
        OppositeCoordinate { index }
    }

    pub fn transform(&self, point: &Point, _direction: Direction) -> Result<Point, Error> {
        let mut out = point.clone();
        out.set(self.index, -out.get(self.index));
        Ok(out)
    }
}

/// Add a constant longitude offset (radians), e.g. to change prime meridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongitudeRotation {
    pub theta: f64,
}

impl LongitudeRotation {
    #[must_use]
    pub fn new(theta: f64) -> LongitudeRotation {
        LongitudeRotation { theta }
    }

    #[must_use]
    pub fn inverted(&self) -> LongitudeRotation {
        LongitudeRotation::new(-self.theta)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let sign = match direction {
            Direction::Fwd => 1.0,
            Direction::Inv => -1.0,
        };
        let mut out = point.clone();
        out.set(0, out.get(0) + sign * self.theta);
        Ok(out)
    }
}

/// Per-ordinate unit conversion, e.g. degrees to radians on ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitConversionOp {
    source: Vec<Unit>,
    target: Vec<Unit>,
}

impl UnitConversionOp {
    pub fn new(source: Vec<Unit>, target: Vec<Unit>) -> Result<UnitConversionOp, Error> {
        if source.len() != target.len() {
            return Err(Error::InvalidParameter(
                "unit conversion source/target arity mismatch".to_string(),
            ));
        }
        Ok(UnitConversionOp { source, target })
    }

    #[must_use]
    pub fn inverted(&self) -> UnitConversionOp {
        UnitConversionOp {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let (from, to): (&[Unit], &[Unit]) = match direction {
            Direction::Fwd => (&self.source, &self.target),
            Direction::Inv => (&self.target, &self.source),
        };
        let mut out = point.clone();
        for (i, (f, t)) in from.iter().zip(to.iter()).enumerate() {
            let converted = f.convert(out.get(i), t)?;
            out.set(i, converted);
        }
        Ok(out)
    }
}

/// Round the first two ordinates to a fixed resolution. Not invertible:
/// rounding is lossy, so there is no well-defined inverse operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateRounding {
    pub resolution: f64,
}

impl CoordinateRounding {
    #[must_use]
    pub fn new(resolution: f64) -> CoordinateRounding {
        CoordinateRounding { resolution }
    }

    pub fn transform(&self, point: &Point, _direction: Direction) -> Result<Point, Error> {
        let mut out = point.clone();
        for i in 0..out.len().min(2) {
            let v = out.get(i);
            if !v.is_nan() {
                out.set(i, (v / self.resolution).round_ties_even() * self.resolution);
            }
        }
        Ok(out)
    }
}

/// Copy ordinates at `indices` onto the end of the point, for later
/// recovery by the paired `LoadMemorizeCoordinate` once an intervening
/// sub-pipeline has overwritten them — used by the planner's
/// memorize/evaluate-geoid/load pattern for vertical conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorizeCoordinate {
    pub indices: Vec<usize>,
}

impl MemorizeCoordinate {
    #[must_use]
    pub fn new(indices: Vec<usize>) -> MemorizeCoordinate {
        MemorizeCoordinate { indices }
    }

    #[must_use]
    pub fn paired_load(&self) -> LoadMemorizeCoordinate {
        LoadMemorizeCoordinate::new(self.indices.clone())
    }

    pub fn transform(&self, point: &Point, _direction: Direction) -> Result<Point, Error> {
        let mut out = point.clone();
        for &i in &self.indices {
            out.push(out.get(i));
        }
        Ok(out)
    }
}

/// Pop memorized ordinates off the end of the point and write them back
/// at `indices`, in the reverse order `MemorizeCoordinate` pushed them.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMemorizeCoordinate {
    pub indices: Vec<usize>,
}

impl LoadMemorizeCoordinate {
    #[must_use]
    pub fn new(indices: Vec<usize>) -> LoadMemorizeCoordinate {
        LoadMemorizeCoordinate { indices }
    }

    #[must_use]
    pub fn paired_memorize(&self) -> MemorizeCoordinate {
        MemorizeCoordinate::new(self.indices.clone())
    }

    pub fn transform(&self, point: &Point, _direction: Direction) -> Result<Point, Error> {
        let mut out = point.clone();
        for &i in self.indices.iter().rev() {
            let value = out.pop().ok_or_else(|| Error::IllegalCoordinate {
                reason: "no memorized ordinate to load".to_string(),
            })?;
            out.set(i, value);
        }
        Ok(out)
    }
}

/// An axis-aligned bounding box in the unit a `CheckInExtent` is inserted
/// at — typically degrees of longitude/latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Extent {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.west && x <= self.east && y >= self.south && y <= self.north
    }
}

/// Reject (or pass through) points outside a CRS's area of use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckInExtent {
    pub extent: Extent,
}

impl CheckInExtent {
    #[must_use]
    pub fn new(extent: Extent) -> CheckInExtent {
        CheckInExtent { extent }
    }

    pub fn transform(&self, point: &Point, _direction: Direction) -> Result<Point, Error> {
        if !self.extent.contains(point.get(0), point.get(1)) {
            return Err(Error::OutOfExtent {
                crs: format!(
                    "point ({}, {}) outside [{}, {}] x [{}, {}]",
                    point.get(0),
                    point.get(1),
                    self.extent.west,
                    self.extent.east,
                    self.extent.south,
                    self.extent.north
                ),
            });
        }
        Ok(point.clone())
    }
}
