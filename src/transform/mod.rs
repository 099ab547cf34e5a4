//! Datum transformations: the operations that change which reference
//! frame a coordinate is expressed in, as opposed to which map
//! projection or unit system. Like [`Projection`](crate::projection::Projection),
//! realized as a tagged enum rather than a trait object.

pub mod french_grid;
pub mod ntv2;
pub mod sevenparam;
pub mod vertical_grid;

use crate::error::Error;
use crate::operation::CoordinateOperation;
use crate::point::Point;
use crate::Direction;
use french_grid::FrenchGeocentricGrid;
use ntv2::Ntv2Transformation;
use sevenparam::{GeocentricTranslation, SevenParameterTransformation};
use vertical_grid::VerticalGridTransformation;

/// Which ordinate space a [`DatumTransformation`] expects its input point
/// to already be expressed in, so the planner knows whether to sandwich it
/// between `Geographic2Geocentric`/`Geocentric2Geographic` conversions or
/// insert it directly between two geographic mating surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSpace {
    /// (X, Y, Z) earth-centered cartesian, meters.
    Geocentric,
    /// (lon, lat[, h]), radians and meters — the grid-based transforms
    /// convert to/from geocentric internally where they need to.
    Geographic,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatumTransformation {
    GeocentricTranslation(GeocentricTranslation),
    SevenParameter(SevenParameterTransformation),
    Ntv2(Ntv2Transformation),
    FrenchGeocentricGrid(FrenchGeocentricGrid),
    VerticalGrid(VerticalGridTransformation),
}

impl DatumTransformation {
    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        match self {
            DatumTransformation::GeocentricTranslation(op) => op.transform(point, direction),
            DatumTransformation::SevenParameter(op) => op.transform(point, direction),
            DatumTransformation::Ntv2(op) => op.transform(point, direction),
            DatumTransformation::FrenchGeocentricGrid(op) => op.transform(point, direction),
            DatumTransformation::VerticalGrid(op) => op.transform(point, direction),
        }
    }

    pub fn inverse(&self) -> Result<CoordinateOperation, Error> {
        match self {
            DatumTransformation::GeocentricTranslation(op) => Ok(CoordinateOperation::Datum(
                DatumTransformation::GeocentricTranslation(op.inverted()),
            )),
            DatumTransformation::SevenParameter(op) => Ok(CoordinateOperation::Datum(
                DatumTransformation::SevenParameter(op.inverted()),
            )),
            DatumTransformation::Ntv2(op) => op.inverse(),
            DatumTransformation::FrenchGeocentricGrid(op) => op.inverse(),
            DatumTransformation::VerticalGrid(op) => Ok(CoordinateOperation::Datum(
                DatumTransformation::VerticalGrid(op.inverted()),
            )),
        }
    }

    pub fn precision(&self) -> f64 {
        match self {
            DatumTransformation::GeocentricTranslation(_) => 0.01,
            DatumTransformation::SevenParameter(_) => 0.01,
            DatumTransformation::Ntv2(op) => op.precision(),
            DatumTransformation::FrenchGeocentricGrid(op) => op.precision(),
            DatumTransformation::VerticalGrid(_) => 0.01,
        }
    }

    #[must_use]
    pub fn point_space(&self) -> PointSpace {
        match self {
            DatumTransformation::GeocentricTranslation(_) | DatumTransformation::SevenParameter(_) => {
                PointSpace::Geocentric
            }
            DatumTransformation::Ntv2(_)
            | DatumTransformation::FrenchGeocentricGrid(_)
            | DatumTransformation::VerticalGrid(_) => PointSpace::Geographic,
        }
    }

    /// `true` for the transformations that carry a height/Z ordinate
    /// through unchanged rather than consuming a 2D point.
    #[must_use]
    pub fn is_3d(&self) -> bool {
        matches!(
            self,
            DatumTransformation::GeocentricTranslation(_)
                | DatumTransformation::SevenParameter(_)
                | DatumTransformation::FrenchGeocentricGrid(_)
        )
    }
}
