//! Coordinate reference systems: the axis/unit/datum package a
//! [`Planner`](crate::planner::Planner) matches a source to a target
//! through.
//!
//! Every variant exposes [`Crs::to_geographic`]/[`Crs::from_geographic`] —
//! the universal mating surface the planner threads a datum transformation
//! through, regardless of which CRS family either end belongs to. A
//! Lambert-93 projected CRS and a geocentric ECEF CRS both know how to get
//! to "geographic on my own datum"; the planner only ever needs to ask
//! each end of a route for that one thing plus the datum it lands on.

use crate::datum::{GeodeticDatum, VerticalDatum};
use crate::error::Error;
use crate::identifier::Identifier;
use crate::operation::geocentric::Geocentric2Geographic;
use crate::operation::primitives::{Extent, LongitudeRotation};
use crate::operation::{CoordinateOperation, OperationCapability};
use crate::projection::Projection;
use crate::sequence::CoordinateOperationSequence;

/// A coordinate reference system.
#[derive(Debug, Clone, PartialEq)]
pub enum Crs {
    /// Earth-centered, Earth-fixed cartesian (X, Y, Z), meters.
    Geocentric { id: Identifier, datum: GeodeticDatum },
    /// (lon, lat), radians, no height ordinate.
    Geographic2D { id: Identifier, datum: GeodeticDatum },
    /// (lon, lat, height), radians and meters.
    Geographic3D { id: Identifier, datum: GeodeticDatum },
    /// A map projection's plane coordinates, over a [`Geographic2D`](Crs::Geographic2D)
    /// or [`Geographic3D`](Crs::Geographic3D) base on `datum`.
    Projected {
        id: Identifier,
        datum: GeodeticDatum,
        projection: Projection,
    },
    /// A height-only CRS: orthometric, ellipsoidal, depth, or barometric.
    Vertical { id: Identifier, datum: VerticalDatum },
    /// A horizontal CRS paired with an independent vertical CRS, e.g.
    /// "RGF93 / Lambert-93 + IGN69 height".
    Compound {
        id: Identifier,
        horizontal: Box<Crs>,
        vertical: Box<Crs>,
    },
}

impl Crs {
    #[must_use]
    pub fn id(&self) -> &Identifier {
        match self {
            Crs::Geocentric { id, .. }
            | Crs::Geographic2D { id, .. }
            | Crs::Geographic3D { id, .. }
            | Crs::Projected { id, .. }
            | Crs::Vertical { id, .. }
            | Crs::Compound { id, .. } => id,
        }
    }

    /// The horizontal datum underlying this CRS, if it has one — `None`
    /// for a standalone [`Vertical`](Crs::Vertical) CRS.
    #[must_use]
    pub fn datum(&self) -> Option<&GeodeticDatum> {
        match self {
            Crs::Geocentric { datum, .. }
            | Crs::Geographic2D { datum, .. }
            | Crs::Geographic3D { datum, .. }
            | Crs::Projected { datum, .. } => Some(datum),
            Crs::Vertical { .. } => None,
            Crs::Compound { horizontal, .. } => horizontal.datum(),
        }
    }

    #[must_use]
    pub fn vertical_datum(&self) -> Option<&VerticalDatum> {
        match self {
            Crs::Vertical { datum, .. } => Some(datum),
            Crs::Compound { vertical, .. } => vertical.vertical_datum(),
            _ => None,
        }
    }

    /// `true` for CRS families that carry a height/Z ordinate natively.
    #[must_use]
    pub fn is_3d(&self) -> bool {
        matches!(
            self,
            Crs::Geocentric { .. } | Crs::Geographic3D { .. } | Crs::Compound { .. }
        )
    }

    #[must_use]
    pub fn extent(&self) -> Option<Extent> {
        self.datum().map(|d| d.extent)
    }

    /// The operation from this CRS's own native coordinates to geographic
    /// coordinates (lon, lat[, h], radians/meters, Greenwich meridian) on
    /// this CRS's own horizontal datum. A [`Vertical`](Crs::Vertical) CRS
    /// has no horizontal representation to offer and errors.
    pub fn to_geographic(&self) -> Result<CoordinateOperation, Error> {
        match self {
            Crs::Geographic2D { datum, .. } | Crs::Geographic3D { datum, .. } => {
                Ok(meridian_rotation(datum))
            }
            Crs::Geocentric { datum, .. } => {
                let to_geographic =
                    CoordinateOperation::Geocentric2Geographic(Geocentric2Geographic::new(datum.ellipsoid));
                Ok(CoordinateOperation::Sequence(CoordinateOperationSequence::new(vec![
                    to_geographic,
                    meridian_rotation(datum),
                ])))
            }
            Crs::Projected { datum, projection, .. } => {
                let unproject =
                    CoordinateOperation::Reversed(Box::new(CoordinateOperation::Projection(projection.clone())));
                Ok(CoordinateOperation::Sequence(CoordinateOperationSequence::new(vec![
                    unproject,
                    meridian_rotation(datum),
                ])))
            }
            Crs::Vertical { .. } => Err(Error::Unsupported(
                "a vertical CRS has no horizontal geographic representation".to_string(),
            )),
            Crs::Compound { horizontal, .. } => horizontal.to_geographic(),
        }
    }

    /// The algebraic inverse of [`to_geographic`](Self::to_geographic):
    /// geographic coordinates on this CRS's datum to this CRS's own native
    /// coordinates.
    pub fn from_geographic(&self) -> Result<CoordinateOperation, Error> {
        self.to_geographic()?.inverse()
    }
}

fn meridian_rotation(datum: &GeodeticDatum) -> CoordinateOperation {
    if datum.prime_meridian.is_greenwich() {
        CoordinateOperation::Identity
    } else {
        CoordinateOperation::LongitudeRotation(LongitudeRotation::new(
            datum.prime_meridian.longitude_radians(),
        ))
    }
}
