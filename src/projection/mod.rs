//! Map projections: ellipsoid (or sphere) to plane.
//!
//! Each projection is a small struct holding its precomputed constants
//! (built once from the defining parameters) plus `fwd`/`inv` methods;
//! [`Projection`] is the tagged union a [`CoordinateOperation`](crate::operation::CoordinateOperation)
//! wraps one of in its `Projection` variant.

mod azimuthal;
mod conic;
mod cylindrical;
mod oblique;
mod polyconic;
mod tmerc;

pub use azimuthal::{LambertAzimuthalEqualArea, Stereographic};
pub use conic::LambertConformalConic;
pub use cylindrical::{CassiniSoldner, CylindricalEqualArea, Mercator, MillerCylindrical};
pub use oblique::HotineObliqueMercator;
pub use polyconic::Polyconic;
pub use tmerc::{GaussSchreiberTransverseMercator, TransverseMercator};

use crate::error::Error;
use crate::point::Point;
use crate::Direction;

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    TransverseMercator(TransverseMercator),
    GaussSchreiberTransverseMercator(GaussSchreiberTransverseMercator),
    LambertConformalConic(LambertConformalConic),
    Mercator(Mercator),
    HotineObliqueMercator(HotineObliqueMercator),
    Polyconic(Polyconic),
    CassiniSoldner(CassiniSoldner),
    CylindricalEqualArea(CylindricalEqualArea),
    MillerCylindrical(MillerCylindrical),
    LambertAzimuthalEqualArea(LambertAzimuthalEqualArea),
    Stereographic(Stereographic),
}

impl Projection {
    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        macro_rules! dispatch {
            ($($variant:ident),* $(,)?) => {
                match self {
                    $(Projection::$variant(p) => p.transform(point, direction),)*
                }
            };
        }
        dispatch!(
            TransverseMercator,
            GaussSchreiberTransverseMercator,
            LambertConformalConic,
            Mercator,
            HotineObliqueMercator,
            Polyconic,
            CassiniSoldner,
            CylindricalEqualArea,
            MillerCylindrical,
            LambertAzimuthalEqualArea,
            Stereographic,
        )
    }

    #[must_use]
    pub fn precision(&self) -> f64 {
        match self {
            Projection::HotineObliqueMercator(_) => 1e-8,
            _ => 0.0,
        }
    }

    pub(crate) fn plane_point(point: &Point, x: f64, y: f64) -> Point {
        let mut out = point.clone();
        out.resize(2.max(point.len()));
        out.set(0, x);
        out.set(1, y);
        out
    }
}
