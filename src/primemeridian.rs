//! Prime meridians: the zero-longitude reference a [`GeodeticDatum`](crate::datum::GeodeticDatum)
//! measures longitude from.

use crate::error::Error;

/// A named prime meridian, stored as its longitude east of Greenwich, in
/// degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimeMeridian {
    longitude_deg: f64,
}

#[rustfmt::skip]
const CATALOG: [(&str, f64); 14] = [
    ("greenwich",  0.0),
    ("lisbon",     -9.131906111111),
    ("paris",      2.337229166667),
    ("bogota",     -74.080916666667),
    ("madrid",     -3.687938888889),
    ("rome",       12.452333333333),
    ("bern",       7.439583333333),
    ("jakarta",    106.807719444444),
    ("ferro",      -17.666666666667),
    ("brussels",   4.367975),
    ("stockholm",  18.058277777778),
    ("athens",     23.7163375),
    ("oslo",       10.722916666667),
    ("copenhagen", 12.57788),
];

impl Default for PrimeMeridian {
    fn default() -> PrimeMeridian {
        PrimeMeridian::greenwich()
    }
}

impl PrimeMeridian {
    #[must_use]
    pub fn greenwich() -> PrimeMeridian {
        PrimeMeridian { longitude_deg: 0.0 }
    }

    /// The prime meridian used by NTF/Lambert (Clarke 1880 IGN), 2°20'14.025" east of Greenwich.
    #[must_use]
    pub fn paris() -> PrimeMeridian {
        PrimeMeridian {
            longitude_deg: 2.337229166667,
        }
    }

    #[must_use]
    pub fn from_degrees(longitude_deg: f64) -> PrimeMeridian {
        PrimeMeridian { longitude_deg }
    }

    pub fn named(name: &str) -> Result<PrimeMeridian, Error> {
        CATALOG
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, deg)| PrimeMeridian::from_degrees(*deg))
            .ok_or_else(|| Error::InvalidParameter(format!("unknown prime meridian '{name}'")))
    }

    #[must_use]
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude_deg
    }

    #[must_use]
    pub fn longitude_radians(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    #[must_use]
    pub fn is_greenwich(&self) -> bool {
        self.longitude_deg == 0.0
    }

    /// Rotate a longitude (radians, relative to `self`) onto a Greenwich
    /// reference, or vice versa for [`Direction::Inv`](crate::Direction).
    #[must_use]
    pub fn to_greenwich(&self, longitude: f64, direction: crate::Direction) -> f64 {
        use crate::Direction::{Fwd, Inv};
        match direction {
            Fwd => longitude + self.longitude_radians(),
            Inv => longitude - self.longitude_radians(),
        }
    }
}
