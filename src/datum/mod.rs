//! Geodetic datums and the registry of known transformations between them.
//!
//! A datum owns its ellipsoid, prime meridian, and area of use, but not
//! the transformations to other datums: storing `A: Datum { to_b: Rc<Transformation> }`
//! next to `Transformation { to_a: Rc<Datum> }` builds an ownership cycle the
//! moment two datums reference each other, which happens for every pair with
//! a registered shift. [`DatumTransformationRegistry`] holds that edge set
//! instead, keyed by `(source_id, target_id)` pairs, external to both datums.

pub mod vertical;

use crate::ellipsoid::Ellipsoid;
use crate::identifier::Identifier;
use crate::operation::primitives::Extent;
use crate::operation::{CoordinateOperation, OperationCapability};
use crate::primemeridian::PrimeMeridian;
use std::collections::HashMap;

pub use vertical::{VerticalDatum, VerticalDatumType};

/// Ellipsoid + prime meridian + area of use. Transformations to other
/// datums live in a side [`DatumTransformationRegistry`], not here.
///
/// Equality is structural, over `(ellipsoid, prime_meridian)` only — `id`
/// is informational provenance, per the convention set in
/// [`crate::identifier`], and `extent` is advisory metadata about where a
/// datum is valid rather than part of what makes it the datum it is.
#[derive(Debug, Clone)]
pub struct GeodeticDatum {
    pub id: Identifier,
    pub ellipsoid: Ellipsoid,
    pub prime_meridian: PrimeMeridian,
    pub extent: Extent,
}

impl PartialEq for GeodeticDatum {
    fn eq(&self, other: &GeodeticDatum) -> bool {
        self.ellipsoid == other.ellipsoid && self.prime_meridian == other.prime_meridian
    }
}

impl GeodeticDatum {
    #[must_use]
    pub fn new(
        id: Identifier,
        ellipsoid: Ellipsoid,
        prime_meridian: PrimeMeridian,
        extent: Extent,
    ) -> GeodeticDatum {
        GeodeticDatum {
            id,
            ellipsoid,
            prime_meridian,
            extent,
        }
    }

    /// The key a [`DatumTransformationRegistry`] indexes this datum by.
    #[must_use]
    pub fn key(&self) -> String {
        self.id.urn()
    }

    /// `WGS84`, the geodetic reference used as the planner's hub datum
    /// when no direct transformation is registered between two others.
    #[must_use]
    pub fn wgs84() -> GeodeticDatum {
        GeodeticDatum::new(
            Identifier::new("EPSG", "6326", "World Geodetic System 1984"),
            Ellipsoid::named("WGS84").unwrap_or_default(),
            PrimeMeridian::greenwich(),
            Extent {
                west: -180.0,
                south: -90.0,
                east: 180.0,
                north: 90.0,
            },
        )
    }

    /// `RGF93`, geometrically coincident with WGS84/GRS80 for transformation
    /// purposes (the IGN realization used by Lambert-93 and CC projections).
    #[must_use]
    pub fn rgf93() -> GeodeticDatum {
        GeodeticDatum::new(
            Identifier::new("EPSG", "6171", "Reseau Geodesique Francais 1993"),
            Ellipsoid::named("GRS80").unwrap_or_default(),
            PrimeMeridian::greenwich(),
            Extent {
                west: -9.86,
                south: 41.15,
                east: 10.38,
                north: 51.56,
            },
        )
    }

    /// `NTF`, the pre-RGF93 French datum (Lambert zones I-IV, Lambert II
    /// étendu), referenced from the Paris meridian.
    #[must_use]
    pub fn ntf() -> GeodeticDatum {
        GeodeticDatum::new(
            Identifier::new("EPSG", "6275", "Nouvelle Triangulation Francaise"),
            Ellipsoid::named("clrk80ign").unwrap_or_default(),
            PrimeMeridian::greenwich(),
            Extent {
                west: -4.87,
                south: 42.33,
                east: 8.23,
                north: 51.14,
            },
        )
    }

    /// `NTF (Paris)`: the same datum as [`ntf`](Self::ntf) but with
    /// longitudes measured from the Paris meridian rather than Greenwich —
    /// the convention most historical Lambert-zone coordinates are quoted in.
    #[must_use]
    pub fn ntf_paris() -> GeodeticDatum {
        GeodeticDatum::new(
            Identifier::new("EPSG", "6807", "Nouvelle Triangulation Francaise (Paris)"),
            Ellipsoid::named("clrk80ign").unwrap_or_default(),
            PrimeMeridian::paris(),
            GeodeticDatum::ntf().extent,
        )
    }

    /// `true` for any datum whose `toOther(WGS84)` is implicitly the
    /// identity: Greenwich meridian, and an ellipsoid PROJ and EPSG both
    /// treat as WGS84-equivalent. Used by the planner to widen the pool of
    /// candidate datum transformations via a WGS84 hub.
    #[must_use]
    pub fn is_wgs84_equivalent(&self) -> bool {
        self.prime_meridian.is_greenwich()
            && (self.ellipsoid.approx_eq(&Ellipsoid::named("WGS84").unwrap_or_default())
                || self.ellipsoid.approx_eq(&Ellipsoid::named("GRS80").unwrap_or_default()))
    }
}

/// Transformations between datums, keyed by `(source, target)` datum
/// identifiers, registered symmetrically: adding `A -> B` also exposes
/// `B -> A` as the algebraic inverse.
#[derive(Debug, Default)]
pub struct DatumTransformationRegistry {
    routes: HashMap<(String, String), Vec<CoordinateOperation>>,
}

impl DatumTransformationRegistry {
    #[must_use]
    pub fn new() -> DatumTransformationRegistry {
        DatumTransformationRegistry::default()
    }

    /// Register `op` as a `source -> target` datum transformation. Also
    /// registers `op.inverse()` as `target -> source` when invertible; a
    /// non-invertible op (shouldn't normally arise for datum shifts) is
    /// still registered one-way, with a warning.
    pub fn register(
        &mut self,
        source: &GeodeticDatum,
        target: &GeodeticDatum,
        op: CoordinateOperation,
    ) {
        let forward_key = (source.key(), target.key());
        match op.inverse() {
            Ok(reverse) => {
                self.routes.entry((target.key(), source.key())).or_default().push(reverse);
            }
            Err(_) => {
                log::warn!(
                    "datum transformation {} -> {} has no inverse; registering one-way only",
                    source.key(),
                    target.key()
                );
            }
        }
        self.routes.entry(forward_key).or_default().push(op);
    }

    /// All known `source -> target` routes, empty if none are registered.
    #[must_use]
    pub fn get(&self, source: &GeodeticDatum, target: &GeodeticDatum) -> Vec<CoordinateOperation> {
        self.routes
            .get(&(source.key(), target.key()))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::sevenparam::GeocentricTranslation;
    use crate::transform::DatumTransformation;

    #[test]
    fn registration_is_symmetric() {
        let mut registry = DatumTransformationRegistry::new();
        let ntf = GeodeticDatum::ntf();
        let rgf93 = GeodeticDatum::rgf93();
        let op = CoordinateOperation::Datum(DatumTransformation::GeocentricTranslation(
            GeocentricTranslation::new(-168.0, -60.0, 320.0),
        ));
        registry.register(&ntf, &rgf93, op);

        assert_eq!(registry.get(&ntf, &rgf93).len(), 1);
        assert_eq!(registry.get(&rgf93, &ntf).len(), 1);
        assert!(registry.get(&rgf93, &GeodeticDatum::wgs84()).is_empty());
    }

    #[test]
    fn wgs84_and_rgf93_are_wgs84_equivalent() {
        assert!(GeodeticDatum::wgs84().is_wgs84_equivalent());
        assert!(GeodeticDatum::rgf93().is_wgs84_equivalent());
        assert!(!GeodeticDatum::ntf().is_wgs84_equivalent());
    }
}
