//! Vertical datums: the reference surface a height is measured against.

use crate::ellipsoid::Ellipsoid;
use crate::identifier::Identifier;

/// The kind of surface a [`VerticalDatum`] measures height against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDatumType {
    /// Height above the reference ellipsoid — not a physical surface.
    Ellipsoidal,
    /// Height above the geoid, via a tabulated undulation grid.
    Geoidal,
    /// Depth below a surface, positive downward.
    Depth,
    /// Height inferred from atmospheric pressure.
    Barometric,
    /// Height above mean sea level, realized by leveling rather than a grid.
    Orthometric,
}

/// A reference surface for heights, optionally tied to a geoid grid and
/// to the horizontal datum the grid's (lon, lat) lookup is expressed in.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalDatum {
    pub id: Identifier,
    pub kind: VerticalDatumType,
    pub reference_ellipsoid: Ellipsoid,
    pub geoid_grid_name: Option<String>,
    pub horizontal_datum_key: String,
}

impl VerticalDatum {
    #[must_use]
    pub fn new(
        id: Identifier,
        kind: VerticalDatumType,
        reference_ellipsoid: Ellipsoid,
        horizontal_datum_key: &str,
    ) -> VerticalDatum {
        VerticalDatum {
            id,
            kind,
            reference_ellipsoid,
            geoid_grid_name: None,
            horizontal_datum_key: horizontal_datum_key.to_string(),
        }
    }

    #[must_use]
    pub fn with_geoid_grid(mut self, grid_name: &str) -> VerticalDatum {
        self.geoid_grid_name = Some(grid_name.to_string());
        self
    }

    /// The ellipsoidal height vertical datum: no grid, height is measured
    /// directly against `reference_ellipsoid`.
    #[must_use]
    pub fn ellipsoidal(reference_ellipsoid: Ellipsoid, horizontal_datum_key: &str) -> VerticalDatum {
        VerticalDatum::new(
            Identifier::new("", "", "ellipsoidal height"),
            VerticalDatumType::Ellipsoidal,
            reference_ellipsoid,
            horizontal_datum_key,
        )
    }

    /// `IGN69`, realized over metropolitan France by the `RAF09.txt` geoid
    /// grid relative to RGF93.
    #[must_use]
    pub fn ign69() -> VerticalDatum {
        VerticalDatum::new(
            Identifier::new("EPSG", "5119", "IGN69 height"),
            VerticalDatumType::Geoidal,
            Ellipsoid::named("GRS80").unwrap_or_default(),
            "EPSG:6171",
        )
        .with_geoid_grid("RAF09.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ign69_carries_its_geoid_grid() {
        let vd = VerticalDatum::ign69();
        assert_eq!(vd.geoid_grid_name.as_deref(), Some("RAF09.txt"));
        assert_eq!(vd.kind, VerticalDatumType::Geoidal);
    }

    #[test]
    fn ellipsoidal_carries_no_grid() {
        let vd = VerticalDatum::ellipsoidal(Ellipsoid::named("GRS80").unwrap(), "EPSG:6171");
        assert!(vd.geoid_grid_name.is_none());
    }
}
