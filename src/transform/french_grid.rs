//! The French national grid-shift transformation (IGN `gr3df97a.txt`):
//! a geocentric translation whose (dX, dY, dZ) vary by position, looked
//! up by the NTF geographic coordinate rather than applied uniformly
//! like [`GeocentricTranslation`](super::sevenparam::GeocentricTranslation).
//!
//! Unlike NTv2 this shifts a 3D geocentric vector, so the point is
//! round-tripped through geographic-to-geocentric conversion on the
//! source ellipsoid and back out on the target ellipsoid.

use crate::ellipsoid::Ellipsoid;
use crate::error::Error;
use crate::grid::cache::{GridCache, GridFormat};
use crate::grid::Grid;
use crate::operation::iterative::IterativeTransformation;
use crate::operation::CoordinateOperation;
use crate::point::Point;
use crate::Direction;
use std::sync::Arc;

const EPS: f64 = 1e-10;
const MAX_ITERATIONS: usize = 10;

#[derive(Debug, Clone)]
pub struct FrenchGeocentricGrid {
    pub grid_name: String,
    pub source: Ellipsoid,
    pub target: Ellipsoid,
    grid: Arc<dyn Grid>,
}

impl FrenchGeocentricGrid {
    pub fn load(
        cache: &GridCache,
        grid_name: &str,
        source: Ellipsoid,
        target: Ellipsoid,
    ) -> Result<FrenchGeocentricGrid, Error> {
        let grid = cache.get(grid_name, GridFormat::Gravsoft)?;
        if grid.bands() != 3 {
            return Err(Error::InvalidGridFile {
                reason: format!("'{grid_name}' does not carry 3 geocentric shift bands"),
            });
        }
        Ok(FrenchGeocentricGrid {
            grid_name: grid_name.to_string(),
            source,
            target,
            grid,
        })
    }

    fn forward(&self, point: &Point) -> Result<Point, Error> {
        let (lon, lat, h) = (point.get(0), point.get(1), point.get(2));
        let Some(shift) = self.grid.at(lon, lat, 0.0) else {
            return Err(Error::OutOfExtent {
                crs: self.grid_name.clone(),
            });
        };
        let (x, y, z) = self.source.geographic_to_geocentric(lon, lat, h);
        let (lon2, lat2, h2) = self
            .target
            .geocentric_to_geographic(x + shift[0], y + shift[1], z + shift[2]);

        let mut out = point.clone();
        out.set(0, lon2);
        out.set(1, lat2);
        out.set(2, h2);
        Ok(out)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        match direction {
            Direction::Fwd => self.forward(point),
            Direction::Inv => self.iterative()?.transform(point, Direction::Fwd),
        }
    }

    fn iterative(&self) -> Result<IterativeTransformation, Error> {
        let inner = CoordinateOperation::Datum(
            crate::transform::DatumTransformation::FrenchGeocentricGrid(self.clone()),
        );
        IterativeTransformation::new(
            inner,
            vec![0, 1, 2],
            vec![0, 1, 2],
            vec![EPS, EPS, 1e-4],
        )
        .map(|it| it.with_max_iterations(MAX_ITERATIONS))
    }

    pub fn inverse(&self) -> Result<CoordinateOperation, Error> {
        Ok(CoordinateOperation::Iterative(Box::new(self.iterative()?)))
    }

    pub fn precision(&self) -> f64 {
        0.01
    }
}

impl PartialEq for FrenchGeocentricGrid {
    fn eq(&self, other: &Self) -> bool {
        self.grid_name == other.grid_name && self.source == other.source && self.target == other.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BaseGrid;

    fn flat_shift_grid() -> Arc<dyn Grid> {
        let header = [
            40.0f64.to_radians(),
            51.0f64.to_radians(),
            -5.0f64.to_radians(),
            10.0f64.to_radians(),
            1.0f64.to_radians(),
            1.0f64.to_radians(),
            3.0,
        ];
        let rows = 12;
        let cols = 16;
        let grid: Vec<f32> = std::iter::repeat([-168.0f32, -60.0f32, 320.0f32])
            .take(rows * cols)
            .flatten()
            .collect();
        Arc::new(BaseGrid::plain(&header, grid).unwrap())
    }

    #[test]
    fn forward_and_inverse_round_trip() -> Result<(), Error> {
        let ntf = Ellipsoid::named("clrk80ign")?;
        let rgf93 = Ellipsoid::named("GRS80")?;
        let grid = FrenchGeocentricGrid {
            grid_name: "gr3df97a.txt".to_string(),
            source: ntf,
            target: rgf93,
            grid: flat_shift_grid(),
        };
        let source = Point::xyz(2.0f64.to_radians(), 48.0f64.to_radians(), 100.0);
        let target = grid.transform(&source, Direction::Fwd)?;
        let back = grid.transform(&target, Direction::Inv)?;
        assert!((back.get(0) - source.get(0)).abs() < 1e-8);
        assert!((back.get(1) - source.get(1)).abs() < 1e-8);
        Ok(())
    }
}
