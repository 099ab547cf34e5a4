//! Geoid-grid vertical datum conversion: ellipsoidal height minus the
//! interpolated geoid undulation gives orthometric height, and back.
//! Unlike the horizontal grid shifts this needs no iteration — the
//! lookup key (longitude, latitude) doesn't move between the two height
//! systems, so the inverse is just the opposite sign.

use crate::error::Error;
use crate::grid::cache::{GridCache, GridFormat};
use crate::grid::Grid;
use crate::point::Point;
use crate::Direction;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct VerticalGridTransformation {
    pub grid_name: String,
    grid: Arc<dyn Grid>,
    /// `false`: forward subtracts the undulation (ellipsoidal -> orthometric).
    /// `true`: forward adds it (orthometric -> ellipsoidal) — the inverse.
    reversed: bool,
}

impl VerticalGridTransformation {
    pub fn load(cache: &GridCache, grid_name: &str) -> Result<VerticalGridTransformation, Error> {
        let grid = cache.get(grid_name, GridFormat::Gravsoft)?;
        Ok(VerticalGridTransformation {
            grid_name: grid_name.to_string(),
            grid,
            reversed: false,
        })
    }

    #[must_use]
    pub fn inverted(&self) -> VerticalGridTransformation {
        VerticalGridTransformation {
            grid_name: self.grid_name.clone(),
            grid: self.grid.clone(),
            reversed: !self.reversed,
        }
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let effective = if self.reversed {
            direction.flipped()
        } else {
            direction
        };
        let (lon, lat) = (point.get(0), point.get(1));
        let Some(n) = self.grid.at(lon, lat, 0.0) else {
            return Err(Error::OutOfExtent {
                crs: self.grid_name.clone(),
            });
        };
        let undulation = n[0];
        let mut out = point.clone();
        out.set(
            2,
            match effective {
                Direction::Fwd => point.get(2) - undulation,
                Direction::Inv => point.get(2) + undulation,
            },
        );
        Ok(out)
    }
}

impl PartialEq for VerticalGridTransformation {
    fn eq(&self, other: &Self) -> bool {
        self.grid_name == other.grid_name && self.reversed == other.reversed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::BaseGrid;

    fn flat_geoid(undulation: f32) -> Arc<dyn Grid> {
        let header = [
            40.0f64.to_radians(),
            60.0f64.to_radians(),
            0.0f64.to_radians(),
            20.0f64.to_radians(),
            1.0f64.to_radians(),
            1.0f64.to_radians(),
            1.0,
        ];
        let rows = 21;
        let cols = 21;
        Arc::new(BaseGrid::plain(&header, vec![undulation; rows * cols]).unwrap())
    }

    #[test]
    fn forward_subtracts_undulation_and_inverse_adds_it_back() -> Result<(), Error> {
        let geoid = VerticalGridTransformation {
            grid_name: "dvr90.txt".to_string(),
            grid: flat_geoid(36.5),
            reversed: false,
        };
        let p = Point::xyz(10f64.to_radians(), 55f64.to_radians(), 100.0);
        let orthometric = geoid.transform(&p, Direction::Fwd)?;
        assert!((orthometric.get(2) - 63.5).abs() < 1e-9);

        let back = geoid.transform(&orthometric, Direction::Inv)?;
        assert!((back.get(2) - 100.0).abs() < 1e-9);

        let inverse = geoid.inverted();
        let ortho_via_inverted = inverse.transform(&p, Direction::Inv)?;
        assert!((ortho_via_inverted.get(2) - 63.5).abs() < 1e-9);
        Ok(())
    }
}
