//! NTv2 (`.gsb`) binary grid-shift datum transformation: looks up a
//! latitude/longitude correction at the point's own position and adds it.
//! There is no algebraic inverse — a target-datum point doesn't carry
//! enough information to know which source-datum cell it came from — so
//! the reverse direction is solved with
//! [`IterativeTransformation`](crate::operation::iterative::IterativeTransformation).

use crate::error::Error;
use crate::grid::cache::{GridCache, GridFormat};
use crate::grid::Grid;
use crate::operation::iterative::IterativeTransformation;
use crate::operation::CoordinateOperation;
use crate::point::Point;
use crate::Direction;
use std::sync::Arc;

const EPS: f64 = 1e-11;
const MAX_ITERATIONS: usize = 10;

#[derive(Debug, Clone)]
pub struct Ntv2Transformation {
    pub grid_name: String,
    grid: Arc<dyn Grid>,
}

impl Ntv2Transformation {
    pub fn load(cache: &GridCache, grid_name: &str) -> Result<Ntv2Transformation, Error> {
        let grid = cache.get(grid_name, GridFormat::Ntv2)?;
        Ok(Ntv2Transformation {
            grid_name: grid_name.to_string(),
            grid,
        })
    }

    fn forward(&self, point: &Point) -> Result<Point, Error> {
        let (lon, lat) = (point.get(0), point.get(1));
        let Some(shift) = self.grid.at(lon, lat, 0.0) else {
            return Err(Error::OutOfExtent {
                crs: self.grid_name.clone(),
            });
        };
        let mut out = point.clone();
        out.set(1, lat + shift[0]);
        out.set(0, lon + shift[1]);
        Ok(out)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        match direction {
            Direction::Fwd => self.forward(point),
            Direction::Inv => self.iterative()?.transform(point, Direction::Fwd),
        }
    }

    fn iterative(&self) -> Result<IterativeTransformation, Error> {
        let inner = CoordinateOperation::Datum(crate::transform::DatumTransformation::Ntv2(
            self.clone(),
        ));
        IterativeTransformation::new(inner, vec![0, 1], vec![0, 1], vec![EPS, EPS])
            .map(|it| it.with_max_iterations(MAX_ITERATIONS))
    }

    pub fn inverse(&self) -> Result<CoordinateOperation, Error> {
        Ok(CoordinateOperation::Iterative(Box::new(self.iterative()?)))
    }

    pub fn precision(&self) -> f64 {
        1e-7
    }
}

impl PartialEq for Ntv2Transformation {
    fn eq(&self, other: &Self) -> bool {
        self.grid_name == other.grid_name
    }
}
