#![doc = include_str!("../README.md")]

//! Builds pipelines of primitive coordinate operations between arbitrary
//! source and target coordinate reference systems, and ranks candidate
//! pipelines by precision.

pub mod error;
pub use error::Error;

/// `Fwd`: run a two-way operation in the *forward* direction.
/// `Inv`: run a two-way operation in the *inverse* direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Fwd,
    Inv,
}

impl Direction {
    #[must_use]
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Fwd => Direction::Inv,
            Direction::Inv => Direction::Fwd,
        }
    }
}

pub mod crs;
pub mod datum;
pub mod ellipsoid;
pub mod grid;
pub mod identifier;
pub mod math;
pub mod operation;
pub mod planner;
pub mod point;
pub mod primemeridian;
pub mod projection;
pub mod registry;
pub mod sequence;
pub mod transform;
pub mod units;

/// The bread-and-butter, shrink-wrapped and ready to use.
pub mod prelude {
    pub use crate::crs::Crs;
    pub use crate::datum::{GeodeticDatum, VerticalDatum};
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::error::Error;
    pub use crate::operation::CoordinateOperation;
    pub use crate::planner::Planner;
    pub use crate::point::Point;
    pub use crate::primemeridian::PrimeMeridian;
    pub use crate::units::Unit;
    pub use crate::Direction;
}

/// Extended prelude for authoring new coordinate operations and projections.
pub mod authoring {
    pub use crate::error::Error;
    pub use crate::math::ancillary;
    pub use crate::math::series::taylor;
    pub use crate::operation::{CoordinateOperation, OperationCapability};
    pub use crate::prelude::*;
    pub use crate::Direction;

    pub use log::{debug, error, info, trace, warn};
}
