//! The seam a CRS registry (EPSG, IGNF, or a hand-rolled proj.4/WKT
//! parser) plugs into. Parsing authority:code lookups or WKT text into a
//! hydrated [`Crs`] is out of scope for this crate — [`CRSHelper`] is the
//! contract a registry implements to hand the core fully-built CRS values,
//! and [`create_coordinate_operations`] is the single entry point the core
//! exposes back.

use crate::crs::Crs;
use crate::datum::DatumTransformationRegistry;
use crate::error::Error;
use crate::grid::cache::GridCache;
use crate::operation::CoordinateOperation;
use std::collections::HashMap;

/// proj-style parameter names to stringified values, e.g.
/// `{"proj": "lcc", "lat_0": "46.5", "lat_1": "44", ...}`.
pub type ParamMap = HashMap<String, String>;

/// A registry's side of the contract: given an authority code and its
/// already-parsed parameter map, build the [`Crs`] it describes.
///
/// This crate never implements `CRSHelper` itself — the WKT/proj.4/EPSG
/// text parsers that produce a [`ParamMap`] are out of scope, per the
/// purpose-and-scope boundary this engine draws around itself.
pub trait CRSHelper {
    fn build_crs(&self, authority: &str, code: &str, params: &ParamMap) -> Result<Crs, Error>;
}

/// The planner's public entry point, as called by a registry once it has
/// hydrated both ends of a route into concrete [`Crs`] values.
pub fn create_coordinate_operations(
    source: &Crs,
    target: &Crs,
    registry: &DatumTransformationRegistry,
) -> Result<Vec<CoordinateOperation>, Error> {
    crate::planner::Planner::new(registry).plan(source, target)
}

/// As [`create_coordinate_operations`], but with a grid cache attached so
/// routes between two [`Crs::Compound`] values with different vertical
/// datums can load the geoid grid they need.
pub fn create_coordinate_operations_with_grids(
    source: &Crs,
    target: &Crs,
    registry: &DatumTransformationRegistry,
    grid_cache: &GridCache,
) -> Result<Vec<CoordinateOperation>, Error> {
    crate::planner::Planner::new(registry)
        .with_grid_cache(grid_cache)
        .plan(source, target)
}
