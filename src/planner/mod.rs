//! Assembles candidate [`CoordinateOperation`] chains between two CRSs.
//!
//! A [`Planner`] borrows a [`DatumTransformationRegistry`](crate::datum::DatumTransformationRegistry)
//! rather than owning one — the registry is logically write-once at
//! startup, per the concurrency model, so many planners (one per
//! transform call, one per thread, whatever the caller prefers) can
//! share the same registry behind a shared reference.

use crate::crs::Crs;
use crate::datum::DatumTransformationRegistry;
use crate::error::Error;
use crate::grid::cache::GridCache;
use crate::operation::geocentric::{Geocentric2Geographic, Geographic2Geocentric};
use crate::operation::primitives::ChangeCoordinateDimension;
use crate::operation::{CoordinateOperation, OperationCapability};
use crate::sequence::CoordinateOperationSequence;
use crate::transform::vertical_grid::VerticalGridTransformation;
use crate::transform::{DatumTransformation, PointSpace};

pub struct Planner<'a> {
    registry: &'a DatumTransformationRegistry,
    grid_cache: Option<&'a GridCache>,
}

impl<'a> Planner<'a> {
    #[must_use]
    pub fn new(registry: &'a DatumTransformationRegistry) -> Planner<'a> {
        Planner {
            registry,
            grid_cache: None,
        }
    }

    /// Attaches a grid cache so [`Crs::Compound`] routes that need a
    /// geoid grid to convert between orthometric and ellipsoidal height
    /// can load one. Without it, such routes fail with
    /// [`Error::Unsupported`].
    #[must_use]
    pub fn with_grid_cache(mut self, cache: &'a GridCache) -> Planner<'a> {
        self.grid_cache = Some(cache);
        self
    }

    /// Every candidate chain from `source` to `target`, one per distinct
    /// datum-shift route. Empty input never happens: failure to find any
    /// route is reported as [`Error::CoordinateOperationNotFound`].
    pub fn plan(&self, source: &Crs, target: &Crs) -> Result<Vec<CoordinateOperation>, Error> {
        if let (Crs::Compound { .. }, _) | (_, Crs::Compound { .. }) = (source, target) {
            return self.plan_compound(source, target);
        }
        self.plan_horizontal(source, target)
    }

    fn plan_horizontal(&self, source: &Crs, target: &Crs) -> Result<Vec<CoordinateOperation>, Error> {
        let sd = source
            .datum()
            .ok_or_else(|| Error::Unsupported("source CRS has no horizontal datum to route through".to_string()))?;
        let td = target
            .datum()
            .ok_or_else(|| Error::Unsupported("target CRS has no horizontal datum to route through".to_string()))?;

        if sd == td {
            log::debug!("same-datum fast path: {} -> {}", sd.key(), td.key());
            let steps = vec![source.to_geographic()?, target.from_geographic()?];
            return Ok(vec![CoordinateOperation::Sequence(CoordinateOperationSequence::new(
                steps,
            ))]);
        }

        let mut datum_ops = self.registry.get(sd, td);
        if sd.is_wgs84_equivalent() {
            datum_ops.extend(self.registry.get(&crate::datum::GeodeticDatum::wgs84(), td));
        }
        if td.is_wgs84_equivalent() {
            datum_ops.extend(self.registry.get(sd, &crate::datum::GeodeticDatum::wgs84()));
        }

        if datum_ops.is_empty() {
            return Err(Error::CoordinateOperationNotFound {
                source_datum: sd.key(),
                target_datum: td.key(),
            });
        }

        // A 3D route narrows to its single most-precise datum op; a 2D
        // route keeps every candidate for the caller to rank or filter.
        if source.is_3d() || target.is_3d() {
            let best = datum_ops
                .iter()
                .filter(|op| matches!(op, CoordinateOperation::Datum(_)))
                .min_by(|a, b| a.precision().partial_cmp(&b.precision()).unwrap_or(std::cmp::Ordering::Equal))
                .cloned();
            datum_ops = best.into_iter().collect();
        }

        let mut candidates = Vec::with_capacity(datum_ops.len());
        for op in datum_ops {
            let CoordinateOperation::Datum(dt) = &op else {
                log::trace!("skipping non-datum candidate found in registry entry");
                continue;
            };
            match self.assemble(source, target, dt) {
                Ok(chain) => candidates.push(chain),
                Err(err) => log::warn!("dropping candidate route: {err}"),
            }
        }

        if candidates.is_empty() {
            return Err(Error::CoordinateOperationNotFound {
                source_datum: sd.key(),
                target_datum: td.key(),
            });
        }
        Ok(candidates)
    }

    /// `source.toGeographic() -> [pad] -> [geocentric conversion] -> dt ->
    /// [geocentric conversion] -> [unpad] -> target.fromGeographic()`.
    /// Padding to 3D only happens on a side that isn't already 3D, and
    /// only when `dt` needs a height ordinate to operate.
    fn assemble(
        &self,
        source: &Crs,
        target: &Crs,
        dt: &DatumTransformation,
    ) -> Result<CoordinateOperation, Error> {
        let sd = source.datum().expect("checked by caller");
        let td = target.datum().expect("checked by caller");

        let mut steps = vec![source.to_geographic()?];

        let pad_source = dt.is_3d() && !source.is_3d();
        let pad_target = dt.is_3d() && !target.is_3d();
        if pad_source {
            steps.push(CoordinateOperation::ChangeDimension(ChangeCoordinateDimension::to3d(
                0.0,
            )));
        }

        match dt.point_space() {
            PointSpace::Geocentric => {
                steps.push(CoordinateOperation::Geographic2Geocentric(Geographic2Geocentric::new(
                    sd.ellipsoid,
                )));
                steps.push(CoordinateOperation::Datum(dt.clone()));
                steps.push(CoordinateOperation::Geocentric2Geographic(Geocentric2Geographic::new(
                    td.ellipsoid,
                )));
            }
            PointSpace::Geographic => {
                steps.push(CoordinateOperation::Datum(dt.clone()));
            }
        }

        if pad_target {
            steps.push(CoordinateOperation::ChangeDimension(ChangeCoordinateDimension::to2d()));
        }
        steps.push(target.from_geographic()?);

        Ok(CoordinateOperation::Sequence(CoordinateOperationSequence::new(steps)))
    }

    /// Splits a [`Crs::Compound`] into horizontal and vertical components,
    /// plans the horizontal route as usual, and interleaves a
    /// memorize/evaluate-geoid/load sandwich around it so the vertical
    /// ordinate survives the trip.
    fn plan_compound(&self, source: &Crs, target: &Crs) -> Result<Vec<CoordinateOperation>, Error> {
        let source_horizontal = horizontal_of(source);
        let target_horizontal = horizontal_of(target);

        let horizontal_candidates = self.plan_horizontal(source_horizontal, target_horizontal)?;

        let source_vertical = vertical_of(source);
        let target_vertical = vertical_of(target);

        let mut chains = Vec::with_capacity(horizontal_candidates.len());
        for horizontal in horizontal_candidates {
            chains.push(self.splice_vertical(horizontal, source_vertical, target_vertical)?);
        }
        Ok(chains)
    }

    /// Converts the source height to ellipsoidal (if its vertical datum is
    /// geoidal), runs the horizontal route, then converts from ellipsoidal
    /// to the target vertical datum (if that one is geoidal too). A pass
    /// with no geoid grid on either side, or identical vertical datums, is
    /// returned unchanged.
    fn splice_vertical(
        &self,
        horizontal: CoordinateOperation,
        source_vertical: Option<&crate::datum::VerticalDatum>,
        target_vertical: Option<&crate::datum::VerticalDatum>,
    ) -> Result<CoordinateOperation, Error> {
        let (Some(s), Some(t)) = (source_vertical, target_vertical) else {
            return Ok(horizontal);
        };
        if s.kind == t.kind && s.geoid_grid_name == t.geoid_grid_name {
            return Ok(horizontal);
        }

        let mut steps = Vec::with_capacity(3);
        if let Some(grid_name) = &s.geoid_grid_name {
            // orthometric -> ellipsoidal is the inverse of the grid's
            // forward (ellipsoidal -> orthometric) convention.
            steps.push(self.geoid_step(grid_name)?.inverse()?);
        }
        steps.push(horizontal);
        if let Some(grid_name) = &t.geoid_grid_name {
            steps.push(self.geoid_step(grid_name)?);
        }
        Ok(CoordinateOperation::Sequence(CoordinateOperationSequence::new(steps)))
    }

    fn geoid_step(&self, grid_name: &str) -> Result<CoordinateOperation, Error> {
        let cache = self.grid_cache.ok_or_else(|| {
            Error::Unsupported(format!(
                "vertical datum conversion needs grid '{grid_name}' but no grid cache is attached to this planner"
            ))
        })?;
        let grid = VerticalGridTransformation::load(cache, grid_name)?;
        Ok(CoordinateOperation::Datum(DatumTransformation::VerticalGrid(grid)))
    }
}

fn horizontal_of(crs: &Crs) -> &Crs {
    match crs {
        Crs::Compound { horizontal, .. } => horizontal,
        other => other,
    }
}

fn vertical_of(crs: &Crs) -> Option<&crate::datum::VerticalDatum> {
    crs.vertical_datum()
}

/// `min` by [`OperationCapability::precision`].
#[must_use]
pub fn most_precise(ops: &[CoordinateOperation]) -> Option<&CoordinateOperation> {
    ops.iter()
        .min_by(|a, b| a.precision().partial_cmp(&b.precision()).unwrap_or(std::cmp::Ordering::Equal))
}

/// `most_precise`, restricted to chains that route through a geocentric
/// (3D) conversion somewhere in the pipeline.
#[must_use]
pub fn most_precise_3d(ops: &[CoordinateOperation]) -> Option<&CoordinateOperation> {
    ops.iter()
        .filter(|op| contains(op, &is_geocentric_step))
        .min_by(|a, b| a.precision().partial_cmp(&b.precision()).unwrap_or(std::cmp::Ordering::Equal))
}

fn is_geocentric_step(op: &CoordinateOperation) -> bool {
    matches!(
        op,
        CoordinateOperation::Geographic2Geocentric(_) | CoordinateOperation::Geocentric2Geographic(_)
    )
}

/// `true` iff `op`, or any step nested inside it, satisfies `predicate`.
fn contains(op: &CoordinateOperation, predicate: &impl Fn(&CoordinateOperation) -> bool) -> bool {
    if predicate(op) {
        return true;
    }
    match op {
        CoordinateOperation::Sequence(seq) => seq.steps.iter().any(|step| contains(step, predicate)),
        CoordinateOperation::Reversed(inner) => contains(inner, predicate),
        CoordinateOperation::Iterative(it) => contains(&it.inner, predicate),
        _ => false,
    }
}

/// All members of `ops` that structurally include a step matching `predicate`.
#[must_use]
pub fn include_filter(
    ops: Vec<CoordinateOperation>,
    predicate: impl Fn(&CoordinateOperation) -> bool,
) -> Vec<CoordinateOperation> {
    ops.into_iter().filter(|op| contains(op, &predicate)).collect()
}

/// All members of `ops` that do NOT structurally include a step matching
/// `predicate`.
#[must_use]
pub fn exclude_filter(
    ops: Vec<CoordinateOperation>,
    predicate: impl Fn(&CoordinateOperation) -> bool,
) -> Vec<CoordinateOperation> {
    ops.into_iter().filter(|op| !contains(op, &predicate)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::GeodeticDatum;
    use crate::identifier::Identifier;
    use crate::point::Point;
    use crate::transform::sevenparam::GeocentricTranslation;
    use crate::Direction;

    fn geographic(datum: GeodeticDatum) -> Crs {
        Crs::Geographic2D {
            id: Identifier::default(),
            datum,
        }
    }

    #[test]
    fn same_datum_fast_path_is_identity() -> Result<(), Error> {
        let registry = DatumTransformationRegistry::new();
        let planner = Planner::new(&registry);
        let source = geographic(GeodeticDatum::rgf93());
        let target = geographic(GeodeticDatum::rgf93());
        let ops = planner.plan(&source, &target)?;
        assert_eq!(ops.len(), 1);
        assert!(ops[0].is_identity());
        Ok(())
    }

    #[test]
    fn unreachable_datum_pair_reports_not_found() {
        let registry = DatumTransformationRegistry::new();
        let planner = Planner::new(&registry);
        let source = geographic(GeodeticDatum::ntf());
        let target = geographic(GeodeticDatum::rgf93());
        let err = planner.plan(&source, &target).unwrap_err();
        assert!(matches!(err, Error::CoordinateOperationNotFound { .. }));
    }

    #[test]
    fn cross_datum_chain_round_trips() -> Result<(), Error> {
        let mut registry = DatumTransformationRegistry::new();
        let ntf = GeodeticDatum::ntf();
        let rgf93 = GeodeticDatum::rgf93();
        registry.register(
            &ntf,
            &rgf93,
            CoordinateOperation::Datum(crate::transform::DatumTransformation::GeocentricTranslation(
                GeocentricTranslation::new(-168.0, -60.0, 320.0),
            )),
        );
        let planner = Planner::new(&registry);
        let source = geographic(ntf);
        let target = geographic(rgf93);
        let ops = planner.plan(&source, &target)?;
        assert_eq!(ops.len(), 1);

        let p = Point::xy(2f64.to_radians(), 46f64.to_radians());
        let forward = ops[0].transform(&p, Direction::Fwd)?;
        let back = ops[0].inverse()?.transform(&forward, Direction::Fwd)?;
        assert!((back.get(0) - p.get(0)).abs() < 1e-9);
        assert!((back.get(1) - p.get(1)).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn most_precise_picks_the_smallest_precision() {
        let a = CoordinateOperation::Identity;
        let b = CoordinateOperation::Rounding(crate::operation::primitives::CoordinateRounding::new(1.0));
        let candidates = [b, a.clone()];
        let chosen = most_precise(&candidates).unwrap();
        assert_eq!(chosen, &a);
    }

    #[test]
    fn compound_crs_adds_geoid_undulation_across_identical_horizontal_datum() -> Result<(), Error> {
        use crate::datum::{VerticalDatum, VerticalDatumType};
        use crate::grid::cache::GridCache;

        let dir = std::env::temp_dir().join("ctscore-planner-vertical-test");
        std::fs::create_dir_all(&dir)?;
        let grid_path = dir.join("flat_geoid.txt");
        std::fs::write(
            &grid_path,
            "51 49 -1 1 1 1\n44.194 44.194 44.194\n44.194 44.194 44.194\n44.194 44.194 44.194\n",
        )?;
        let cache = GridCache::with_paths(vec![dir]);

        let rgf93 = GeodeticDatum::rgf93();
        let ign69 = VerticalDatum::new(
            Identifier::new("EPSG", "5119", "IGN69 height"),
            VerticalDatumType::Geoidal,
            rgf93.ellipsoid,
            "EPSG:6171",
        )
        .with_geoid_grid("flat_geoid.txt");
        let ellipsoidal = VerticalDatum::ellipsoidal(rgf93.ellipsoid, "EPSG:6171");

        let source = Crs::Compound {
            id: Identifier::default(),
            horizontal: Box::new(Crs::Geographic3D {
                id: Identifier::default(),
                datum: rgf93.clone(),
            }),
            vertical: Box::new(Crs::Vertical {
                id: Identifier::default(),
                datum: ign69,
            }),
        };
        let target = Crs::Compound {
            id: Identifier::default(),
            horizontal: Box::new(Crs::Geographic3D {
                id: Identifier::default(),
                datum: rgf93,
            }),
            vertical: Box::new(Crs::Vertical {
                id: Identifier::default(),
                datum: ellipsoidal,
            }),
        };

        let registry = DatumTransformationRegistry::new();
        let planner = Planner::new(&registry).with_grid_cache(&cache);
        let ops = planner.plan(&source, &target)?;
        assert_eq!(ops.len(), 1);

        let p = Point::xyz(0.0, 50f64.to_radians(), 50.0);
        let out = ops[0].transform(&p, Direction::Fwd)?;
        assert!((out.get(2) - 94.194).abs() < 1e-6);

        let back = ops[0].inverse()?.transform(&out, Direction::Fwd)?;
        assert!((back.get(2) - 50.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn compound_crs_without_grid_cache_reports_unsupported() {
        use crate::datum::{VerticalDatum, VerticalDatumType};

        let rgf93 = GeodeticDatum::rgf93();
        let ign69 = VerticalDatum::new(
            Identifier::new("EPSG", "5119", "IGN69 height"),
            VerticalDatumType::Geoidal,
            rgf93.ellipsoid,
            "EPSG:6171",
        )
        .with_geoid_grid("flat_geoid.txt");
        let ellipsoidal = VerticalDatum::ellipsoidal(rgf93.ellipsoid, "EPSG:6171");

        let source = Crs::Compound {
            id: Identifier::default(),
            horizontal: Box::new(Crs::Geographic3D {
                id: Identifier::default(),
                datum: rgf93.clone(),
            }),
            vertical: Box::new(Crs::Vertical {
                id: Identifier::default(),
                datum: ign69,
            }),
        };
        let target = Crs::Compound {
            id: Identifier::default(),
            horizontal: Box::new(Crs::Geographic3D {
                id: Identifier::default(),
                datum: rgf93,
            }),
            vertical: Box::new(Crs::Vertical {
                id: Identifier::default(),
                datum: ellipsoidal,
            }),
        };

        let registry = DatumTransformationRegistry::new();
        let planner = Planner::new(&registry);
        let err = planner.plan(&source, &target).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }
}
