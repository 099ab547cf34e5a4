//! Minimal CLI surface over the coordinate transformation engine:
//! `get_crs`, `transform`, and `create_from_wkt`, matching the three
//! calls the library exposes to callers. WKT parsing is out of scope for
//! the core, so `create-from-wkt` is a stub that reports as much.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ctscore::datum::{DatumTransformationRegistry, GeodeticDatum};
use ctscore::identifier::Identifier;
use ctscore::operation::{CoordinateOperation, OperationCapability};
use ctscore::planner::{most_precise, Planner};
use ctscore::prelude::*;
use ctscore::projection::{LambertConformalConic, Projection};
use ctscore::transform::sevenparam::GeocentricTranslation;
use ctscore::transform::DatumTransformation;

#[derive(Parser)]
#[command(name = "ctsdump", about = "Geodetic coordinate transformation engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a built-in CRS by `authority:code` and print it.
    GetCrs { authority_code: String },
    /// Transform a point between two built-in CRS codes.
    Transform {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Ordinates: degrees for geographic CRSs, meters for projected ones.
        ordinates: Vec<f64>,
    },
    /// Build a CRS from WKT text (unsupported; the parser is out of scope).
    CreateFromWkt { text: String },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::GetCrs { authority_code } => {
            let crs = get_crs(&authority_code)?;
            println!("{crs:#?}");
        }
        Command::Transform { from, to, ordinates } => {
            let source = get_crs(&from)?;
            let target = get_crs(&to)?;
            let registry = well_known_registry();
            let candidates = Planner::new(&registry).plan(&source, &target)?;
            let op = most_precise(&candidates).context("no coordinate operation found")?;

            let native = to_native(&source, &ordinates);
            let result = op.transform(&native, Direction::Fwd)?;
            println!("{:?}", from_native(&target, &result));
        }
        Command::CreateFromWkt { text } => match create_from_wkt(&text) {
            Ok(crs) => println!("{crs:#?}"),
            Err(err) => return Err(err.into()),
        },
    }
    Ok(())
}

/// Degrees to radians on geographic ordinates; projected CRSs pass through.
fn to_native(crs: &Crs, ordinates: &[f64]) -> Point {
    let mut p = Point::from(ordinates.to_vec());
    if matches!(crs, Crs::Geographic2D { .. } | Crs::Geographic3D { .. }) {
        p.set(0, p.get(0).to_radians());
        p.set(1, p.get(1).to_radians());
    }
    p
}

fn from_native(crs: &Crs, point: &Point) -> Vec<f64> {
    let mut ordinates = point.ordinates().to_vec();
    if matches!(crs, Crs::Geographic2D { .. } | Crs::Geographic3D { .. }) {
        ordinates[0] = ordinates[0].to_degrees();
        ordinates[1] = ordinates[1].to_degrees();
    }
    ordinates
}

/// A handful of CRSs fixed enough to demonstrate the engine end to end;
/// a real deployment plugs a `CRSHelper` registry in here instead.
fn get_crs(authority_code: &str) -> Result<Crs> {
    let crs = match authority_code {
        "EPSG:4326" => Crs::Geographic2D {
            id: Identifier::new("EPSG", "4326", "WGS 84"),
            datum: GeodeticDatum::wgs84(),
        },
        "EPSG:4171" => Crs::Geographic2D {
            id: Identifier::new("EPSG", "4171", "RGF93"),
            datum: GeodeticDatum::rgf93(),
        },
        "EPSG:2154" => {
            let datum = GeodeticDatum::rgf93();
            let lcc = LambertConformalConic::two_sp(
                datum.ellipsoid,
                44f64.to_radians(),
                49f64.to_radians(),
                46.5f64.to_radians(),
                3f64.to_radians(),
                700_000.0,
                6_600_000.0,
            )?;
            Crs::Projected {
                id: Identifier::new("EPSG", "2154", "RGF93 / Lambert-93"),
                datum,
                projection: Projection::LambertConformalConic(lcc),
            }
        }
        "EPSG:27572" => {
            let datum = GeodeticDatum::ntf_paris();
            let lcc = LambertConformalConic::two_sp(
                datum.ellipsoid,
                45.898918888889f64.to_radians(),
                47.696014444444f64.to_radians(),
                46.8f64.to_radians(),
                0.0,
                600_000.0,
                2_200_000.0,
            )?;
            Crs::Projected {
                id: Identifier::new("EPSG", "27572", "NTF (Paris) / Lambert zone II etendu"),
                datum,
                projection: Projection::LambertConformalConic(lcc),
            }
        }
        other => bail!("unknown CRS code '{other}'"),
    };
    Ok(crs)
}

fn well_known_registry() -> DatumTransformationRegistry {
    let mut registry = DatumTransformationRegistry::new();
    registry.register(
        &GeodeticDatum::ntf(),
        &GeodeticDatum::rgf93(),
        CoordinateOperation::Datum(DatumTransformation::GeocentricTranslation(GeocentricTranslation::new(
            -168.0, -60.0, 320.0,
        ))),
    );
    registry
}

fn create_from_wkt(_text: &str) -> Result<Crs, Error> {
    Err(Error::Unsupported(
        "WKT/proj.4 text parsing is out of scope for this engine".to_string(),
    ))
}
