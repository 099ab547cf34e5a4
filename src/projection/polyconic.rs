//! American Polyconic, following Snyder (1987) eq. 18-4/18-5 for the
//! forward direction. There is no closed-form ellipsoidal inverse
//! (Snyder gives an iterative one, eq. 18-11 through 18-14); here the
//! inverse solves the 2x2 system with Newton's method against the
//! forward formula directly, which converges in a handful of steps for
//! any point actually reachable by a polyconic grid.

use crate::ellipsoid::Ellipsoid;
use crate::error::Error;
use crate::point::Point;
use crate::Direction;

const TOL: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polyconic {
    pub ellipsoid: Ellipsoid,
    pub lon_0: f64,
    pub lat_0: f64,
    pub x_0: f64,
    pub y_0: f64,
    m0: f64,
}

impl Polyconic {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, lon_0: f64, lat_0: f64, x_0: f64, y_0: f64) -> Polyconic {
        let m0 = ellipsoid.meridian_latitude_to_distance(lat_0);
        Polyconic {
            ellipsoid,
            lon_0,
            lat_0,
            x_0,
            y_0,
            m0,
        }
    }

    fn fwd(&self, lon: f64, lat: f64) -> (f64, f64) {
        if lat.abs() < TOL {
            return (self.x_0 + self.ellipsoid.semimajor_axis() * (lon - self.lon_0), self.y_0 - self.m0);
        }
        let n = self.ellipsoid.prime_vertical_radius_of_curvature(lat);
        let e = (lon - self.lon_0) * lat.sin();
        let cot = lat.cos() / lat.sin();
        let m = self.ellipsoid.meridian_latitude_to_distance(lat);
        let x = self.x_0 + n * cot * e.sin();
        let y = self.y_0 + (m - self.m0) + n * cot * (1.0 - e.cos());
        (x, y)
    }

    fn inv(&self, x_target: f64, y_target: f64) -> Result<(f64, f64), Error> {
        let y_rel = y_target - self.y_0 + self.m0;
        if y_rel.abs() < TOL {
            return Ok((self.lon_0 + (x_target - self.x_0) / self.ellipsoid.semimajor_axis(), 0.0));
        }

        let mut lat = self.ellipsoid.meridian_distance_to_latitude(y_rel);
        let mut lon = self.lon_0 + (x_target - self.x_0) / self.ellipsoid.semimajor_axis().max(1.0);

        const H: f64 = 1e-6;
        for _ in 0..20 {
            let (fx, fy) = self.fwd(lon, lat);
            let rx = x_target - fx;
            let ry = y_target - fy;
            if rx.abs() < 1e-8 && ry.abs() < 1e-8 {
                return Ok((lon, lat));
            }

            let (fx_dlon, fy_dlon) = self.fwd(lon + H, lat);
            let (fx_dlat, fy_dlat) = self.fwd(lon, lat + H);
            let j11 = (fx_dlon - fx) / H;
            let j21 = (fy_dlon - fy) / H;
            let j12 = (fx_dlat - fx) / H;
            let j22 = (fy_dlat - fy) / H;

            let det = j11 * j22 - j12 * j21;
            if det.abs() < 1e-30 {
                break;
            }
            let dlon = (rx * j22 - ry * j12) / det;
            let dlat = (j11 * ry - j21 * rx) / det;
            lon += dlon;
            lat += dlat;
        }

        Err(Error::TooManyIterations {
            op: "Polyconic".to_string(),
            max: 20,
        })
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let (x, y) = match direction {
            Direction::Fwd => self.fwd(point.get(0), point.get(1)),
            Direction::Inv => self.inv(point.get(0), point.get(1))?,
        };
        Ok(super::Projection::plane_point(point, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_away_from_equator() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let poly = Polyconic::new(ellps, 0.0, 0.0, 0.0, 0.0);
        let geo = Point::xy(5f64.to_radians(), 40f64.to_radians());
        let p = poly.transform(&geo, Direction::Fwd)?;
        let back = poly.transform(&p, Direction::Inv)?;
        assert!((back.get(0) - geo.get(0)).abs() < 1e-7);
        assert!((back.get(1) - geo.get(1)).abs() < 1e-7);
        Ok(())
    }

    #[test]
    fn equator_special_case() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let poly = Polyconic::new(ellps, 0.0, 0.0, 0.0, 0.0);
        let p = poly.transform(&Point::xy(2f64.to_radians(), 0.0), Direction::Fwd)?;
        assert!((p.get(1) - 0.0).abs() < 1e-9);
        Ok(())
    }
}
