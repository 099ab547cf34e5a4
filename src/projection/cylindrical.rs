//! Cylindrical projections: Mercator, Cylindrical Equal Area, Miller, and
//! Cassini-Soldner.

use crate::ellipsoid::Ellipsoid;
use crate::error::Error;
use crate::math::ancillary::qs;
use crate::point::Point;
use crate::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    pub ellipsoid: Ellipsoid,
    pub lon_0: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
}

impl Mercator {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, lon_0: f64, k_0: f64, x_0: f64, y_0: f64) -> Mercator {
        Mercator {
            ellipsoid,
            lon_0,
            k_0,
            x_0,
            y_0,
        }
    }

    /// `k_0` derived from a latitude of true scale, per Snyder (1987) eq. 7-6.
    #[must_use]
    pub fn with_lat_ts(ellipsoid: Ellipsoid, lon_0: f64, lat_ts: f64, x_0: f64, y_0: f64) -> Mercator {
        let (s, c) = lat_ts.sin_cos();
        let k_0 = c / (1.0 - ellipsoid.eccentricity_squared() * s * s).sqrt();
        Mercator::new(ellipsoid, lon_0, k_0, x_0, y_0)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let a = self.ellipsoid.semimajor_axis();
        let (x, y) = match direction {
            Direction::Fwd => {
                let (lon, lat) = (point.get(0), point.get(1));
                let x = self.x_0 + a * self.k_0 * (lon - self.lon_0);
                let psi = self.ellipsoid.isometric_latitude(lat, Direction::Fwd);
                let y = self.y_0 + a * self.k_0 * psi;
                (x, y)
            }
            Direction::Inv => {
                let (x_in, y_in) = (point.get(0), point.get(1));
                let lon = (x_in - self.x_0) / (a * self.k_0) + self.lon_0;
                let psi = (y_in - self.y_0) / (a * self.k_0);
                let lat = self.ellipsoid.isometric_latitude(psi, Direction::Inv);
                (lon, lat)
            }
        };
        Ok(super::Projection::plane_point(point, x, y))
    }
}

/// Lambert Cylindrical Equal Area, following Snyder (1987) eq. 10-18/20-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalEqualArea {
    pub ellipsoid: Ellipsoid,
    pub lon_0: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
    qp: f64,
}

impl CylindricalEqualArea {
    pub fn with_lat_ts(
        ellipsoid: Ellipsoid,
        lon_0: f64,
        lat_ts: f64,
        x_0: f64,
        y_0: f64,
    ) -> Result<CylindricalEqualArea, Error> {
        let t = lat_ts.cos();
        if t < 0.0 {
            return Err(Error::InvalidParameter(
                "cea: |lat_ts| must be <= 90deg".to_string(),
            ));
        }
        let e = ellipsoid.eccentricity();
        let k_0 = t / (1.0 - ellipsoid.eccentricity_squared() * lat_ts.sin().powi(2)).sqrt();
        let qp = qs(1.0, e);
        Ok(CylindricalEqualArea {
            ellipsoid,
            lon_0,
            k_0,
            x_0,
            y_0,
            qp,
        })
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let a = self.ellipsoid.semimajor_axis();
        let e = self.ellipsoid.eccentricity();
        let (x, y) = match direction {
            Direction::Fwd => {
                let (lon, lat) = (point.get(0), point.get(1));
                let x = self.x_0 + a * self.k_0 * (lon - self.lon_0);
                let y = self.y_0 + a * 0.5 * qs(lat.sin(), e) / self.k_0;
                (x, y)
            }
            Direction::Inv => {
                let (x_in, y_in) = (point.get(0), point.get(1));
                let lon = (x_in - self.x_0) / (a * self.k_0) + self.lon_0;
                let arg = 2.0 * (y_in - self.y_0) * self.k_0 / (a * self.qp);
                let lat = authalic_to_geodetic(arg.clamp(-1.0, 1.0).asin(), &self.ellipsoid);
                (lon, lat)
            }
        };
        Ok(super::Projection::plane_point(point, x, y))
    }
}

/// Convert authalic latitude (equal-area latitude) to geodetic latitude
/// via the standard 3-term series in the third flattening.
fn authalic_to_geodetic(beta: f64, ellipsoid: &Ellipsoid) -> f64 {
    let es = ellipsoid.eccentricity_squared();
    let p0 = es / 3.0 + 31.0 * es * es / 180.0 + 517.0 * es * es * es / 5040.0;
    let p1 = 23.0 * es * es / 360.0 + 251.0 * es * es * es / 3780.0;
    let p2 = 761.0 * es * es * es / 45360.0;
    beta + p0 * (2.0 * beta).sin() + p1 * (4.0 * beta).sin() + p2 * (6.0 * beta).sin()
}

/// Miller Cylindrical: a spherical-only projection following Snyder
/// (1987) eq. 11-1, applied to the ellipsoid's mean radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MillerCylindrical {
    pub radius: f64,
    pub lon_0: f64,
    pub x_0: f64,
    pub y_0: f64,
}

impl MillerCylindrical {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, lon_0: f64, x_0: f64, y_0: f64) -> MillerCylindrical {
        let radius = (2.0 * ellipsoid.semimajor_axis() + ellipsoid.semiminor_axis()) / 3.0;
        MillerCylindrical {
            radius,
            lon_0,
            x_0,
            y_0,
        }
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let (x, y) = match direction {
            Direction::Fwd => {
                let (lon, lat) = (point.get(0), point.get(1));
                let x = self.x_0 + self.radius * (lon - self.lon_0);
                let y = self.y_0 + self.radius * (std::f64::consts::FRAC_PI_4 + 0.4 * lat).tan().ln() * 1.25;
                (x, y)
            }
            Direction::Inv => {
                let (x_in, y_in) = (point.get(0), point.get(1));
                let lon = (x_in - self.x_0) / self.radius + self.lon_0;
                let lat = (((y_in - self.y_0) / self.radius / 1.25).exp().atan() - std::f64::consts::FRAC_PI_4) / 0.4;
                (lon, lat * 2.5)
            }
        };
        Ok(super::Projection::plane_point(point, x, y))
    }
}

/// Cassini-Soldner, following Snyder (1987) eq. 14-9 through 14-11, the
/// ellipsoidal form used for pre-UTM cadastral grids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CassiniSoldner {
    pub ellipsoid: Ellipsoid,
    pub lon_0: f64,
    pub lat_0: f64,
    pub x_0: f64,
    pub y_0: f64,
}

impl CassiniSoldner {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, lon_0: f64, lat_0: f64, x_0: f64, y_0: f64) -> CassiniSoldner {
        CassiniSoldner {
            ellipsoid,
            lon_0,
            lat_0,
            x_0,
            y_0,
        }
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let ellps = &self.ellipsoid;
        let es = ellps.eccentricity_squared();
        let (x, y) = match direction {
            Direction::Fwd => {
                let (lon, lat) = (point.get(0), point.get(1));
                let n = ellps.prime_vertical_radius_of_curvature(lat);
                let t = lat.tan();
                let a1 = (lon - self.lon_0) * lat.cos();
                let c1 = es / (1.0 - es) * lat.cos().powi(2);
                let a2 = a1 * a1;
                let m = ellps.meridian_latitude_to_distance(lat);
                let m0 = ellps.meridian_latitude_to_distance(self.lat_0);

                let x = self.x_0 + n * a1 * (1.0 - a2 * t * t / 6.0 - (8.0 - t * t + 8.0 * c1) * a2 * a2 * t * t / 120.0);
                let y = self.y_0 + m - m0
                    + n * t * a2 / 2.0 * (1.0 + (4.0 * c1 - t * t) * a2 / 12.0);
                (x, y)
            }
            Direction::Inv => {
                let (x_in, y_in) = (point.get(0), point.get(1));
                let m0 = ellps.meridian_latitude_to_distance(self.lat_0);
                let m1 = m0 + (y_in - self.y_0);
                let lat1 = ellps.meridian_distance_to_latitude(m1);
                let t1 = lat1.tan();
                let n1 = ellps.prime_vertical_radius_of_curvature(lat1);
                let r1 = ellps.meridian_radius_of_curvature(lat1);
                let d = (x_in - self.x_0) / n1;
                let d2 = d * d;

                let lat = lat1 - n1 * t1 / r1 * d2 / 2.0 * (1.0 - (1.0 + 3.0 * t1 * t1) * d2 / 12.0);
                let lon = self.lon_0 + (d - t1 * t1 * d2 * d / 3.0) / lat1.cos();
                (lon, lat)
            }
        };
        Ok(super::Projection::plane_point(point, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mercator_round_trips() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let merc = Mercator::new(ellps, 0.0, 1.0, 0.0, 0.0);
        let geo = Point::xy(12f64.to_radians(), 55f64.to_radians());
        let p = merc.transform(&geo, Direction::Fwd)?;
        let back = merc.transform(&p, Direction::Inv)?;
        assert!((back.get(0) - geo.get(0)).abs() < 1e-12);
        assert!((back.get(1) - geo.get(1)).abs() < 1e-10);
        Ok(())
    }

    #[test]
    fn cea_round_trips() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let cea = CylindricalEqualArea::with_lat_ts(ellps, 0.0, 0.0, 0.0, 0.0)?;
        let geo = Point::xy(10f64.to_radians(), 35f64.to_radians());
        let p = cea.transform(&geo, Direction::Fwd)?;
        let back = cea.transform(&p, Direction::Inv)?;
        assert!((back.get(0) - geo.get(0)).abs() < 1e-9);
        assert!((back.get(1) - geo.get(1)).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn miller_equator_is_identity_scaled() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let mill = MillerCylindrical::new(ellps, 0.0, 0.0, 0.0);
        let p = mill.transform(&Point::xy(0.0, 0.0), Direction::Fwd)?;
        assert!(p.get(1).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn cassini_round_trips() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let cassini = CassiniSoldner::new(ellps, 2f64.to_radians(), 48f64.to_radians(), 0.0, 0.0);
        let geo = Point::xy(2.2f64.to_radians(), 48.3f64.to_radians());
        let p = cassini.transform(&geo, Direction::Fwd)?;
        let back = cassini.transform(&p, Direction::Inv)?;
        assert!((back.get(0) - geo.get(0)).abs() < 1e-9);
        assert!((back.get(1) - geo.get(1)).abs() < 1e-9);
        Ok(())
    }
}
