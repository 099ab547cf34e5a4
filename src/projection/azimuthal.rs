//! Lambert Azimuthal Equal Area and (oblique/polar/equatorial)
//! Stereographic, following Snyder (1987) chapters 24 and 21.
//!
//! Implemented fresh from Snyder rather than from an existing LAEA
//! forward/inverse, since no auxiliary-latitude machinery for it was
//! available to build on.

use crate::ellipsoid::Ellipsoid;
use crate::error::Error;
use crate::math::ancillary::qs;
use crate::point::Point;
use crate::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertAzimuthalEqualArea {
    pub ellipsoid: Ellipsoid,
    pub lon_0: f64,
    pub lat_0: f64,
    pub x_0: f64,
    pub y_0: f64,
    qp: f64,
    beta_0: f64,
    rq: f64,
}

impl LambertAzimuthalEqualArea {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, lon_0: f64, lat_0: f64, x_0: f64, y_0: f64) -> LambertAzimuthalEqualArea {
        let e = ellipsoid.eccentricity();
        let qp = qs(1.0, e);
        let q0 = qs(lat_0.sin(), e);
        let beta_0 = (q0 / qp).asin();
        let rq = ellipsoid.semimajor_axis() * (qp / 2.0).sqrt();
        LambertAzimuthalEqualArea {
            ellipsoid,
            lon_0,
            lat_0,
            x_0,
            y_0,
            qp,
            beta_0,
            rq,
        }
    }

    fn authalic_latitude(&self, lat: f64) -> f64 {
        let e = self.ellipsoid.eccentricity();
        (qs(lat.sin(), e) / self.qp).asin()
    }

    fn fwd(&self, lon: f64, lat: f64) -> (f64, f64) {
        let beta = self.authalic_latitude(lat);
        let dlon = lon - self.lon_0;
        let (sb0, cb0) = self.beta_0.sin_cos();
        let (sb, cb) = beta.sin_cos();
        let cdlon = dlon.cos();

        let b = (2.0 / (1.0 + sb0 * sb + cb0 * cb * cdlon)).sqrt();
        let x = self.x_0 + self.rq * b * cb * dlon.sin();
        let y = self.y_0 + self.rq * b * (cb0 * sb - sb0 * cb * cdlon);
        (x, y)
    }

    fn inv(&self, x_in: f64, y_in: f64) -> (f64, f64) {
        let x = x_in - self.x_0;
        let y = y_in - self.y_0;
        let rho = x.hypot(y);
        if rho < 1e-12 {
            return (self.lon_0, self.lat_0);
        }
        let c = 2.0 * (rho / (2.0 * self.rq)).asin();
        let (sc, cc) = c.sin_cos();
        let (sb0, cb0) = self.beta_0.sin_cos();

        let beta = (cc * sb0 + y * sc * cb0 / rho).asin();
        let lon = self.lon_0 + (x * sc).atan2(rho * cb0 * cc - y * sb0 * sc);
        let lat = geodetic_from_authalic(beta, &self.ellipsoid);
        (lon, lat)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let (x, y) = match direction {
            Direction::Fwd => self.fwd(point.get(0), point.get(1)),
            Direction::Inv => self.inv(point.get(0), point.get(1)),
        };
        Ok(super::Projection::plane_point(point, x, y))
    }
}

fn geodetic_from_authalic(beta: f64, ellipsoid: &Ellipsoid) -> f64 {
    let es = ellipsoid.eccentricity_squared();
    let p0 = es / 3.0 + 31.0 * es * es / 180.0 + 517.0 * es * es * es / 5040.0;
    let p1 = 23.0 * es * es / 360.0 + 251.0 * es * es * es / 3780.0;
    let p2 = 761.0 * es * es * es / 45360.0;
    beta + p0 * (2.0 * beta).sin() + p1 * (4.0 * beta).sin() + p2 * (6.0 * beta).sin()
}

/// Oblique/polar/equatorial stereographic at an arbitrary center latitude,
/// via the conformal latitude (Snyder 1987 eq. 21-3 through 21-4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stereographic {
    pub ellipsoid: Ellipsoid,
    pub lon_0: f64,
    pub lat_0: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
    chi_0: f64,
    r: f64,
}

impl Stereographic {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, lon_0: f64, lat_0: f64, k_0: f64, x_0: f64, y_0: f64) -> Stereographic {
        let chi_0 = conformal_latitude(lat_0, &ellipsoid);
        let r = ellipsoid.prime_vertical_radius_of_curvature(lat_0)
            * (1.0 - ellipsoid.eccentricity_squared()).sqrt()
            / (1.0 - ellipsoid.eccentricity_squared() * lat_0.sin().powi(2));
        Stereographic {
            ellipsoid,
            lon_0,
            lat_0,
            k_0,
            x_0,
            y_0,
            chi_0,
            r,
        }
    }

    fn fwd(&self, lon: f64, lat: f64) -> (f64, f64) {
        let chi = conformal_latitude(lat, &self.ellipsoid);
        let dlon = lon - self.lon_0;
        let (sc0, cc0) = self.chi_0.sin_cos();
        let (sc, cc) = chi.sin_cos();
        let cdlon = dlon.cos();

        let k = 2.0 * self.k_0 / (1.0 + sc0 * sc + cc0 * cc * cdlon);
        let x = self.x_0 + self.r * k * cc * dlon.sin();
        let y = self.y_0 + self.r * k * (cc0 * sc - sc0 * cc * cdlon);
        (x, y)
    }

    fn inv(&self, x_in: f64, y_in: f64) -> (f64, f64) {
        let x = x_in - self.x_0;
        let y = y_in - self.y_0;
        let rho = x.hypot(y);
        if rho < 1e-12 {
            return (self.lon_0, self.lat_0);
        }
        let c = 2.0 * (rho / (2.0 * self.k_0 * self.r)).atan();
        let (sc, cc) = c.sin_cos();
        let (sc0, cc0) = self.chi_0.sin_cos();

        let chi = (cc * sc0 + y * sc * cc0 / rho).asin();
        let lon = self.lon_0 + (x * sc).atan2(rho * cc0 * cc - y * sc0 * sc);
        let lat = geodetic_from_conformal(chi, &self.ellipsoid);
        (lon, lat)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let (x, y) = match direction {
            Direction::Fwd => self.fwd(point.get(0), point.get(1)),
            Direction::Inv => self.inv(point.get(0), point.get(1)),
        };
        Ok(super::Projection::plane_point(point, x, y))
    }
}

fn conformal_latitude(lat: f64, ellipsoid: &Ellipsoid) -> f64 {
    let chi = ellipsoid.isometric_latitude(lat, Direction::Fwd);
    crate::math::gudermannian::fwd(chi)
}

fn geodetic_from_conformal(chi: f64, ellipsoid: &Ellipsoid) -> f64 {
    let psi = crate::math::gudermannian::inv(chi);
    ellipsoid.isometric_latitude(psi, Direction::Inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laea_round_trips() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let laea = LambertAzimuthalEqualArea::new(ellps, 10f64.to_radians(), 52f64.to_radians(), 4_321_000.0, 3_210_000.0);
        let geo = Point::xy(12f64.to_radians(), 50f64.to_radians());
        let p = laea.transform(&geo, Direction::Fwd)?;
        let back = laea.transform(&p, Direction::Inv)?;
        assert!((back.get(0) - geo.get(0)).abs() < 1e-8);
        assert!((back.get(1) - geo.get(1)).abs() < 1e-8);
        Ok(())
    }

    #[test]
    fn polar_stereographic_round_trips() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let stere = Stereographic::new(ellps, 0.0, 90f64.to_radians(), 0.994, 2_000_000.0, 2_000_000.0);
        let geo = Point::xy(45f64.to_radians(), 80f64.to_radians());
        let p = stere.transform(&geo, Direction::Fwd)?;
        let back = stere.transform(&p, Direction::Inv)?;
        assert!((back.get(0) - geo.get(0)).abs() < 1e-8);
        assert!((back.get(1) - geo.get(1)).abs() < 1e-8);
        Ok(())
    }
}
