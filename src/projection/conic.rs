//! Lambert Conformal Conic, 1SP and 2SP, following PROJ's `lcc`
//! derivation (Snyder 1987, eq. 14-1 through 15-9).

use crate::ellipsoid::Ellipsoid;
use crate::error::Error;
use crate::math::ancillary::{pj_msfn, pj_phi2, ts};
use crate::point::Point;
use crate::Direction;
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertConformalConic {
    pub ellipsoid: Ellipsoid,
    pub lon_0: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
    n: f64,
    c: f64,
    rho0: f64,
}

impl LambertConformalConic {
    /// The two-standard-parallel form: `lat_1`/`lat_2` fix the cone, `lat_0`
    /// only sets the false-origin latitude. `k_0` is always 1.
    pub fn two_sp(
        ellipsoid: Ellipsoid,
        lat_1: f64,
        lat_2: f64,
        lat_0: f64,
        lon_0: f64,
        x_0: f64,
        y_0: f64,
    ) -> Result<LambertConformalConic, Error> {
        LambertConformalConic::build(ellipsoid, lat_1, lat_2, lat_0, lon_0, 1.0, x_0, y_0)
    }

    /// The one-standard-parallel (tangent) form: the cone touches at
    /// `lat_0`, and `k_0` scales the whole projection from there.
    pub fn one_sp(
        ellipsoid: Ellipsoid,
        lat_0: f64,
        lon_0: f64,
        k_0: f64,
        x_0: f64,
        y_0: f64,
    ) -> Result<LambertConformalConic, Error> {
        LambertConformalConic::build(ellipsoid, lat_0, lat_0, lat_0, lon_0, k_0, x_0, y_0)
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        ellipsoid: Ellipsoid,
        lat_1: f64,
        lat_2: f64,
        lat_0: f64,
        lon_0: f64,
        k_0: f64,
        x_0: f64,
        y_0: f64,
    ) -> Result<LambertConformalConic, Error> {
        let e = ellipsoid.eccentricity();
        let es = ellipsoid.eccentricity_squared();

        if (lat_1 + lat_2).abs() < EPS10 {
            return Err(Error::InvalidParameter(
                "lcc: |lat_1 + lat_2| must be > 0".to_string(),
            ));
        }
        let sc1 = lat_1.sin_cos();
        if sc1.1.abs() < EPS10 || lat_1.abs() >= FRAC_PI_2 {
            return Err(Error::InvalidParameter(
                "lcc: |lat_1| must be < 90deg".to_string(),
            ));
        }
        if lat_2.cos().abs() < EPS10 || lat_2.abs() >= FRAC_PI_2 {
            return Err(Error::InvalidParameter(
                "lcc: |lat_2| must be < 90deg".to_string(),
            ));
        }

        let mut n = sc1.0;
        let m1 = pj_msfn(sc1, es);
        let ml1 = ts(sc1, e);

        if (lat_1 - lat_2).abs() >= EPS10 {
            let sc2 = lat_2.sin_cos();
            n = (m1 / pj_msfn(sc2, es)).ln();
            let ml2 = ts(sc2, e);
            let denom = (ml1 / ml2).ln();
            if denom == 0.0 {
                return Err(Error::InvalidParameter("lcc: degenerate eccentricity".to_string()));
            }
            n /= denom;
        }

        let c = m1 * ml1.powf(-n) / n;
        let rho0 = if (lat_0.abs() - FRAC_PI_2).abs() > EPS10 {
            c * ts(lat_0.sin_cos(), e).powf(n)
        } else {
            0.0
        };

        Ok(LambertConformalConic {
            ellipsoid,
            lon_0,
            k_0,
            x_0,
            y_0,
            n,
            c,
            rho0,
        })
    }

    fn fwd(&self, lon: f64, lat: f64) -> (f64, f64) {
        let a = self.ellipsoid.semimajor_axis();
        let e = self.ellipsoid.eccentricity();
        let lam = lon - self.lon_0;

        if (lat.abs() - FRAC_PI_2).abs() < EPS10 && lat * self.n <= 0.0 {
            return (f64::NAN, f64::NAN);
        }
        let rho = self.c * ts(lat.sin_cos(), e).powf(self.n);
        let (s, c) = (lam * self.n).sin_cos();
        (
            self.x_0 + a * self.k_0 * rho * s,
            self.y_0 + a * self.k_0 * (self.rho0 - rho * c),
        )
    }

    fn inv(&self, x_in: f64, y_in: f64) -> (f64, f64) {
        let a = self.ellipsoid.semimajor_axis();
        let e = self.ellipsoid.eccentricity();
        let mut x = (x_in - self.x_0) / (a * self.k_0);
        let mut y = self.rho0 - (y_in - self.y_0) / (a * self.k_0);
        let mut rho = x.hypot(y);

        if rho == 0.0 {
            return (0.0, FRAC_PI_2.copysign(self.n));
        }
        if self.n < 0.0 {
            rho = -rho;
            x = -x;
            y = -y;
        }

        let ts0 = (rho / self.c).powf(1.0 / self.n);
        let phi = pj_phi2(ts0, e);
        if phi.is_nan() || phi.is_infinite() {
            return (f64::NAN, f64::NAN);
        }
        (x.atan2(y) / self.n + self.lon_0, phi)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let (x, y) = match direction {
            Direction::Fwd => self.fwd(point.get(0), point.get(1)),
            Direction::Inv => self.inv(point.get(0), point.get(1)),
        };
        if x.is_nan() || y.is_nan() {
            return Err(Error::IllegalCoordinate {
                reason: "point maps to infinity under this Lambert Conformal Conic".to_string(),
            });
        }
        Ok(super::Projection::plane_point(point, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_sp_round_trips() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let lcc = LambertConformalConic::two_sp(
            ellps,
            44f64.to_radians(),
            49f64.to_radians(),
            46.5f64.to_radians(),
            3f64.to_radians(),
            700_000.0,
            6_600_000.0,
        )?;
        let geo = Point::xy(2f64.to_radians(), 48f64.to_radians());
        let p = lcc.transform(&geo, Direction::Fwd)?;
        let back = lcc.transform(&p, Direction::Inv)?;
        assert!((back.get(0) - geo.get(0)).abs() < 1e-11);
        assert!((back.get(1) - geo.get(1)).abs() < 1e-11);
        Ok(())
    }

    #[test]
    fn one_sp_tangent_at_origin_has_no_scale_distortion() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let lcc = LambertConformalConic::one_sp(ellps, 46f64.to_radians(), 3f64.to_radians(), 1.0, 0.0, 0.0)?;
        let origin = Point::xy(3f64.to_radians(), 46f64.to_radians());
        let p = lcc.transform(&origin, Direction::Fwd)?;
        assert!(p.get(0).abs() < 1e-6);
        Ok(())
    }
}
