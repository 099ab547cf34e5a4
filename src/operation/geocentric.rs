//! Geographic <-> geocentric (Earth-centered, Earth-fixed) conversion.
//!
//! `Geographic2Geocentric` reuses [`Ellipsoid::geographic_to_geocentric`],
//! a closed form. `Geocentric2Geographic` instead runs the iterative
//! Bowring-style fixed point directly, matching the classical formulation
//! rather than the ellipsoid's own closed-form inverse — the two agree to
//! well under a millimeter, but this keeps the iteration count and
//! convergence tolerance visible and tunable at the operation level.

use crate::ellipsoid::Ellipsoid;
use crate::error::Error;
use crate::point::Point;
use crate::Direction;

const DEFAULT_EPSILON: f64 = 1e-11;
const MAX_ITERATIONS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geographic2Geocentric {
    pub ellipsoid: Ellipsoid,
}

impl Geographic2Geocentric {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> Geographic2Geocentric {
        Geographic2Geocentric { ellipsoid }
    }

    #[must_use]
    pub fn inverted(&self) -> Geocentric2Geographic {
        Geocentric2Geographic::new(self.ellipsoid)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        match direction {
            Direction::Fwd => {
                let (lon, lat, h) = (point.get(0), point.get(1), point.get(2));
                let (x, y, z) = self.ellipsoid.geographic_to_geocentric(lon, lat, h);
                let mut out = point.clone();
                out.resize(3.max(point.len()));
                out.set(0, x);
                out.set(1, y);
                out.set(2, z);
                Ok(out)
            }
            Direction::Inv => self.inverted().transform(point, Direction::Fwd),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geocentric2Geographic {
    pub ellipsoid: Ellipsoid,
    pub epsilon: f64,
}

impl Geocentric2Geographic {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> Geocentric2Geographic {
        Geocentric2Geographic {
            ellipsoid,
            epsilon: DEFAULT_EPSILON,
        }
    }

    #[must_use]
    pub fn with_epsilon(ellipsoid: Ellipsoid, epsilon: f64) -> Geocentric2Geographic {
        Geocentric2Geographic { ellipsoid, epsilon }
    }

    #[must_use]
    pub fn inverted(&self) -> Geographic2Geocentric {
        Geographic2Geocentric::new(self.ellipsoid)
    }

    /// The iterative Bowring-style fixed point:
    /// `phi_{k+1} = atan((Z/rho) / (1 - a e^2 cos(phi_k) / (rho sqrt(1 - e^2 sin^2(phi_k)))))`
    /// bootstrapped from the spherical latitude `sin(phi_0) = Z / |XYZ|`.
    #[allow(non_snake_case)]
    fn geocentric_to_geographic(&self, X: f64, Y: f64, Z: f64) -> Result<(f64, f64, f64), Error> {
        let a = self.ellipsoid.semimajor_axis();
        let es = self.ellipsoid.eccentricity_squared();
        let lon = Y.atan2(X);
        let rho = X.hypot(Y);

        if rho < 1e-12 {
            let phi = std::f64::consts::FRAC_PI_2.copysign(Z);
            let h = Z.abs() - self.ellipsoid.semiminor_axis();
            return Ok((lon, phi, h));
        }

        let r = X.hypot(Y).hypot(Z);
        let mut phi = (Z / r).asin();

        let mut converged = false;
        for _ in 0..MAX_ITERATIONS {
            let denom = 1.0 - (a * es * phi.cos()) / (rho * (1.0 - es * phi.sin().powi(2)).sqrt());
            let new_phi = (Z / rho / denom).atan();
            if (new_phi - phi).abs() < self.epsilon {
                phi = new_phi;
                converged = true;
                break;
            }
            phi = new_phi;
        }
        if !converged {
            return Err(Error::TooManyIterations {
                op: "Geocentric2Geographic".to_string(),
                max: MAX_ITERATIONS,
            });
        }

        let n = self.ellipsoid.prime_vertical_radius_of_curvature(phi);
        let h = if phi.abs() < 1.3 {
            rho / phi.cos() - n
        } else {
            Z / phi.sin() - n * (1.0 - es)
        };

        Ok((lon, phi, h))
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        match direction {
            Direction::Fwd => {
                let (x, y, z) = (point.get(0), point.get(1), point.get(2));
                let (lon, lat, h) = self.geocentric_to_geographic(x, y, z)?;
                let mut out = point.clone();
                out.resize(3.max(point.len()));
                out.set(0, lon);
                out.set(1, lat);
                out.set(2, h);
                Ok(out)
            }
            Direction::Inv => self.inverted().transform(point, Direction::Fwd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_matches_closed_form() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let fwd = Geographic2Geocentric::new(ellps);
        let inv = fwd.inverted();

        let p = Point::xyz(2f64.to_radians(), 48f64.to_radians(), 150.0);
        let geocentric = fwd.transform(&p, Direction::Fwd)?;
        let back = inv.transform(&geocentric, Direction::Fwd)?;

        assert!((back.get(0) - p.get(0)).abs() < 1e-10);
        assert!((back.get(1) - p.get(1)).abs() < 1e-10);
        assert!((back.get(2) - p.get(2)).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn near_pole_bootstraps_without_iterating() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let inv = Geocentric2Geographic::new(ellps);
        let (_, lat, h) = inv.geocentric_to_geographic(0.0, 0.0, ellps.semiminor_axis() + 50.0)?;
        assert!((lat - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert!((h - 50.0).abs() < 1e-6);
        Ok(())
    }
}
