//! Transverse Mercator and its Gauss-Schreiber relative, both following
//! the Bowring (1989) series expansion PROJ's `tmerc` uses.

use crate::ellipsoid::Ellipsoid;
use crate::error::Error;
use crate::point::Point;
use crate::Direction;

/// Transverse Mercator, parameterized by central meridian, latitude of
/// origin, scale factor at the central meridian, and false easting/northing.
/// UTM is this projection with `k_0 = 0.9996`, `lon_0` at the zone's
/// central meridian, `x_0 = 500000`, and `y_0 = 0` (or `10000000` south).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    pub ellipsoid: Ellipsoid,
    pub lon_0: f64,
    pub lat_0: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
}

impl TransverseMercator {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, lon_0: f64, lat_0: f64, k_0: f64, x_0: f64, y_0: f64) -> TransverseMercator {
        TransverseMercator {
            ellipsoid,
            lon_0,
            lat_0,
            k_0,
            x_0,
            y_0,
        }
    }

    /// A UTM projection for the given zone (1..=60) and hemisphere.
    #[must_use]
    pub fn utm(ellipsoid: Ellipsoid, zone: u8, southern: bool) -> TransverseMercator {
        let lon_0 = (zone as f64 * 6.0 - 183.0).to_radians();
        let y_0 = if southern { 10_000_000.0 } else { 0.0 };
        TransverseMercator::new(ellipsoid, lon_0, 0.0, 0.9996, 500_000.0, y_0)
    }

    fn fwd(&self, lon: f64, lat_in: f64) -> (f64, f64) {
        let ellps = &self.ellipsoid;
        let eps = ellps.second_eccentricity_squared();
        let lat = lat_in + self.lat_0;
        let (s, c) = lat.sin_cos();
        let (cc, ss) = (c * c, s * s);

        let dlon = lon - self.lon_0;
        let oo = dlon * dlon;

        let n = ellps.prime_vertical_radius_of_curvature(lat);
        let z = eps * dlon.powi(3) * c.powi(5) / 6.0;
        let sd2 = (dlon / 2.0).sin();
        let theta_2 = (2.0 * s * c * sd2 * sd2).atan2(ss + cc * dlon.cos());

        let sd = dlon.sin();
        let x = self.x_0 + self.k_0 * n * ((c * sd).atanh() + z * (1.0 + oo * (36.0 * cc - 29.0) / 10.0));

        let m = ellps.meridian_latitude_to_distance(lat);
        let znos4 = z * n * dlon * s / 4.0;
        let ecc = 4.0 * eps * cc;
        let y = self.y_0 + self.k_0 * (m + n * theta_2 + znos4 * (9.0 + ecc + oo * (20.0 * cc - 11.0)));

        (x, y)
    }

    fn inv(&self, x_in: f64, y_in: f64) -> (f64, f64) {
        let ellps = &self.ellipsoid;
        let eps = ellps.second_eccentricity_squared();

        let lat = ellps.meridian_distance_to_latitude((y_in - self.y_0) / self.k_0);
        let t = lat.tan();
        let c = lat.cos();
        let cc = c * c;
        let n = ellps.prime_vertical_radius_of_curvature(lat);
        let x = (x_in - self.x_0) / (self.k_0 * n);
        let xx = x * x;
        let theta_4 = x.sinh().atan2(c);
        let theta_5 = (t * theta_4.cos()).atan();

        let xet = xx * xx * eps * t / 24.0;
        let out_lat = self.lat_0 + (1.0 + cc * eps) * (theta_5 - xet * (9.0 - 10.0 * cc)) - eps * cc * lat;

        let approx = self.lon_0 + theta_4;
        let coef = eps / 60.0 * xx * x * c;
        let out_lon = approx - coef * (10.0 - 4.0 * xx / cc + xx * cc);

        (out_lon, out_lat)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let (x, y) = match direction {
            Direction::Fwd => self.fwd(point.get(0), point.get(1)),
            Direction::Inv => self.inv(point.get(0), point.get(1)),
        };
        Ok(super::Projection::plane_point(point, x, y))
    }
}

/// Gauss-Schreiber Transverse Mercator ("Reunion"): a double conformal
/// projection through a conformal sphere, used as the base of the
/// Hotine Oblique Mercator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussSchreiberTransverseMercator {
    pub ellipsoid: Ellipsoid,
    pub lon_0: f64,
    pub lat_0: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
}

impl GaussSchreiberTransverseMercator {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, lon_0: f64, lat_0: f64, k_0: f64, x_0: f64, y_0: f64) -> Self {
        GaussSchreiberTransverseMercator {
            ellipsoid,
            lon_0,
            lat_0,
            k_0,
            x_0,
            y_0,
        }
    }

    fn conformal_sphere_radius(&self) -> f64 {
        let es = self.ellipsoid.eccentricity_squared();
        self.ellipsoid.semimajor_axis() * (1.0 - es).sqrt() / (1.0 - es * self.lat_0.sin().powi(2))
    }

    fn fwd(&self, lon: f64, lat: f64) -> (f64, f64) {
        let ellps = &self.ellipsoid;
        let r = self.conformal_sphere_radius();
        let chi = ellps.isometric_latitude(lat, Direction::Fwd);
        let chi0 = ellps.isometric_latitude(self.lat_0, Direction::Fwd);
        // gudermannian of the isometric latitude recovers the conformal latitude
        let conf_lat = crate::math::gudermannian::fwd(chi);
        let conf_lat0 = crate::math::gudermannian::fwd(chi0);
        let dlon = lon - self.lon_0;

        let (sin_c, cos_c) = conf_lat.sin_cos();
        let b = cos_c * dlon.sin();
        let x = self.x_0 + self.k_0 * r * b.atanh();
        let y = self.y_0 + self.k_0 * r * ((sin_c / (1.0 - b * b).sqrt()).atan() - conf_lat0);
        (x, y)
    }

    fn inv(&self, x: f64, y: f64) -> (f64, f64) {
        let ellps = &self.ellipsoid;
        let r = self.conformal_sphere_radius();
        let chi0 = ellps.isometric_latitude(self.lat_0, Direction::Fwd);
        let conf_lat0 = crate::math::gudermannian::fwd(chi0);

        let d = (y - self.y_0) / (self.k_0 * r) + conf_lat0;
        let conf_lat = (d.sin() / d.cos().cosh()).asin();
        let dlon = ((x - self.x_0) / (self.k_0 * r)).tanh().atan2(d.cos());

        let chi = crate::math::gudermannian::inv(conf_lat);
        let lat = ellps.isometric_latitude(chi, Direction::Inv);
        (self.lon_0 + dlon, lat)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let (x, y) = match direction {
            Direction::Fwd => self.fwd(point.get(0), point.get(1)),
            Direction::Inv => self.inv(point.get(0), point.get(1)),
        };
        Ok(super::Projection::plane_point(point, x, y))
    }
}
