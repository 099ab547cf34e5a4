//! Hotine Oblique Mercator, Azimuth Center variant (EPSG 9815), following
//! IOGP Publication 373-7-2, Guidance Note 7 part 2.

use crate::ellipsoid::Ellipsoid;
use crate::error::Error;
use crate::point::Point;
use crate::Direction;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotineObliqueMercator {
    pub ellipsoid: Ellipsoid,
    pub lat_c: f64,
    pub lon_c: f64,
    pub alpha: f64,
    pub gamma_c: f64,
    pub k_c: f64,
    pub x_0: f64,
    pub y_0: f64,
    a: f64,
    b: f64,
    lambda_0: f64,
    gamma_0: f64,
    h: f64,
    uc: f64,
}

impl HotineObliqueMercator {
    #[allow(non_snake_case, clippy::too_many_arguments)]
    pub fn new(
        ellipsoid: Ellipsoid,
        lat_c: f64,
        lon_c: f64,
        alpha: f64,
        gamma_c: f64,
        k_c: f64,
        x_0: f64,
        y_0: f64,
    ) -> HotineObliqueMercator {
        let es = ellipsoid.eccentricity_squared();
        let e = es.sqrt();
        let (s, c) = lat_c.sin_cos();

        let b = (1.0 + c.powi(4) * ellipsoid.second_eccentricity_squared()).sqrt();
        let a = ellipsoid.semimajor_axis() * b * k_c * (1.0 - es).sqrt() / (1.0 - es * s * s);
        let t0 = (FRAC_PI_4 - lat_c / 2.0).tan() / ((1.0 - e * s) / (1.0 + e * s)).powf(e / 2.0);
        let d = b * (1.0 - es).sqrt() / (c * (1.0 - es * s * s).sqrt());
        let dd = if d < 1.0 { 0.0 } else { (d * d - 1.0).sqrt() };
        let f = d + dd * lat_c.signum();
        let h = f * t0.powf(b);
        let g = (f - 1.0 / f) / 2.0;
        let gamma_0 = (alpha.sin() / d).asin();
        let lambda_0 = lon_c - (g * gamma_0.tan()).asin() / b;

        let uc = if alpha == FRAC_PI_2 {
            a * (lon_c - lambda_0)
        } else {
            (a / b) * dd.atan2(alpha.cos()) * lat_c.signum()
        };

        HotineObliqueMercator {
            ellipsoid,
            lat_c,
            lon_c,
            alpha,
            gamma_c,
            k_c,
            x_0,
            y_0,
            a,
            b,
            lambda_0,
            gamma_0,
            h,
            uc,
        }
    }

    #[allow(non_snake_case)]
    fn fwd(&self, lon: f64, lat: f64) -> (f64, f64) {
        let es = self.ellipsoid.eccentricity_squared();
        let e = es.sqrt();
        let (s0, c0) = self.gamma_0.sin_cos();
        let (sc, cc) = self.gamma_c.sin_cos();

        let slat = lat.sin();
        let t = (FRAC_PI_4 - lat / 2.0).tan() / ((1.0 - e * slat) / (1.0 + e * slat)).powf(e / 2.0);
        let Q = self.h / t.powf(self.b);
        let S = (Q - 1.0 / Q) / 2.0;
        let T = (Q + 1.0 / Q) / 2.0;
        let V = (self.b * (lon - self.lambda_0)).sin();
        let U = (S * s0 - V * c0) / T;
        let v = self.a * ((1.0 - U) / (1.0 + U)).ln() / (2.0 * self.b);

        let cblon = (self.b * (lon - self.lambda_0)).cos();
        let u = self.a * (S * c0 + V * s0).atan2(cblon) / self.b - self.uc.copysign(self.lat_c);

        let x = v * cc + u * sc + self.x_0;
        let y = u * cc - v * sc + self.y_0;
        (x, y)
    }

    #[allow(non_snake_case)]
    fn inv(&self, easting: f64, northing: f64) -> (f64, f64) {
        let es = self.ellipsoid.eccentricity_squared();
        let (s0, c0) = self.gamma_0.sin_cos();
        let (sc, cc) = self.gamma_c.sin_cos();
        let offset = self.uc.copysign(self.lat_c);

        let v = (easting - self.x_0) * cc - (northing - self.y_0) * sc;
        let u = (northing - self.y_0) * cc + (easting - self.x_0) * sc + offset;

        let Q = (-self.b * v / self.a).exp();
        let S = (Q - 1.0 / Q) / 2.0;
        let T = (Q + 1.0 / Q) / 2.0;
        let V = (self.b * u / self.a).sin();
        let U = (V * c0 + S * s0) / T;
        let t = (self.h / ((1.0 + U) / (1.0 - U)).sqrt()).powf(1.0 / self.b);
        let chi = FRAC_PI_2 - 2.0 * t.atan();

        let f = [
            0.5 + es * (5.0 / 24.0 + es * (1.0 / 12.0 + es * 13.0 / 360.0)),
            es * (7.0 / 48.0 + es * (29.0 / 240.0 + es * 811.0 / 11520.0)),
            es * es * (7.0 / 120.0 + es * 81.0 / 1120.0),
            es * es * es * 4279.0 / 161280.0,
        ];
        let sines = [
            (2.0 * chi).sin(),
            (4.0 * chi).sin(),
            (6.0 * chi).sin(),
            (8.0 * chi).sin(),
        ];
        let lat = chi + f[0] * sines[0] + f[1] * sines[1] + f[2] * sines[2] + f[3] * sines[3];
        let lon = self.lambda_0 - (S * c0 - V * s0).atan2((self.b * u / self.a).cos()) / self.b;
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
