//! Geographic <-> geocentric conversion.

use super::Ellipsoid;
use std::f64::consts::FRAC_PI_2;

impl Ellipsoid {
    /// Geographic (lon, lat, h) in radians/meters to geocentric (X, Y, Z) in meters.
    ///
    /// Follows the derivation given by Bowring (1976, 1985).
    #[must_use]
    #[allow(non_snake_case)]
    pub fn geographic_to_geocentric(&self, lon: f64, lat: f64, h: f64) -> (f64, f64, f64) {
        let N = self.prime_vertical_radius_of_curvature(lat);
        let (sinphi, cosphi) = lat.sin_cos();
        let (sinlam, coslam) = lon.sin_cos();

        let X = (N + h) * cosphi * coslam;
        let Y = (N + h) * cosphi * sinlam;
        let Z = (N * (1.0 - self.eccentricity_squared()) + h) * sinphi;
        (X, Y, Z)
    }

    /// Geocentric (X, Y, Z) in meters to geographic (lon, lat, h) in radians/meters.
    ///
    /// Closed-form solution due to Bowring (1976, 1985) — no iteration
    /// required.
    #[must_use]
    #[allow(non_snake_case)]
    pub fn geocentric_to_geographic(&self, X: f64, Y: f64, Z: f64) -> (f64, f64, f64) {
        let b = self.semiminor_axis();
        let eps = self.second_eccentricity_squared();
        let es = self.eccentricity_squared();

        let lam = Y.atan2(X);
        let p = X.hypot(Y);

        if p < 1.0e-12 {
            let phi = FRAC_PI_2.copysign(Z);
            let h = Z.abs() - b;
            return (lam, phi, h);
        }

        let a = self.semimajor_axis();
        let T = (Z * a) / (p * b);
        let c = 1.0 / (1.0 + T * T).sqrt();
        let s = c * T;

        let phi_num = Z + eps * b * s.powi(3);
        let phi_denom = p - es * a * c.powi(3);
        let phi = phi_num.atan2(phi_denom);

        let lenphi = phi_num.hypot(phi_denom);
        let sinphi = phi_num / lenphi;
        let cosphi = phi_denom / lenphi;

        let N = a / (1.0 - sinphi.powi(2) * es).sqrt();
        let h = p * cosphi + Z * sinphi - a * a / N;

        (lam, phi, h)
    }
}
