//! Geocentric translation and the 7-parameter (Bursa-Wolf / Molodensky-
//! Badekas) datum shift, following Engsager's `set_dtm_1.c` rotation
//! matrix construction, restricted to the static (non-time-varying)
//! subset this engine needs.

use crate::error::Error;
use crate::point::Point;
use crate::Direction;

/// Which axis convention the rotation angles are given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationConvention {
    /// EPSG "Position Vector" — rotate the position vector directly.
    PositionVector,
    /// EPSG "Coordinate Frame" — rotate the axes instead; equivalent to
    /// Position Vector with the rotation angles negated.
    CoordinateFrame,
}

/// A plain 3-parameter geocentric translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricTranslation {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
}

impl GeocentricTranslation {
    #[must_use]
    pub fn new(tx: f64, ty: f64, tz: f64) -> GeocentricTranslation {
        GeocentricTranslation { tx, ty, tz }
    }

    #[must_use]
    pub fn inverted(&self) -> GeocentricTranslation {
        GeocentricTranslation::new(-self.tx, -self.ty, -self.tz)
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let (tx, ty, tz) = match direction {
            Direction::Fwd => (self.tx, self.ty, self.tz),
            Direction::Inv => (-self.tx, -self.ty, -self.tz),
        };
        let mut out = point.clone();
        out.set(0, out.get(0) + tx);
        out.set(1, out.get(1) + ty);
        out.set(2, out.get(2) + tz);
        Ok(out)
    }
}

/// The full 7-parameter similarity transform: translate, rotate, scale,
/// in 3D geocentric Cartesian space.
///
/// `Linearized` drops second-order terms from the rotation matrix (valid
/// for rotations of a few arc-seconds, which is the overwhelming majority
/// of real datum transformations) and is its own inverse under negation
/// of every parameter. `Exact` builds the true `Rz * Ry * Rx` product and
/// inverts algebraically (transpose the rotation, negate and unscale the
/// translation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SevenParameterTransformation {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub scale_ppm: f64,
    pub convention: RotationConvention,
    pub exact: bool,
}

impl SevenParameterTransformation {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        tx: f64,
        ty: f64,
        tz: f64,
        rx_arcsec: f64,
        ry_arcsec: f64,
        rz_arcsec: f64,
        scale_ppm: f64,
        convention: RotationConvention,
        exact: bool,
    ) -> SevenParameterTransformation {
        SevenParameterTransformation {
            tx,
            ty,
            tz,
            rx: (rx_arcsec / 3600.0).to_radians(),
            ry: (ry_arcsec / 3600.0).to_radians(),
            rz: (rz_arcsec / 3600.0).to_radians(),
            scale_ppm,
            convention,
            exact,
        }
    }

    fn scale(&self) -> f64 {
        1.0 + self.scale_ppm * 1e-6
    }

    /// `ROTZ * ROTY * ROTX`, in the position-vector orientation; for the
    /// coordinate-frame convention the matrix is transposed.
    fn rotation_matrix(&self) -> [[f64; 3]; 3] {
        let (mut sx, mut sy, mut sz) = (self.rx, self.ry, self.rz);
        let (mut cx, mut cy, mut cz) = (1.0, 1.0, 1.0);
        if self.exact {
            (sx, cx) = self.rx.sin_cos();
            (sy, cy) = self.ry.sin_cos();
            (sz, cz) = self.rz.sin_cos();
        }

        let r11 = cy * cz;
        let mut r12 = cx * sz;
        let mut r13 = -cx * sy * cz;
        let r21 = -cy * sz;
        let mut r22 = cx * cz;
        let mut r23 = sx * cz;
        let r31 = sy;
        let r32 = -sx * cy;
        let r33 = cx * cy;

        if self.exact {
            r12 += sx * sy * cz;
            r13 += sx * sz;
            r22 -= sx * sy * sz;
            r23 += cx * sy * sz;
        }

        let pv = [[r11, r21, r31], [r12, r22, r32], [r13, r23, r33]];
        match self.convention {
            RotationConvention::PositionVector => pv,
            RotationConvention::CoordinateFrame => [
                [pv[0][0], pv[1][0], pv[2][0]],
                [pv[0][1], pv[1][1], pv[2][1]],
                [pv[0][2], pv[1][2], pv[2][2]],
            ],
        }
    }

    /// The true algebraic inverse: `Exact` transposes the rotation and
    /// recomputes the translation; `Linearized` is exactly the
    /// negate-every-parameter self-inverse the small-angle approximation
    /// was built for.
    #[must_use]
    pub fn inverted(&self) -> SevenParameterTransformation {
        if !self.exact {
            return SevenParameterTransformation {
                tx: -self.tx,
                ty: -self.ty,
                tz: -self.tz,
                rx: -self.rx,
                ry: -self.ry,
                rz: -self.rz,
                scale_ppm: -self.scale_ppm,
                convention: self.convention,
                exact: false,
            };
        }

        let r = self.rotation_matrix();
        let s = self.scale();
        // Inverse rotation is the transpose; inverse translation is
        // -R^T * T / S.
        let tx = -(r[0][0] * self.tx + r[1][0] * self.ty + r[2][0] * self.tz) / s;
        let ty = -(r[0][1] * self.tx + r[1][1] * self.ty + r[2][1] * self.tz) / s;
        let tz = -(r[0][2] * self.tx + r[1][2] * self.ty + r[2][2] * self.tz) / s;

        SevenParameterTransformation {
            tx,
            ty,
            tz,
            rx: -self.rx,
            ry: -self.ry,
            rz: -self.rz,
            scale_ppm: ((1.0 / s) - 1.0) * 1e6,
            convention: self.convention,
            exact: true,
        }
    }

    pub fn transform(&self, point: &Point, direction: Direction) -> Result<Point, Error> {
        let params = match direction {
            Direction::Fwd => *self,
            Direction::Inv => self.inverted(),
        };
        let r = params.rotation_matrix();
        let s = params.scale();
        let (x, y, z) = (point.get(0), point.get(1), point.get(2));

        let rx = x * r[0][0] + y * r[0][1] + z * r[0][2];
        let ry = x * r[1][0] + y * r[1][1] + z * r[1][2];
        let rz = x * r[2][0] + y * r[2][1] + z * r[2][2];

        let mut out = point.clone();
        out.set(0, s * rx + params.tx);
        out.set(1, s * ry + params.ty);
        out.set(2, s * rz + params.tz);
        Ok(out)
    }
}
