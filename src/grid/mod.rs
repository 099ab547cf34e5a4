//! Grid characteristics and bilinear interpolation, used by the NTv2 and
//! geoid grid-shift transformations.

pub mod cache;
pub mod ntv2;

use crate::error::Error;
use std::io::BufRead;

/// A grid of one or more bands of correction values, addressable by
/// geographic longitude/latitude in radians.
pub trait Grid: std::fmt::Debug + Send + Sync {
    fn bands(&self) -> usize;

    /// `true` if `(lon, lat)` falls within the grid, or within `margin`
    /// grid-cell units of its border.
    fn contains(&self, lon: f64, lat: f64, margin: f64) -> bool;

    /// Bilinearly interpolated band values at `(lon, lat)`, or `None` if
    /// the point (plus margin) falls outside the grid.
    fn at(&self, lon: f64, lat: f64, margin: f64) -> Option<Vec<f64>>;
}

/// A single rectangular grid stored as a flat row-major array of `f32`
/// band values — the common representation shared by NTv2 sub-grids and
/// Gravsoft-format geoid grids.
#[derive(Debug, Default, Clone)]
pub struct BaseGrid {
    lat_0: f64,
    lat_1: f64,
    lon_0: f64,
    lon_1: f64,
    dlat: f64,
    dlon: f64,
    rows: usize,
    cols: usize,
    bands: usize,
    grid: Vec<f32>,
}

impl Grid for BaseGrid {
    fn bands(&self) -> usize {
        self.bands
    }

    fn contains(&self, lon: f64, lat: f64, margin: f64) -> bool {
        let (mut min, mut max) = (self.lat_1, self.lat_0);
        if self.dlat > 0. {
            (min, max) = (max, min);
        }
        let grace = margin * self.dlat.abs();
        if lat != lat.clamp(min - grace, max + grace) {
            return false;
        }

        let (mut min, mut max) = (self.lon_0, self.lon_1);
        if self.dlon < 0. {
            (min, max) = (max, min);
        }
        let grace = margin * self.dlon.abs();
        lon == lon.clamp(min - grace, max + grace)
    }

    fn at(&self, lon: f64, lat: f64, margin: f64) -> Option<Vec<f64>> {
        if !self.contains(lon, lat, margin) {
            return None;
        }

        let rlon = lon - self.lon_0;
        let rlat = lat - self.lat_0;

        let row = (rlat / self.dlat).floor() as i64;
        let col = (rlon / self.dlon).floor() as i64;
        let col = col.clamp(0, (self.cols - 2) as i64) as usize;
        let row = row.clamp(1, (self.rows - 1) as i64) as usize;

        #[rustfmt::skip]
        let (ll, lr, ur, ul) = (
            self.bands * (self.cols *  row      + col    ),
            self.bands * (self.cols *  row      + col + 1),
            self.bands * (self.cols * (row - 1) + col + 1),
            self.bands * (self.cols * (row - 1) + col    ),
        );

        let ll_lon = self.lon_0 + col as f64 * self.dlon;
        let ll_lat = self.lat_0 + row as f64 * self.dlat;
        let rlon = (lon - ll_lon) / self.dlon;
        let rlat = (lat - ll_lat) / -self.dlat;

        let mut result = vec![0.0; self.bands];
        for i in 0..self.bands {
            let left = (1. - rlat) * self.grid[ll + i] as f64 + rlat * self.grid[ul + i] as f64;
            let right = (1. - rlat) * self.grid[lr + i] as f64 + rlat * self.grid[ur + i] as f64;
            result[i] = (1. - rlon) * left + rlon * right;
        }
        Some(result)
    }
}

impl BaseGrid {
    /// `header = [lat_0, lat_1, lon_0, lon_1, dlat, dlon, bands]`, all in
    /// the grid's native units (radians for geographic grids).
    pub fn plain(header: &[f64], grid: Vec<f32>) -> Result<Self, Error> {
        if header.len() < 7 {
            return Err(Error::InvalidGridFile {
                reason: "incomplete grid header".to_string(),
            });
        }
        let lat_0 = header[0];
        let lat_1 = header[1];
        let lon_0 = header[2];
        let lon_1 = header[3];
        let dlat = header[4].copysign(lat_1 - lat_0);
        let dlon = header[5].copysign(lon_1 - lon_0);
        let bands = header[6] as usize;
        let rows = ((lat_1 - lat_0) / dlat + 1.5).floor() as usize;
        let cols = ((lon_1 - lon_0) / dlon + 1.5).floor() as usize;
        let elements = rows * cols * bands;

        if elements == 0 || elements > grid.len() || bands < 1 {
            return Err(Error::InvalidGridFile {
                reason: "malformed grid".to_string(),
            });
        }

        Ok(BaseGrid {
            lat_0,
            lat_1,
            lon_0,
            lon_1,
            dlat,
            dlon,
            rows,
            cols,
            bands,
            grid,
        })
    }

    /// Parse a Gravsoft-format text grid (used for geoid undulation grids):
    /// a six-number header (`lat_1 lat_0 lon_0 lon_1 dlat dlon`) followed
    /// by whitespace-separated band values, `#`-style comments stripped.
    pub fn gravsoft(buf: &[u8]) -> Result<Self, Error> {
        let mut header = Vec::<f64>::new();
        let mut grid = Vec::<f32>::new();

        for line in std::io::BufReader::new(buf).lines() {
            let line = line?;
            let line = line.split('#').next().unwrap_or("").to_string();
            for item in line.split_whitespace() {
                let value: f64 = item.parse().unwrap_or(f64::NAN);
                if header.len() < 6 {
                    header.push(value);
                } else {
                    grid.push(value as f32);
                }
            }
        }

        if header.len() < 6 {
            return Err(Error::InvalidGridFile {
                reason: "incomplete Gravsoft header".to_string(),
            });
        }

        // Gravsoft orders the header lat_1, lat_0; BaseGrid wants lat_0, lat_1.
        header.swap(0, 1);
        let lat_0 = header[0];
        let lat_1 = header[1];
        let lon_0 = header[2];
        let lon_1 = header[3];
        let dlat = header[4].copysign(lat_1 - lat_0);
        let dlon = header[5].copysign(lon_1 - lon_0);
        let rows = ((lat_1 - lat_0) / dlat + 1.5).floor() as usize;
        let cols = ((lon_1 - lon_0) / dlon + 1.5).floor() as usize;
        if rows * cols == 0 || grid.len() < rows * cols {
            return Err(Error::InvalidGridFile {
                reason: "incomplete Gravsoft grid body".to_string(),
            });
        }
        let bands = grid.len() / (rows * cols);
        if bands < 1 || bands * rows * cols != grid.len() {
            return Err(Error::InvalidGridFile {
                reason: "ragged Gravsoft grid body".to_string(),
            });
        }
        header.push(bands as f64);

        // Degree-valued headers get converted to radians; large values
        // indicate a projected (already-metric) grid, left untouched.
        if header[..4].iter().all(|h| h.abs() <= 720.0) {
            for h in header.iter_mut().take(6) {
                *h = h.to_radians();
            }
        }

        BaseGrid::plain(&header, grid)
    }
}
