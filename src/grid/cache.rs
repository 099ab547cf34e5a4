//! Load-on-demand grid cache with an ordered list of search directories,
//! modeled on a local-directory-plus-OS-data-directory resource search
//! path.

use super::ntv2::Ntv2Grid;
use super::{BaseGrid, Grid};
use crate::error::Error;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Grid file kinds the cache knows how to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFormat {
    /// Binary NTv2 (`.gsb`) horizontal datum-shift grid.
    Ntv2,
    /// Gravsoft-format text geoid/deformation grid.
    Gravsoft,
}

/// An ordered, by-name, load-once cache of grid files.
///
/// Grids are looked up by file name across the configured search paths
/// the first time they're requested; subsequent requests hit the cache.
/// A failed lookup is not itself cached, so a grid dropped into a search
/// directory after startup is picked up on next request.
#[derive(Debug, Default)]
pub struct GridCache {
    paths: Vec<PathBuf>,
    loaded: Mutex<HashMap<String, Arc<dyn Grid>>>,
}

impl GridCache {
    /// A cache searching only `.`, used when the `std-dirs` feature is
    /// disabled.
    #[must_use]
    pub fn new() -> GridCache {
        GridCache {
            paths: vec![PathBuf::from(".")],
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// A cache searching `.` plus the OS-specific user data directory
    /// under a `ctscore` subdirectory.
    #[cfg(feature = "std-dirs")]
    #[must_use]
    pub fn with_default_paths() -> GridCache {
        let mut paths = vec![PathBuf::from(".")];
        if let Some(mut data_dir) = dirs::data_local_dir() {
            data_dir.push("ctscore");
            paths.push(data_dir);
        }
        GridCache {
            paths,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_paths(paths: Vec<PathBuf>) -> GridCache {
        GridCache {
            paths,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a grid by file name, loading and caching it on first use.
    pub fn get(&self, name: &str, format: GridFormat) -> Result<Arc<dyn Grid>, Error> {
        if let Some(grid) = self.loaded.lock().unwrap().get(name) {
            log::debug!("grid cache hit for '{name}'");
            return Ok(grid.clone());
        }

        let bytes = self.read(name)?;
        let grid: Arc<dyn Grid> = match format {
            GridFormat::Ntv2 => Arc::new(Ntv2Grid::new(&bytes)?),
            GridFormat::Gravsoft => Arc::new(BaseGrid::gravsoft(&bytes)?),
        };
        log::info!("loaded grid '{name}'");
        self.loaded
            .lock()
            .unwrap()
            .insert(name.to_string(), grid.clone());
        Ok(grid)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, Error> {
        for dir in &self.paths {
            let candidate = dir.join(name);
            if let Ok(bytes) = std::fs::read(&candidate) {
                return Ok(bytes);
            }
        }
        log::warn!("grid '{name}' not found in any search path");
        Err(Error::InvalidGridFile {
            reason: format!("grid file '{name}' not found"),
        })
    }
}
