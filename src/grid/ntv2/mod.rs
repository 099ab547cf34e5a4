//! NTv2 binary grid-shift file support.

mod parser;
mod subgrid;

use self::subgrid::NODE_SIZE;
use super::{BaseGrid, Grid};
use crate::error::Error;
use parser::{NTv2Parser, HEADER_SIZE};
use std::collections::BTreeMap;

/// A parsed NTv2 (`.gsb`) grid: a tree of sub-grids, each a latitude/
/// longitude correction field in seconds-of-arc.
#[derive(Debug, Default, Clone)]
pub struct Ntv2Grid {
    subgrids: BTreeMap<String, BaseGrid>,
    lookup_table: BTreeMap<String, Vec<String>>,
}

impl Ntv2Grid {
    pub fn new(buf: &[u8]) -> Result<Self, Error> {
        let parser = NTv2Parser::new(buf.into());

        if !parser.cmp_str(0, "NUM_OREC") {
            return Err(Error::InvalidGridFile {
                reason: "not a NTv2 file".to_string(),
            });
        }

        let num_overview_records = parser.get_u32(8) as usize;
        if num_overview_records != 11 {
            return Err(Error::InvalidGridFile {
                reason: "bad overview header".to_string(),
            });
        }

        if !parser.cmp_str(56, "SECONDS") {
            return Err(Error::InvalidGridFile {
                reason: "grid units are not SECONDS".to_string(),
            });
        }

        let num_sub_grids = parser.get_u32(40) as usize;

        let mut subgrids = BTreeMap::new();
        let mut lookup_table: BTreeMap<String, Vec<String>> = BTreeMap::new();

        let mut offset = HEADER_SIZE;
        for _ in 0..num_sub_grids {
            let (name, parent, num_nodes, grid) = subgrid::ntv2_subgrid(&parser, offset)?;
            offset += HEADER_SIZE + num_nodes * NODE_SIZE;

            subgrids.insert(name.clone(), grid);
            lookup_table.entry(parent).or_default().push(name);
        }

        Ok(Self {
            subgrids,
            lookup_table,
        })
    }

    /// As defined by the `FGRID` subroutine in the NTv2 spec: descend from
    /// the roots (`PARENT == "NONE"`) to the deepest sub-grid containing
    /// the point.
    fn find_grid(&self, lon: f64, lat: f64, margin: f64) -> Option<&BaseGrid> {
        let mut current_id = "NONE".to_string();
        let mut queue = self.lookup_table.get(&current_id)?.clone();

        while let Some(child_id) = queue.pop() {
            let current_grid = self.subgrids.get(&child_id)?;
            if current_grid.contains(lon, lat, margin) {
                current_id = child_id;
                if let Some(children) = self.lookup_table.get(&current_id) {
                    queue = children.clone();
                    continue;
                }
                break;
            }
        }

        self.subgrids.get(&current_id)
    }
}

impl Grid for Ntv2Grid {
    fn bands(&self) -> usize {
        2
    }

    fn contains(&self, lon: f64, lat: f64, margin: f64) -> bool {
        self.find_grid(lon, lat, margin).is_some()
    }

    fn at(&self, lon: f64, lat: f64, margin: f64) -> Option<Vec<f64>> {
        self.find_grid(lon, lat, margin)?.at(lon, lat, margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_ntv2_buffer() {
        let buf = vec![0u8; 32];
        assert!(Ntv2Grid::new(&buf).is_err());
    }
}
