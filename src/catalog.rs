use crate::categories::CategoryLabels;
use crate::error::CatalogError;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Mapset subdirectory holding one header file per map.
pub const CELLHD_DIR: &str = "cellhd";
/// Mapset subdirectory holding one category file per map.
pub const CATS_DIR: &str = "cats";
/// Mapset subdirectory holding a support directory per map.
pub const CELL_MISC_DIR: &str = "cell_misc";
/// Present in a map's support directory when the map is floating point.
pub const F_FORMAT_FILE: &str = "f_format";
/// Recorded value range of a floating-point map.
pub const F_RANGE_FILE: &str = "f_range";

/// Encode a value range the way it is stored in [`F_RANGE_FILE`].
pub fn encode_fp_range(min: f64, max: f64) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(&min.to_be_bytes());
    bytes[8..].copy_from_slice(&max.to_be_bytes());
    bytes
}

/// Where a raster map lives in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLocation {
    pub name: String,
    pub mapset: String,
    pub mapset_dir: PathBuf,
}

impl MapLocation {
    pub fn qualified_name(&self) -> String {
        format!("{}@{}", self.name, self.mapset)
    }
}

/// Lookup interface to the store holding raster maps and their metadata.
pub trait RasterCatalog {
    /// Find a map by plain or `name@mapset` qualified name.
    fn locate(&self, name: &str) -> Option<MapLocation>;

    fn is_floating_point(&self, map: &MapLocation) -> bool;

    /// Recorded value range, or `None` when no range was written.
    fn read_fp_range(&self, map: &MapLocation) -> io::Result<Option<(f64, f64)>>;

    fn read_categories(&self, map: &MapLocation) -> Result<CategoryLabels, CatalogError>;
}

/// Catalog over an ordered search path of mapset directories.
///
/// Each mapset keeps map headers in [`CELLHD_DIR`], category files in
/// [`CATS_DIR`], and per-map support files under `CELL_MISC_DIR/<name>/`.
#[derive(Debug, Clone)]
pub struct MapsetCatalog {
    search_path: Vec<PathBuf>,
}

impl MapsetCatalog {
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        for dir in &search_path {
            if !dir.is_dir() {
                warn!("Mapset directory {} does not exist", dir.display());
            }
        }
        Self { search_path }
    }

    fn misc_file(map: &MapLocation, element: &str) -> PathBuf {
        map.mapset_dir.join(CELL_MISC_DIR).join(&map.name).join(element)
    }
}

fn mapset_name(dir: &Path) -> String {
    // "." has no file name, fall back to the canonical directory
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .or_else(|| {
            dir.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| dir.display().to_string())
}

impl RasterCatalog for MapsetCatalog {
    fn locate(&self, name: &str) -> Option<MapLocation> {
        let (map, wanted_mapset) = match name.split_once('@') {
            Some((map, mapset)) => (map, Some(mapset)),
            None => (name, None),
        };
        if map.is_empty() || map.contains(['/', '\\']) {
            return None;
        }

        self.search_path
            .iter()
            .map(|dir| (dir, mapset_name(dir)))
            .filter(|(_, mapset)| wanted_mapset.map_or(true, |w| w == mapset.as_str()))
            .find(|(dir, _)| dir.join(CELLHD_DIR).join(map).is_file())
            .map(|(dir, mapset)| {
                debug!("Found raster map <{}> in mapset {}", map, mapset);
                MapLocation {
                    name: map.to_string(),
                    mapset,
                    mapset_dir: dir.clone(),
                }
            })
    }

    fn is_floating_point(&self, map: &MapLocation) -> bool {
        Self::misc_file(map, F_FORMAT_FILE).is_file()
    }

    fn read_fp_range(&self, map: &MapLocation) -> io::Result<Option<(f64, f64)>> {
        let path = Self::misc_file(map, F_RANGE_FILE);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        // Two big-endian doubles; an empty file marks an all-null map
        if bytes.len() < 16 {
            debug!("Range file {} holds no range", path.display());
            return Ok(None);
        }
        let mut min = [0u8; 8];
        let mut max = [0u8; 8];
        min.copy_from_slice(&bytes[0..8]);
        max.copy_from_slice(&bytes[8..16]);
        Ok(Some((f64::from_be_bytes(min), f64::from_be_bytes(max))))
    }

    fn read_categories(&self, map: &MapLocation) -> Result<CategoryLabels, CatalogError> {
        let path = map.mapset_dir.join(CATS_DIR).join(&map.name);
        let content = fs::read_to_string(&path)?;
        CategoryLabels::parse(&content, self.is_floating_point(map))
    }
}
