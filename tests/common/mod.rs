use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use raster_report::catalog::{
    encode_fp_range, CATS_DIR, CELLHD_DIR, CELL_MISC_DIR, F_FORMAT_FILE, F_RANGE_FILE,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const LANDUSE_CATS: &str =
    "# 3 categories\nLand use\n\n0.00 0.00 0.00 0.00\n1:forest\n2:water\n3:urban\n";
pub const ELEVATION_CATS: &str =
    "# 2 categories\nElevation zones\n\n0.00 0.00 0.00 0.00\n0:1000:lowland\n1000:4000:upland\n";

/// A scratch mapset holding `elevation` (fp, range 0..4000) and `landuse` (integer).
pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub mapset: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        let mapset = root.join("PERMANENT");

        write_map(&mapset, "elevation", Some((0.0, 4000.0)), Some(ELEVATION_CATS));
        write_map(&mapset, "landuse", None, Some(LANDUSE_CATS));

        Self {
            _tmp: tmp,
            root,
            mapset,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("raster-report");
        cmd.current_dir(&self.root)
            .env_remove("RUST_LOG")
            .env("RASTER_REPORT_MAPSETS", &self.mapset);
        cmd
    }
}

/// Same layout `MapsetCatalog` reads; the unit-test helper in `catalog.rs`
/// writes it through the same constants.
pub fn write_map(mapset: &Path, name: &str, fp_range: Option<(f64, f64)>, cats: Option<&str>) {
    fs::create_dir_all(mapset.join(CELLHD_DIR)).expect("create cellhd");
    fs::write(mapset.join(CELLHD_DIR).join(name), "proj: 0\n").expect("write header");

    if let Some((min, max)) = fp_range {
        let misc = mapset.join(CELL_MISC_DIR).join(name);
        fs::create_dir_all(&misc).expect("create cell_misc");
        fs::write(misc.join(F_FORMAT_FILE), "type: double\n").expect("write f_format");
        fs::write(misc.join(F_RANGE_FILE), encode_fp_range(min, max)).expect("write f_range");
    }

    if let Some(cats) = cats {
        fs::create_dir_all(mapset.join(CATS_DIR)).expect("create cats");
        fs::write(mapset.join(CATS_DIR).join(name), cats).expect("write cats");
    }
}
