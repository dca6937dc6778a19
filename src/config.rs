//! Resolution of command-line values into a validated [`ReportConfig`].
//!
//! Everything downstream of [`ReportConfig::from_args`] sees normalized
//! values only. Every invalid input is fatal except `nsteps`, which falls
//! back to [`DEFAULT_SUBRANGE_COUNT`] with a warning.

use crate::catalog::{MapLocation, RasterCatalog};
use crate::categories::CategoryLabels;
use crate::cli::Args;
use crate::error::{InvalidSubrangeCount, ReportError, Result};
use crate::stats_mode::StatsMode;
use crate::units::{self, UnitSpec, MAX_UNITS};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_PAGE_LENGTH: u32 = 0;
pub const DEFAULT_PAGE_WIDTH: u32 = 79;
pub const DEFAULT_SUBRANGE_COUNT: u32 = 255;
pub const DEFAULT_NULL_MARKER: &str = "*";

/// A raster map resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub name: String,
    pub location: MapLocation,
    pub is_floating_point: bool,
    /// Only meaningful when `is_floating_point`.
    pub min_value: f64,
    pub max_value: f64,
    pub categories: CategoryLabels,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayFlags {
    pub quiet: bool,
    pub suppress_headers: bool,
    pub use_formfeed: bool,
    pub scientific: bool,
    pub filter_nodata_any: bool,
    pub filter_nodata_all: bool,
    pub use_category_ranges: bool,
    pub coerce_float_to_int: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub length: u32,
    pub width: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            length: DEFAULT_PAGE_LENGTH,
            width: DEFAULT_PAGE_WIDTH,
        }
    }
}

/// Destination of the report.
#[derive(Debug)]
pub enum Sink {
    Stdout,
    File { path: PathBuf, file: File },
}

impl Sink {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Sink::Stdout => None,
            Sink::File { path, .. } => Some(path),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Stdout => io::stdout().write(buf),
            Sink::File { file, .. } => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush(),
            Sink::File { file, .. } => file.flush(),
        }
    }
}

/// Fully validated report settings.
#[derive(Debug)]
pub struct ReportConfig {
    pub layers: Vec<LayerSpec>,
    pub units: Vec<UnitSpec>,
    pub page: PageGeometry,
    pub sink: Sink,
    pub null_marker: String,
    pub subrange_count: u32,
    pub flags: DisplayFlags,
    pub stats_mode: StatsMode,
    /// Recovered input problems, already logged.
    pub warnings: Vec<InvalidSubrangeCount>,
}

impl ReportConfig {
    /// Resolve parsed arguments in one pass: layers, units, subrange count,
    /// page geometry, output sink, null marker.
    pub fn from_args<C: RasterCatalog>(
        args: &Args,
        stats_mode: StatsMode,
        catalog: &C,
    ) -> Result<Self> {
        let mut builder = ReportConfigBuilder::new(catalog, args.flags());
        builder.stats_mode(stats_mode);

        for name in args.map_names() {
            builder.resolve_layer(name)?;
        }
        for token in &args.units {
            builder.resolve_unit(token)?;
        }
        builder.resolve_subrange_count(&args.nsteps);
        builder.resolve_page_geometry(args.page_length.as_deref(), args.page_width.as_deref())?;
        builder.resolve_output_sink(args.output.as_deref())?;
        builder.null_marker(&args.null_marker);

        builder.finalize()
    }

    /// Write a description of the resolved layers and units to the sink.
    pub fn write_preamble(&mut self) -> io::Result<()> {
        let Self {
            layers, units, sink, ..
        } = self;

        for layer in layers.iter() {
            write!(sink, "{}", layer.location.qualified_name())?;
            if !layer.categories.title.is_empty() {
                write!(sink, " ({})", layer.categories.title)?;
            }
            if layer.is_floating_point {
                write!(sink, " fp range [{}, {}]", layer.min_value, layer.max_value)?;
            } else {
                write!(sink, " integer")?;
            }
            writeln!(sink, ", {} categories", layer.categories.len())?;
        }

        let headings: Vec<&str> = units.iter().map(|u| u.heading()).collect();
        if headings.is_empty() {
            writeln!(sink, "units: default")?;
        } else {
            writeln!(sink, "units: {}", headings.join(", "))?;
        }
        sink.flush()
    }
}

/// Accumulates resolved values until [`finalize`](Self::finalize).
pub struct ReportConfigBuilder<'c, C: RasterCatalog> {
    catalog: &'c C,
    flags: DisplayFlags,
    layers: Vec<LayerSpec>,
    units: Vec<UnitSpec>,
    page: PageGeometry,
    sink: Option<Sink>,
    null_marker: String,
    subrange_count: u32,
    stats_mode: StatsMode,
    warnings: Vec<InvalidSubrangeCount>,
}

impl<'c, C: RasterCatalog> ReportConfigBuilder<'c, C> {
    pub fn new(catalog: &'c C, flags: DisplayFlags) -> Self {
        Self {
            catalog,
            flags,
            layers: Vec::new(),
            units: Vec::new(),
            page: PageGeometry::default(),
            sink: None,
            null_marker: DEFAULT_NULL_MARKER.to_string(),
            subrange_count: DEFAULT_SUBRANGE_COUNT,
            stats_mode: StatsMode::Everything,
            warnings: Vec::new(),
        }
    }

    pub fn stats_mode(&mut self, mode: StatsMode) -> &mut Self {
        self.stats_mode = mode;
        self
    }

    pub fn null_marker(&mut self, marker: &str) -> &mut Self {
        self.null_marker = marker.to_string();
        self
    }

    /// Look up a raster map and append it to the layer list.
    pub fn resolve_layer(&mut self, name: &str) -> Result<&LayerSpec> {
        let location = self
            .catalog
            .locate(name)
            .ok_or_else(|| ReportError::NotFound(name.to_string()))?;

        let is_floating_point =
            !self.flags.coerce_float_to_int && self.catalog.is_floating_point(&location);

        let (min_value, max_value) = if is_floating_point {
            match self.catalog.read_fp_range(&location) {
                Ok(Some(range)) => range,
                Ok(None) => return Err(ReportError::RangeUnavailable(location.name.clone())),
                Err(e) => {
                    debug!("Reading range of <{}> failed: {}", location.name, e);
                    return Err(ReportError::RangeUnavailable(location.name.clone()));
                }
            }
        } else {
            (0.0, 0.0)
        };

        let categories = self.catalog.read_categories(&location).map_err(|source| {
            ReportError::CategoriesUnavailable {
                name: location.name.clone(),
                mapset: location.mapset.clone(),
                source,
            }
        })?;

        info!(
            "Raster map <{}>: {}, {} categories",
            location.qualified_name(),
            if is_floating_point { "floating point" } else { "integer" },
            categories.len()
        );

        self.layers.push(LayerSpec {
            name: location.name.clone(),
            location,
            is_floating_point,
            min_value,
            max_value,
            categories,
        });
        Ok(&self.layers[self.layers.len() - 1])
    }

    /// Match a unit token and append it to the unit list.
    pub fn resolve_unit(&mut self, token: &str) -> Result<UnitSpec> {
        let unit = units::resolve_unit(token)?;
        if self.units.len() >= MAX_UNITS {
            return Err(ReportError::TooManyUnits(MAX_UNITS));
        }
        self.units.push(unit);
        Ok(unit)
    }

    /// Validate page length and width; absent values keep their defaults.
    pub fn resolve_page_geometry(
        &mut self,
        length: Option<&str>,
        width: Option<&str>,
    ) -> Result<PageGeometry> {
        if let Some(token) = length {
            self.page.length = token
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|&n| n >= 0)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ReportError::InvalidPageLength(token.to_string()))?;
        }
        if let Some(token) = width {
            self.page.width = token
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|&n| n >= 1)
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ReportError::InvalidPageWidth(token.to_string()))?;
        }
        Ok(self.page)
    }

    /// Parse the fp subrange count. Never fails: invalid input is logged,
    /// recorded, and replaced by the default.
    pub fn resolve_subrange_count(&mut self, token: &str) -> u32 {
        self.subrange_count = match parse_subrange_count(token) {
            Ok(n) => n,
            Err(w) => {
                warn!("nsteps has to be > 0; using nsteps={}", w.default);
                self.warnings.push(w);
                DEFAULT_SUBRANGE_COUNT
            }
        };
        self.subrange_count
    }

    /// Open the report destination. `None` means standard output.
    pub fn resolve_output_sink(&mut self, path: Option<&Path>) -> Result<&Sink> {
        let sink = match path {
            None => Sink::Stdout,
            Some(path) => {
                let file = File::create(path).map_err(|source| ReportError::OutputOpen {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!("Writing report to {}", path.display());
                Sink::File {
                    path: path.to_path_buf(),
                    file,
                }
            }
        };
        Ok(&*self.sink.insert(sink))
    }

    pub fn finalize(self) -> Result<ReportConfig> {
        if self.layers.is_empty() {
            return Err(ReportError::NoLayers);
        }
        Ok(ReportConfig {
            layers: self.layers,
            units: self.units,
            page: self.page,
            sink: self.sink.unwrap_or(Sink::Stdout),
            null_marker: self.null_marker,
            subrange_count: self.subrange_count,
            flags: self.flags,
            stats_mode: self.stats_mode,
            warnings: self.warnings,
        })
    }
}

/// Strict parse of an `nsteps` value; must be a positive integer.
pub fn parse_subrange_count(token: &str) -> std::result::Result<u32, InvalidSubrangeCount> {
    token
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|&n| n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| InvalidSubrangeCount {
            token: token.to_string(),
            default: DEFAULT_SUBRANGE_COUNT,
        })
}
