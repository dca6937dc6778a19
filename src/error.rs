use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unknown unit: {0}")]
    Usage(String),

    #[error("Raster map <{0}> not found")]
    NotFound(String),

    #[error("Unable to read fp range for raster map <{0}>")]
    RangeUnavailable(String),

    #[error("Unable to read category file of raster map <{name}@{mapset}>: {source}")]
    CategoriesUnavailable {
        name: String,
        mapset: String,
        #[source]
        source: CatalogError,
    },

    #[error("Only {0} units allowed")]
    TooManyUnits(usize),

    #[error("Illegal page length: {0}")]
    InvalidPageLength(String),

    #[error("Illegal page width: {0}")]
    InvalidPageWidth(String),

    #[error("{}: {source}", .path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No raster map given")]
    NoLayers,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures reading map metadata out of the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// The one recoverable input: a bad `nsteps` value falls back to the default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("nsteps has to be > 0; using nsteps={default} (got {token:?})")]
pub struct InvalidSubrangeCount {
    pub token: String,
    pub default: u32,
}

pub type Result<T> = std::result::Result<T, ReportError>;
