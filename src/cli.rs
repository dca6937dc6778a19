use crate::config::DisplayFlags;
use clap::{ArgAction, ArgGroup, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Option keys that may also be given as bare `key=value` words.
const OPTION_KEYS: &[&str] = &[
    "map", "maps", "units", "null", "pl", "pw", "output", "nsteps", "mapset",
];

#[derive(Parser, Debug)]
#[command(name = "raster-report")]
#[command(about = "Report area and cell counts for raster map categories")]
#[command(version)]
#[command(disable_help_flag = true)]
#[command(group(ArgGroup::new("input").required(true).multiple(true).args(["positional_maps", "maps"])))]
pub struct Args {
    /// Raster map(s) to report on
    #[arg(value_name = "MAP", value_delimiter = ',')]
    pub positional_maps: Vec<String>,

    /// Raster map(s) to report on
    #[arg(long = "map", visible_alias = "maps", value_name = "NAME", value_delimiter = ',')]
    pub maps: Vec<String>,

    /// Units: mi(les), me(ters), k(ilometers), a(cres), h(ectares), c(ell_counts), p(ercent_cover)
    #[arg(long, value_name = "UNIT", value_delimiter = ',')]
    pub units: Vec<String>,

    /// Character representing no data cell value
    #[arg(long = "null", value_name = "STRING", default_value = "*")]
    pub null_marker: String,

    /// Page length (default: 0 lines)
    #[arg(long = "pl", value_name = "LINES", allow_hyphen_values = true)]
    pub page_length: Option<String>,

    /// Page width (default: 79 characters)
    #[arg(long = "pw", value_name = "CHARS", allow_hyphen_values = true)]
    pub page_width: Option<String>,

    /// Name of an output file to hold the report
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of fp subranges to collect stats from
    #[arg(long, value_name = "N", default_value = "255", allow_hyphen_values = true)]
    pub nsteps: String,

    /// Mapset directories searched for raster maps, in order
    #[arg(
        long = "mapset",
        value_name = "DIR",
        env = "RASTER_REPORT_MAPSETS",
        value_delimiter = ':',
        default_value = "."
    )]
    pub mapsets: Vec<PathBuf>,

    /// Quiet
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Suppress page headers
    #[arg(short = 'h')]
    pub suppress_headers: bool,

    /// Use formfeeds between pages
    #[arg(short = 'f')]
    pub formfeed: bool,

    /// Scientific format
    #[arg(short = 'e')]
    pub scientific: bool,

    /// Filter out all no data cells
    #[arg(short = 'n')]
    pub no_nulls: bool,

    /// Filter out cells where all maps have no data
    #[arg(short = 'N')]
    pub no_nulls_all: bool,

    /// Report for cats fp ranges (fp maps only)
    #[arg(short = 'C')]
    pub cat_ranges: bool,

    /// Read fp map as integer (use map's quant rules)
    #[arg(short = 'i')]
    pub as_int: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Args {
    /// Bare map names first, then `--map` values.
    pub fn map_names(&self) -> impl Iterator<Item = &str> {
        self.positional_maps
            .iter()
            .chain(&self.maps)
            .map(String::as_str)
    }

    pub fn flags(&self) -> DisplayFlags {
        DisplayFlags {
            quiet: self.quiet,
            suppress_headers: self.suppress_headers,
            use_formfeed: self.formfeed,
            scientific: self.scientific,
            filter_nodata_any: self.no_nulls,
            filter_nodata_all: self.no_nulls_all,
            use_category_ranges: self.cat_ranges,
            coerce_float_to_int: self.as_int,
        }
    }
}

/// Rewrite `key=value` words into `--key=value` for known option keys.
///
/// The first element is the program name and is left alone.
pub fn normalize_args(args: Vec<OsString>) -> Vec<OsString> {
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 {
                return arg;
            }
            match arg.to_str().and_then(|s| s.split_once('=')) {
                Some((key, _)) if OPTION_KEYS.contains(&key) => {
                    let mut long = OsString::from("--");
                    long.push(&arg);
                    long
                }
                _ => arg,
            }
        })
        .collect()
}
