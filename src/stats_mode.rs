use log::debug;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Which part of the report pipeline runs.
///
/// Selected by a leading `<file` or `>file` argument, which lets an
/// interactive session produce several reports from one statistics pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatsMode {
    /// Collect statistics and print the report.
    #[default]
    Everything,
    /// Collect statistics into the cache file, then stop.
    StatsOnly(PathBuf),
    /// Print the report from a previously written cache file.
    ReportOnly(PathBuf),
}

impl StatsMode {
    pub fn cache_file(&self) -> Option<&Path> {
        match self {
            StatsMode::Everything => None,
            StatsMode::StatsOnly(path) | StatsMode::ReportOnly(path) => Some(path),
        }
    }

    /// Remove a stale cache file before statistics are written into it.
    ///
    /// Runs before option parsing, so the cache is gone even when the rest
    /// of the command line is rejected. Returns whether a file was removed;
    /// a missing file is not an error.
    pub fn prepare(&self) -> io::Result<bool> {
        let StatsMode::StatsOnly(path) = self else {
            return Ok(false);
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Strip a leading `<file` / `>file` argument.
///
/// `args` includes the program name; only the argument right after it is
/// inspected.
pub fn split_stats_mode(mut args: Vec<OsString>) -> (StatsMode, Vec<OsString>) {
    let mode = match args.get(1).and_then(|a| a.to_str()) {
        Some(arg) if arg.starts_with('<') => Some(StatsMode::ReportOnly(PathBuf::from(&arg[1..]))),
        Some(arg) if arg.starts_with('>') => Some(StatsMode::StatsOnly(PathBuf::from(&arg[1..]))),
        _ => None,
    };
    let Some(mode) = mode else {
        return (StatsMode::Everything, args);
    };
    debug!("Stats mode: {:?}", mode);
    args.remove(1);
    (mode, args)
}
