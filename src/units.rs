use crate::error::{ReportError, Result};
use log::debug;
use std::fmt;

/// Maximum number of units a single report may request.
pub const MAX_UNITS: usize = 10;

/// Unit a report column is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSpec {
    SquareMiles,
    SquareMeters,
    SquareKilometers,
    Acres,
    Hectares,
    CellCounts,
    PercentCover,
}

impl UnitSpec {
    /// Column heading used in report output.
    pub fn heading(self) -> &'static str {
        match self {
            UnitSpec::SquareMiles => "square miles",
            UnitSpec::SquareMeters => "square meters",
            UnitSpec::SquareKilometers => "square kilometers",
            UnitSpec::Acres => "acres",
            UnitSpec::Hectares => "hectares",
            UnitSpec::CellCounts => "cell counts",
            UnitSpec::PercentCover => "percent cover",
        }
    }
}

impl fmt::Display for UnitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Keywords in evaluation order. Prefixes overlap ("c" fits both
/// `cell_counts` and `counts`), so the order is observable and must not change.
const UNIT_KEYWORDS: &[(&str, usize, UnitSpec)] = &[
    ("miles", 2, UnitSpec::SquareMiles),
    ("meters", 2, UnitSpec::SquareMeters),
    ("kilometers", 1, UnitSpec::SquareKilometers),
    ("acres", 1, UnitSpec::Acres),
    ("hectares", 1, UnitSpec::Hectares),
    ("cell_counts", 1, UnitSpec::CellCounts),
    ("counts", 1, UnitSpec::CellCounts),
    ("percent_cover", 1, UnitSpec::PercentCover),
];

/// True if `token` is at least `min_len` long and is a prefix of `keyword`.
pub fn match_keyword(token: &str, keyword: &str, min_len: usize) -> bool {
    token.len() >= min_len && keyword.as_bytes().starts_with(token.as_bytes())
}

/// Resolve a unit token against the keyword table, first match wins.
pub fn resolve_unit(token: &str) -> Result<UnitSpec> {
    UNIT_KEYWORDS
        .iter()
        .find(|(keyword, min_len, _)| match_keyword(token, keyword, *min_len))
        .map(|&(keyword, _, unit)| {
            debug!("Unit token {:?} matched keyword {:?}", token, keyword);
            unit
        })
        .ok_or_else(|| ReportError::Usage(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_keywords() {
        assert_eq!(resolve_unit("miles").unwrap(), UnitSpec::SquareMiles);
        assert_eq!(resolve_unit("meters").unwrap(), UnitSpec::SquareMeters);
        assert_eq!(resolve_unit("kilometers").unwrap(), UnitSpec::SquareKilometers);
        assert_eq!(resolve_unit("acres").unwrap(), UnitSpec::Acres);
        assert_eq!(resolve_unit("hectares").unwrap(), UnitSpec::Hectares);
        assert_eq!(resolve_unit("cell_counts").unwrap(), UnitSpec::CellCounts);
        assert_eq!(resolve_unit("counts").unwrap(), UnitSpec::CellCounts);
        assert_eq!(resolve_unit("percent_cover").unwrap(), UnitSpec::PercentCover);
    }

    #[test]
    fn test_short_forms() {
        assert_eq!(resolve_unit("mi").unwrap(), UnitSpec::SquareMiles);
        assert_eq!(resolve_unit("me").unwrap(), UnitSpec::SquareMeters);
        assert_eq!(resolve_unit("k").unwrap(), UnitSpec::SquareKilometers);
        assert_eq!(resolve_unit("a").unwrap(), UnitSpec::Acres);
        assert_eq!(resolve_unit("h").unwrap(), UnitSpec::Hectares);
        assert_eq!(resolve_unit("c").unwrap(), UnitSpec::CellCounts);
        assert_eq!(resolve_unit("co").unwrap(), UnitSpec::CellCounts);
        assert_eq!(resolve_unit("p").unwrap(), UnitSpec::PercentCover);
        assert_eq!(resolve_unit("hect").unwrap(), UnitSpec::Hectares);
    }

    #[test]
    fn test_below_minimum_length() {
        // "m" is ambiguous between miles and meters, both need two characters
        assert!(matches!(resolve_unit("m"), Err(ReportError::Usage(_))));
        assert!(resolve_unit("").is_err());
    }

    #[test]
    fn test_longer_than_keyword_rejected() {
        assert!(resolve_unit("milesx").is_err());
        assert!(resolve_unit("acres2").is_err());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(resolve_unit("MI").is_err());
        assert!(resolve_unit("Acres").is_err());
    }

    #[test]
    fn test_non_prefix_rejected() {
        assert!(resolve_unit("x").is_err());
        assert!(resolve_unit("cells").is_err());
        assert!(resolve_unit("percent cover").is_err());
    }

    #[test]
    fn test_match_keyword() {
        assert!(match_keyword("mi", "miles", 2));
        assert!(!match_keyword("m", "miles", 2));
        assert!(!match_keyword("mileses", "miles", 2));
        assert!(match_keyword("c", "cell_counts", 1));
    }
}
