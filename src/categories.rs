use crate::error::CatalogError;

/// One label rule. Integer categories have `low == high`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub low: f64,
    pub high: f64,
    pub label: String,
}

impl CategoryRule {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn is_range(&self) -> bool {
        self.low != self.high
    }
}

/// Category labels of a raster map, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryLabels {
    pub title: String,
    rules: Vec<CategoryRule>,
}

impl CategoryLabels {
    pub fn new(title: impl Into<String>, rules: Vec<CategoryRule>) -> Self {
        Self {
            title: title.into(),
            rules,
        }
    }

    /// Parse a category file.
    ///
    /// Layout: `# <n> categories`, title, label format, four format
    /// coefficients, then one rule per line. Floating-point maps may use
    /// `low:high:label` ranges; for integer maps every rule is `cat:label`,
    /// so `5:100:apples` is category 5 labelled `100:apples`.
    pub fn parse(content: &str, floating_point: bool) -> Result<Self, CatalogError> {
        let mut lines = content.lines().enumerate().map(|(i, l)| (i + 1, l));

        let (line, header) = next_line(&mut lines, 1, "missing category count header")?;
        if !header.trim_start().starts_with('#') {
            return Err(CatalogError::Parse {
                line,
                reason: format!("expected '# <n> categories', found {:?}", header),
            });
        }

        let (_, title) = next_line(&mut lines, 2, "missing title")?;
        let _format = next_line(&mut lines, 3, "missing label format")?;

        let (line, coefficients) = next_line(&mut lines, 4, "missing format coefficients")?;
        let numeric = coefficients
            .split_whitespace()
            .filter(|s| s.parse::<f64>().is_ok())
            .count();
        if numeric != 4 {
            return Err(CatalogError::Parse {
                line,
                reason: format!("expected 4 format coefficients, found {:?}", coefficients),
            });
        }

        let mut rules = Vec::new();
        for (line, text) in lines {
            if text.trim().is_empty() {
                continue;
            }
            rules.push(parse_rule(text, floating_point).ok_or_else(|| CatalogError::Parse {
                line,
                reason: format!("invalid category rule {:?}", text),
            })?);
        }

        Ok(Self::new(title.trim(), rules))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Label at `index` in file order.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.rules.get(index).map(|r| r.label.as_str())
    }

    /// Label of the first rule covering `value`.
    pub fn label_for(&self, value: f64) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.contains(value))
            .map(|r| r.label.as_str())
    }

    pub fn has_ranges(&self) -> bool {
        self.rules.iter().any(CategoryRule::is_range)
    }
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    expected: usize,
    reason: &str,
) -> Result<(usize, &'a str), CatalogError> {
    lines.next().ok_or_else(|| CatalogError::Parse {
        line: expected,
        reason: reason.to_string(),
    })
}

fn parse_rule(text: &str, floating_point: bool) -> Option<CategoryRule> {
    let mut parts = text.splitn(3, ':');
    let first = parts.next()?.trim().parse::<f64>().ok()?;
    let second = parts.next()?;
    match (second.trim().parse::<f64>(), parts.next()) {
        (Ok(high), Some(label)) if floating_point => Some(CategoryRule {
            low: first.min(high),
            high: first.max(high),
            label: label.trim().to_string(),
        }),
        _ => {
            // "cat:label", where the label itself may hold colons
            let label = text.split_once(':')?.1;
            Some(CategoryRule {
                low: first,
                high: first,
                label: label.trim().to_string(),
            })
        }
    }
}
