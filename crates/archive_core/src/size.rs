//! Human-readable size labels (`"2.5 МБ"`, `"750 KB"`) and their conversion to megabytes.

use crate::config::Locale;

const BYTES_PER_KB: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Unit suffix recognised in a size label.
pub enum SizeUnit {
    /// Kilobytes.
    Kilobytes,
    /// Megabytes.
    Megabytes,
    /// Gigabytes.
    Gigabytes,
}

impl SizeUnit {
    /// Multiplier that converts a value in this unit to megabytes.
    pub fn to_megabytes_factor(self) -> f64 {
        match self {
            Self::Kilobytes => 1.0 / BYTES_PER_KB,
            Self::Megabytes => 1.0,
            Self::Gigabytes => BYTES_PER_KB,
        }
    }

    /// Locale-specific suffix.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Kilobytes, Locale::Ru) => "КБ",
            (Self::Megabytes, Locale::Ru) => "МБ",
            (Self::Gigabytes, Locale::Ru) => "ГБ",
            (Self::Kilobytes, Locale::En) => "KB",
            (Self::Megabytes, Locale::En) => "MB",
            (Self::Gigabytes, Locale::En) => "GB",
        }
    }

    fn detect(suffix: &str) -> Option<Self> {
        let suffix = suffix.to_uppercase();
        if suffix.contains("МБ") || suffix.contains("MB") {
            Some(Self::Megabytes)
        } else if suffix.contains("КБ") || suffix.contains("KB") {
            Some(Self::Kilobytes)
        } else if suffix.contains("ГБ") || suffix.contains("GB") {
            Some(Self::Gigabytes)
        } else {
            None
        }
    }
}

/// Parses a size label into megabytes.
///
/// Returns `None` when the label has no leading number or no recognised unit.
pub fn parse_size_mb(label: &str) -> Option<f64> {
    let trimmed = label.trim();
    let numeric_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map(|(idx, c)| idx + c.len_utf8())
        .last()?;
    let value: f64 = trimmed[..numeric_len].parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let unit = SizeUnit::detect(&trimmed[numeric_len..])?;
    Some(value * unit.to_megabytes_factor())
}

/// Sums the megabyte value of every label; unparseable labels count as zero.
pub fn total_megabytes<'a>(labels: impl IntoIterator<Item = &'a str>) -> f64 {
    labels
        .into_iter()
        .map(|label| parse_size_mb(label).unwrap_or(0.0))
        .sum()
}

/// Formats a byte count as megabytes with two decimals (`"0.73 МБ"`).
pub fn format_bytes_as_mb(bytes: u64, locale: Locale) -> String {
    format_megabytes(bytes as f64 / BYTES_PER_KB / BYTES_PER_KB, locale)
}

/// Formats a megabyte value with two decimals and the locale suffix.
pub fn format_megabytes(mb: f64, locale: Locale) -> String {
    format!("{mb:.2} {}", SizeUnit::Megabytes.label(locale))
}
