//! Caller-supplied locale data. The core passes this through to
//! formatters untouched; acquiring real locale data is the caller's
//! concern.

/// Locale facet data consumed by the built-in formatters when the `L`
/// flag is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub decimal_point: char,
    pub thousands_sep: char,
    pub true_name: String,
    pub false_name: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            decimal_point: '.',
            thousands_sep: ',',
            true_name: "true".to_owned(),
            false_name: "false".to_owned(),
        }
    }
}

impl Locale {
    pub fn new(
        decimal_point: char,
        thousands_sep: char,
        true_name: impl Into<String>,
        false_name: impl Into<String>,
    ) -> Self {
        Self {
            decimal_point,
            thousands_sep,
            true_name: true_name.into(),
            false_name: false_name.into(),
        }
    }
}
