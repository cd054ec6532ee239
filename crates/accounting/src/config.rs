//! Ledger text layout configuration.

use core::str::FromStr;

pub const ACCOUNT_WIDTH_VAR: &str = "LEDGERKIT_ACCOUNT_WIDTH";
pub const AMOUNT_WIDTH_VAR: &str = "LEDGERKIT_AMOUNT_WIDTH";
pub const INDENT_VAR: &str = "LEDGERKIT_INDENT";
pub const MIN_SCALE_VAR: &str = "LEDGERKIT_MIN_SCALE";

/// Column layout used when rendering transactions as ledger text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerStyle {
    /// Account names are padded to this many columns.
    pub account_width: usize,
    /// Amounts are right-aligned in a field at least this wide.
    pub amount_width: usize,
    /// Spaces before each posting line.
    pub indent: usize,
    /// Amounts show at least this many fractional digits.
    pub min_scale: u32,
}

impl Default for LedgerStyle {
    fn default() -> Self {
        Self {
            account_width: 40,
            amount_width: 10,
            indent: 4,
            min_scale: 2,
        }
    }
}

impl LedgerStyle {
    /// Defaults overridden by `LEDGERKIT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns per variable name.
    ///
    /// A value that does not parse is logged and the default kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            account_width: setting(&lookup, ACCOUNT_WIDTH_VAR, defaults.account_width),
            amount_width: setting(&lookup, AMOUNT_WIDTH_VAR, defaults.amount_width),
            indent: setting(&lookup, INDENT_VAR, defaults.indent),
            min_scale: setting(&lookup, MIN_SCALE_VAR, defaults.min_scale),
        }
    }
}

fn setting<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + core::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{key}={raw:?} is not valid; using default {default}");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_ledger_layout() {
        let style = LedgerStyle::default();
        assert_eq!(style.account_width, 40);
        assert_eq!(style.amount_width, 10);
        assert_eq!(style.indent, 4);
        assert_eq!(style.min_scale, 2);
    }

    #[test]
    fn lookup_overrides_and_falls_back() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ACCOUNT_WIDTH_VAR, "30"),
            (AMOUNT_WIDTH_VAR, "wide"),
            (MIN_SCALE_VAR, " 4 "),
        ]);
        let style = LedgerStyle::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(style.account_width, 30);
        assert_eq!(style.amount_width, 10);
        assert_eq!(style.indent, 4);
        assert_eq!(style.min_scale, 4);
    }
}
