//! Version numbers for settings-file compatibility checks.
//!
//! Settings files carry a `review_version` marker such as `"5.0"`. Markers and
//! toolchain versions are compared on two readings of the same text:
//!
//! - the *major* component, the leading integer (`"5.3.1"` reads as 5)
//! - the *numeric* value, the leading decimal (`"5.3.1"` reads as 5.3)
//!
//! Text with no leading number reads as zero on both.

use crate::types::ConfigValue;

/// Get the version string of the running toolchain.
pub fn toolchain_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// A version marker reduced to the two components compatibility depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VersionNumber {
    pub major: i64,
    pub numeric: f64,
}

impl VersionNumber {
    pub fn parse(text: &str) -> Self {
        VersionNumber {
            major: leading_integer(text),
            numeric: leading_decimal(text),
        }
    }

    /// Read a marker from a configuration value.
    ///
    /// Numbers are taken as-is; everything else goes through its text form.
    pub fn from_value(value: &ConfigValue) -> Self {
        match value {
            ConfigValue::Integer(i) => VersionNumber {
                major: *i,
                numeric: *i as f64,
            },
            ConfigValue::Float(x) => VersionNumber {
                major: x.trunc() as i64,
                numeric: *x,
            },
            other => VersionNumber::parse(&other.to_string()),
        }
    }
}

/// Split off an optional sign and the run of ASCII digits that follows it.
fn split_number_prefix(text: &str) -> (&str, &str, &str) {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let (sign, rest) = text.split_at(sign_len);
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (digits, rest) = rest.split_at(digits_len);
    (sign, digits, rest)
}

fn leading_integer(text: &str) -> i64 {
    let (sign, digits, _) = split_number_prefix(text);
    if digits.is_empty() {
        return 0;
    }
    format!("{}{}", sign, digits).parse().unwrap_or(0)
}

fn leading_decimal(text: &str) -> f64 {
    let (sign, digits, rest) = split_number_prefix(text);
    if digits.is_empty() {
        return 0.0;
    }
    let fraction = rest
        .strip_prefix('.')
        .map(|after| {
            let len = after.bytes().take_while(u8::is_ascii_digit).count();
            &after[..len]
        })
        .unwrap_or_default();
    let literal = if fraction.is_empty() {
        format!("{}{}", sign, digits)
    } else {
        format!("{}{}.{}", sign, digits, fraction)
    };
    literal.parse().unwrap_or(0.0)
}
