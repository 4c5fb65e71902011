//! # Fixed-Width Number Formatting
//!
//! LS-DYNA reads keyword cards by column position, so every value is written
//! into a fixed-width field (10 characters by default), right-justified.
//! A value whose decimal text does not fit falls back to scientific notation;
//! integer digits are never cut.
//!
//! ## Rules
//!
//! - Non-finite and missing values format as zero of the requested kind
//!   (`0`, `0.0`, `0.000`, ...). `NaN` and `inf` never reach the text.
//! - Scientific form: 3 fractional mantissa digits, uppercase `E`, explicit
//!   sign, unpadded exponent (`1.000E+6`, `-2.500E-5`).
//! - If even the scientific form is too wide, mantissa digits are dropped
//!   until it fits (down to `-2E+308`, 7 characters).
//! - A shortest decimal form wider than the column (`0.30000000000000004`) is
//!   rounded to as many fractional digits as fit before going scientific.
//! - A fixed-decimal column never drifts more than 0.1% from a non-zero
//!   value: `fixed_decimal(4e-5, 4, 10)` is written `4.000E-5`, not `0.0000`.
//!
//! ## Example
//!
//! ```rust
//! use mathub_core::format::{fixed_decimal, fixed_int, fixed_width};
//!
//! assert_eq!(fixed_int(1001.0, 10), "      1001");
//! assert_eq!(fixed_decimal(0.0023, 4, 10), "    0.0023");
//! assert_eq!(fixed_width(2.5e7, 10), "  2.500E+7");
//! ```

/// Default LS-DYNA column width
pub const DEFAULT_WIDTH: usize = 10;

/// Mantissa digits used by the scientific fallback
const SCI_DIGITS: usize = 3;

/// Magnitudes at or above this use scientific notation in [`fixed_width`]
const SCI_UPPER: f64 = 1e6;

/// Non-zero magnitudes below this use scientific notation in [`fixed_width`]
const SCI_LOWER: f64 = 1e-4;

/// Largest relative rounding error accepted in a [`fixed_decimal`] column
const DECIMAL_TOLERANCE: f64 = 1e-3;

/// Right-justify text in `width` columns. Text wider than `width` is
/// returned unchanged.
pub fn pad_left(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}

/// Finite value or zero. Negative zero is folded into zero.
fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

/// Scientific notation with `digits` mantissa decimals: `1.235E+5`
fn scientific(value: f64, digits: usize) -> String {
    let raw = format!("{:.*e}", digits, value);
    // Rust renders `1.235e5` / `1.235e-5`; the exponent is always present
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}E{}{}", mantissa, sign, exp.abs())
        }
        None => raw,
    }
}

/// Scientific notation narrowed until it fits in `width`
fn scientific_fit(value: f64, width: usize) -> String {
    let mut digits = SCI_DIGITS;
    loop {
        let text = scientific(value, digits);
        if text.len() <= width || digits == 0 {
            return pad_left(&text, width);
        }
        digits -= 1;
    }
}

/// Decimal text rounded to the most fractional digits that fit in `width`,
/// trailing zeros trimmed. `None` when not even one fractional digit fits.
fn decimal_fit(value: f64, width: usize) -> Option<String> {
    // `{:.0}` of the truncated value keeps the sign, including `-0`
    let int_len = format!("{:.0}", value.trunc()).len();
    let decimals = width.checked_sub(int_len + 1).filter(|&d| d > 0)?;

    let text = format!("{:.*}", decimals, value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    (text.len() <= width).then(|| text.to_string())
}

/// Whether `text` reads back within [`DECIMAL_TOLERANCE`] of `value`
fn keeps_value(text: &str, value: f64) -> bool {
    match text.parse::<f64>() {
        Ok(shown) => value == 0.0 || ((shown - value) / value).abs() <= DECIMAL_TOLERANCE,
        Err(_) => false,
    }
}

/// Format any value in `width` columns using its shortest decimal form.
///
/// Falls back to scientific notation for non-zero magnitudes `>= 1e6` or
/// `< 1e-4`, and whenever the decimal text cannot be fitted into `width`.
pub fn fixed_width(value: f64, width: usize) -> String {
    fixed_width_opt(Some(value), width)
}

/// [`fixed_width`] for a value that may be missing
pub fn fixed_width_opt(value: Option<f64>, width: usize) -> String {
    let v = finite_or_zero(value);
    let magnitude = v.abs();
    if v != 0.0 && (magnitude >= SCI_UPPER || magnitude < SCI_LOWER) {
        return scientific_fit(v, width);
    }

    let text = v.to_string();
    if text.len() <= width {
        return pad_left(&text, width);
    }
    match decimal_fit(v, width) {
        Some(text) => pad_left(&text, width),
        None => scientific_fit(v, width),
    }
}

/// Format as an integer, truncating toward zero (never rounding).
///
/// `fixed_int(2.9, 10) == fixed_int(2.0, 10)` and
/// `fixed_int(-2.9, 10) == fixed_int(-2.0, 10)`.
pub fn fixed_int(value: f64, width: usize) -> String {
    fixed_int_opt(Some(value), width)
}

/// [`fixed_int`] for a value that may be missing
pub fn fixed_int_opt(value: Option<f64>, width: usize) -> String {
    let truncated = finite_or_zero(value).trunc();
    let v = if truncated == 0.0 { 0.0 } else { truncated };

    let text = format!("{:.0}", v);
    if text.len() > width {
        scientific_fit(v, width)
    } else {
        pad_left(&text, width)
    }
}

/// Format with exactly `decimals` fractional digits.
///
/// Text wider than `width` goes scientific. A non-zero value the rounding
/// would move by more than 0.1% is written in the [`fixed_width`] form.
pub fn fixed_decimal(value: f64, decimals: usize, width: usize) -> String {
    fixed_decimal_opt(Some(value), decimals, width)
}

/// [`fixed_decimal`] for a value that may be missing
pub fn fixed_decimal_opt(value: Option<f64>, decimals: usize, width: usize) -> String {
    let v = finite_or_zero(value);

    let text = format!("{:.*}", decimals, v);
    if text.len() > width {
        scientific_fit(v, width)
    } else if !keeps_value(&text, v) {
        fixed_width_opt(Some(v), width)
    } else {
        pad_left(&text, width)
    }
}

/// Plain `{:.N}` text for titles and filenames (non-finite becomes zero)
pub fn plain_decimal(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, finite_or_zero(Some(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_int_pads_and_truncates() {
        assert_eq!(fixed_int(1001.0, 10), "      1001");
        assert_eq!(fixed_int(2.9, 10), fixed_int(2.0, 10));
        assert_eq!(fixed_int(-2.9, 10), fixed_int(-2.0, 10));
        assert_eq!(fixed_int(-2.9, 10), "        -2");
        assert_eq!(fixed_int(-0.7, 10), "         0");
    }

    #[test]
    fn test_fixed_decimal() {
        assert_eq!(fixed_decimal(0.0023, 4, 10), "    0.0023");
        assert_eq!(fixed_decimal(13822.76, 1, 10), "   13822.8");
        assert_eq!(fixed_decimal(0.0, 1, 10), "       0.0");
        assert_eq!(fixed_decimal(-0.0, 1, 10), "       0.0");
    }

    #[test]
    fn test_non_finite_formats_as_zero() {
        assert_eq!(fixed_int(f64::NAN, 10), "         0");
        assert_eq!(fixed_decimal(f64::INFINITY, 3, 10), "     0.000");
        assert_eq!(fixed_width(f64::NEG_INFINITY, 10), "         0");
        assert_eq!(fixed_decimal_opt(None, 2, 10), "      0.00");
        assert_eq!(fixed_int_opt(None, 10), "         0");
    }

    #[test]
    fn test_scientific_fallback_thresholds() {
        assert_eq!(fixed_width(1e6, 10), "  1.000E+6");
        assert_eq!(fixed_width(999_999.0, 10), "    999999");
        assert_eq!(fixed_width(5e-5, 10), "  5.000E-5");
        assert_eq!(fixed_width(1e-4, 10), "    0.0001");
        assert_eq!(fixed_width(-2.5e-7, 10), " -2.500E-7");
    }

    #[test]
    fn test_power_of_ten_at_width_boundary() {
        // 10 digits fit exactly, 11 digits must not be cut to 10
        assert_eq!(fixed_int(1e9, 10), "1000000000");
        assert_eq!(fixed_int(1e10, 10), " 1.000E+10");
        assert_eq!(fixed_decimal(1e9, 1, 10), "  1.000E+9");
        assert_eq!(fixed_decimal(100_000.0, 4, 10), "  1.000E+5");
    }

    #[test]
    fn test_wide_exponent_drops_mantissa_digits() {
        let text = fixed_width(-1.5e-300, 10);
        assert_eq!(text, "-1.50E-300");
        assert_eq!(text.len(), 10);
    }

    #[test]
    fn test_scientific_rounding_carries() {
        assert_eq!(fixed_width(9_999_600.0, 10), "  1.000E+7");
    }

    #[test]
    fn test_long_fraction_is_rounded_to_fit() {
        assert_eq!(fixed_width(0.1 + 0.2, 10), "       0.3");
        assert_eq!(fixed_width(1.0 / 3.0, 10), "0.33333333");
        assert_eq!(fixed_width(-2.0 / 3.0, 10), "-0.6666667");
        assert_eq!(fixed_width(123456.0 + 1.0 / 7.0, 10), "123456.143");
        // rounding carries into the integer part
        assert_eq!(fixed_width(9.999999999999, 10), "        10");
    }

    #[test]
    fn test_decimal_fit_needs_a_fractional_digit() {
        assert_eq!(decimal_fit(999_999.5, 8), Some("999999.5".to_string()));
        assert_eq!(decimal_fit(-999_999.5, 8), None);
        assert_eq!(fixed_width(-999_999.5, 8), "-1.00E+6");
    }

    #[test]
    fn test_small_values_are_not_rounded_away() {
        assert_eq!(fixed_decimal(4e-5, 4, 10), "  4.000E-5");
        assert_eq!(fixed_decimal(1.5e-4, 4, 10), "   0.00015");
        assert_eq!(fixed_decimal(-0.00035, 3, 10), "  -0.00035");
        assert_eq!(fixed_decimal(0.175, 2, 10), "     0.175");
    }

    #[test]
    fn test_exact_decimals_are_kept() {
        assert_eq!(fixed_decimal(1e-4, 4, 10), "    0.0001");
        assert_eq!(fixed_decimal(0.002, 4, 10), "    0.0020");
        assert_eq!(fixed_decimal(0.0049096, 7, 10), " 0.0049096");
        assert_eq!(fixed_decimal(0.2, 2, 10), "      0.20");
    }
}
