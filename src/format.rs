//! Float formatting in the style of C's `%g`.
//!
//! Rust's `Display` for `f64` prints the shortest round-trip representation,
//! which makes pipelines noisy (`0.30000000000000004`). Output here is
//! rounded to a fixed number of significant digits instead.

/// Significant digits used for single values and streamed values.
pub const VALUE_PRECISION: usize = 12;

/// Formats `value` like `printf("%.{precision}g")`.
pub fn general(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    let precision = precision.max(1);
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // `{:e}` rounds to the requested digits, so the exponent already
    // accounts for carries such as 9.99 -> 1.0e1.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Formats a value for output, keeping a trailing `.0` on integral values
/// so results always read as floats (`100.0`, `8.22200074586e+43`).
pub fn value(value: f64) -> String {
    let mut out = general(value, VALUE_PRECISION);
    if value.is_finite() && !out.contains(&['.', 'e'][..]) {
        out.push_str(".0");
    }
    out
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
