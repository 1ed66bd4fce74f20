//! Loose integer coercion for untyped inputs.
//!
//! Counters and codes often arrive as query-string text or as arbitrary JSON.
//! These helpers cast them to `i64` the forgiving way: malformed input turns
//! into a sane number instead of an error.

use serde_json::Value;

/// Cast any JSON value to an integer.
///
/// - integers pass through; floats truncate toward zero (saturating, NaN is 0)
/// - `true` is 1, `false` and `null` are 0
/// - strings: see [`coerce_str_int`]
/// - arrays and objects are 0 when empty, 1 otherwise
pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if n.as_u64().is_some() {
                i64::MAX
            } else {
                n.as_f64().map_or(0, |f| f as i64)
            }
        }
        Value::String(s) => coerce_str_int(s),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(map) => i64::from(!map.is_empty()),
    }
}

/// Cast text to an integer.
///
/// Numeric strings (see [`is_numeric`]) are parsed whole, so `"1e3"` is 1000
/// and `"7.9"` is 7. Anything else yields its leading integer prefix after
/// leading whitespace: `"12abc"` is 12, `"abc"` is 0.
pub fn coerce_str_int(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if is_numeric(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return i;
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return f as i64;
        }
    }
    leading_int(raw.trim_start())
}

/// Whether `raw` reads as a number: optional surrounding whitespace, an
/// optional sign, digits with an optional fraction, and an optional exponent.
pub fn is_numeric(raw: &str) -> bool {
    let bytes = raw.trim().as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn leading_int(raw: &str) -> i64 {
    let bytes = raw.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign_len..]);
    if digits == 0 {
        return 0;
    }

    let prefix = &raw[..sign_len + digits];
    prefix.parse::<i64>().unwrap_or(if bytes[0] == b'-' {
        i64::MIN
    } else {
        i64::MAX
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
