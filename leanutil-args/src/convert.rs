//! Value conversions applied to looked-ahead tokens.
//!
//! Two modes are offered. The strict mode is plain [`str::parse`] and reports malformed text as
//! an error. The permissive mode, implemented here, follows the C `atol` and `atof` functions: it
//! reads the longest numeric prefix of the token and silently ignores whatever follows. A token
//! without any numeric prefix (e.g. `"abc"`) converts to zero. This is a deliberate quirk, kept so
//! that command lines written for C tools behave the same way.

/// Types that can be read from a token with the permissive conversion mode.
///
/// Integers are read as a 64-bit `long` first and then truncated to the target width, exactly
/// like assigning the result of `atol` to a narrower C integer.
pub trait Permissive: Sized {
    /// Convert the numeric prefix of `input`, never failing.
    fn parse_permissive(input: &str) -> Self;
}

macro_rules! make_permissive_impl {
    (long => $($target:ty),+) => {
        $(
            impl Permissive for $target {
                #[inline]
                fn parse_permissive(input: &str) -> Self {
                    parse_long(input) as $target
                }
            }
        )+
    };
    (double => $($target:ty),+) => {
        $(
            impl Permissive for $target {
                #[inline]
                fn parse_permissive(input: &str) -> Self {
                    parse_double(input) as $target
                }
            }
        )+
    };
}

make_permissive_impl!(long => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
make_permissive_impl!(double => f32, f64);

/// Permissive conversion to a 32-bit signed integer, like `atol` stored in an `int32_t`.
#[inline]
pub fn to_int(input: &str) -> i32 {
    i32::parse_permissive(input)
}

/// Permissive conversion to a single precision float, like `atof` stored in a `float`.
#[inline]
pub fn to_float(input: &str) -> f32 {
    f32::parse_permissive(input)
}

/// Read the leading integer of `input`.
///
/// Leading whitespace and a single sign are accepted. Digits are read up to the first other
/// character and the result saturates at the `i64` bounds, as `strtol` does.
pub fn parse_long(input: &str) -> i64 {
    let (negative, bytes) = split_sign(skip_space(input.as_bytes()));

    let mut value: i64 = 0;
    for b in bytes.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');

        // Accumulate towards the sign so that `i64::MIN` is reachable.
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }

    value
}

/// Read the leading floating point number of `input`.
///
/// Accepts decimal literals with an optional exponent, hexadecimal literals with an optional
/// binary exponent, `inf`, `infinity` and `nan` (case insensitive).
pub fn parse_double(input: &str) -> f64 {
    let (negative, bytes) = split_sign(skip_space(input.as_bytes()));

    let magnitude = parse_hex_prefix(bytes)
        .or_else(|| parse_special_prefix(bytes))
        .unwrap_or_else(|| parse_decimal_prefix(bytes));

    if negative { -magnitude } else { magnitude }
}

#[inline(always)]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_space(bytes: &[u8]) -> &[u8] {
    let n = bytes.iter().take_while(|b| is_space(**b)).count();
    &bytes[n..]
}

fn split_sign(bytes: &[u8]) -> (bool, &[u8]) {
    match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_decimal_prefix(bytes: &[u8]) -> f64 {
    let len = decimal_prefix_len(bytes);

    core::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn decimal_prefix_len(bytes: &[u8]) -> usize {
    let int_digits = count_digits(bytes);
    let mut len = int_digits;

    let mut frac_digits = 0;
    if bytes.get(len) == Some(&b'.') {
        frac_digits = count_digits(&bytes[len + 1..]);
        len += 1 + frac_digits;
    }

    // A lone dot is not a number.
    if int_digits + frac_digits == 0 {
        return 0;
    }

    // The exponent only counts when at least one digit follows it.
    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let mut start = len + 1;
        if matches!(bytes.get(start), Some(b'+' | b'-')) {
            start += 1;
        }

        let exp_digits = count_digits(&bytes[start..]);
        if exp_digits > 0 {
            len = start + exp_digits;
        }
    }

    len
}

fn parse_special_prefix(bytes: &[u8]) -> Option<f64> {
    let starts_with = |word: &[u8]| {
        bytes.len() >= word.len() && bytes[..word.len()].eq_ignore_ascii_case(word)
    };

    if starts_with(b"inf") {
        Some(f64::INFINITY)
    } else if starts_with(b"nan") {
        Some(f64::NAN)
    } else {
        None
    }
}

/// Hex digits kept in the mantissa, leading zeros excluded. 15 digits hold 60 bits, more than
/// the 53 bits of an `f64`.
const HEX_SIGNIFICANT_MAX: usize = 15;

fn parse_hex_prefix(bytes: &[u8]) -> Option<f64> {
    let bytes = match bytes {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => return None,
    };

    let mut mantissa = 0.0f64;
    let mut exponent = 0i32;
    let mut digits = 0usize;
    let mut significant = 0usize;
    let mut pos = 0usize;

    while let Some(d) = bytes.get(pos).and_then(|b| hex_value(*b)) {
        if significant < HEX_SIGNIFICANT_MAX {
            mantissa = mantissa * 16.0 + f64::from(d);
            if mantissa != 0.0 {
                significant += 1;
            }
        } else {
            exponent = exponent.saturating_add(4);
        }

        digits += 1;
        pos += 1;
    }

    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        while let Some(d) = bytes.get(pos).and_then(|b| hex_value(*b)) {
            // Fractional digits past the precision of the mantissa are dropped.
            if significant < HEX_SIGNIFICANT_MAX {
                mantissa = mantissa * 16.0 + f64::from(d);
                exponent = exponent.saturating_sub(4);
                if mantissa != 0.0 {
                    significant += 1;
                }
            }

            digits += 1;
            pos += 1;
        }
    }

    // `0x` without hex digits reads as the decimal `0` followed by garbage.
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'p' | b'P')) {
        let (negative, rest) = split_sign(&bytes[pos + 1..]);
        let n = count_digits(rest);

        if n > 0 {
            let e = rest[..n].iter().fold(0i32, |acc, b| {
                acc.saturating_mul(10).saturating_add(i32::from(b - b'0'))
            });

            exponent = if negative {
                exponent.saturating_sub(e)
            } else {
                exponent.saturating_add(e)
            };
        }
    }

    Some(scale_by_pow2(mantissa, exponent))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Compute `value * 2^exponent` without `std`.
fn scale_by_pow2(mut value: f64, exponent: i32) -> f64 {
    // Past this bound every finite mantissa has already overflowed or underflowed.
    let mut exponent = exponent.clamp(-2200, 2200);

    while exponent > 0 && value.is_finite() && value != 0.0 {
        value *= 2.0;
        exponent -= 1;
    }

    while exponent < 0 && value != 0.0 {
        value *= 0.5;
        exponent += 1;
    }

    value
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[test]
    fn it_should_read_plain_integers() {
        assert_that!(to_int("1"), eq(1));
        assert_that!(to_int("-42"), eq(-42));
        assert_that!(to_int("+7"), eq(7));
        assert_that!(to_int("0"), eq(0));
    }

    #[test]
    fn it_should_stop_integer_at_first_non_digit() {
        assert_that!(to_int("12abc"), eq(12));
        assert_that!(to_int("3.9"), eq(3));
        assert_that!(to_int("  \t-15 apples"), eq(-15));
    }

    #[test]
    fn it_should_read_zero_from_non_numeric_integer() {
        assert_that!(to_int("abc"), eq(0));
        assert_that!(to_int(""), eq(0));
        assert_that!(to_int("-"), eq(0));
        assert_that!(to_int("+-3"), eq(0));
    }

    #[test]
    fn it_should_truncate_long_to_int() {
        assert_that!(parse_long("4294967297"), eq(4_294_967_297));
        assert_that!(to_int("4294967297"), eq(1));
        assert_that!(to_int("2147483648"), eq(i32::MIN));
    }

    #[test]
    fn it_should_saturate_long() {
        assert_that!(parse_long("99999999999999999999"), eq(i64::MAX));
        assert_that!(parse_long("-99999999999999999999"), eq(i64::MIN));
        assert_that!(parse_long("-9223372036854775808"), eq(i64::MIN));
    }

    #[test]
    fn it_should_read_plain_floats() {
        assert_that!(to_float("2.0"), near(2.0, 1.0e-5));
        assert_that!(to_float("-0.5"), near(-0.5, 1.0e-5));
        assert_that!(to_float(".25"), near(0.25, 1.0e-5));
        assert_that!(to_float("3."), near(3.0, 1.0e-5));
        assert_that!(to_float("1.5e3"), near(1500.0, 1.0e-5));
        assert_that!(to_float("1E-2"), near(0.01, 1.0e-5));
    }

    #[test]
    fn it_should_stop_float_at_first_invalid_character() {
        assert_that!(to_float("2.0f"), near(2.0, 1.0e-5));
        assert_that!(to_float("1e"), near(1.0, 1.0e-5));
        assert_that!(to_float("1e+"), near(1.0, 1.0e-5));
        assert_that!(to_float("4.5.6"), near(4.5, 1.0e-5));
        assert_that!(to_float(" 8kg"), near(8.0, 1.0e-5));
    }

    #[test]
    fn it_should_read_zero_from_non_numeric_float() {
        assert_that!(to_float("abc"), eq(0.0));
        assert_that!(to_float("."), eq(0.0));
        assert_that!(to_float(""), eq(0.0));
        assert_that!(to_float("0x"), eq(0.0));
    }

    #[test]
    fn it_should_read_special_floats() {
        assert_that!(parse_double("inf"), eq(f64::INFINITY));
        assert_that!(parse_double("-Infinity"), eq(f64::NEG_INFINITY));
        assert_that!(parse_double("NaN").is_nan(), eq(true));
        assert_that!(parse_double("info"), eq(f64::INFINITY));
    }

    #[test]
    fn it_should_read_hex_floats() {
        assert_that!(parse_double("0x10"), eq(16.0));
        assert_that!(parse_double("0x1p3"), eq(8.0));
        assert_that!(parse_double("-0x1.8p1"), eq(-3.0));
        assert_that!(parse_double("0X.8"), eq(0.5));
        assert_that!(parse_double("0x1p-2"), eq(0.25));
    }

    #[test]
    fn it_should_read_long_hex_floats() {
        let mut fraction = [b'f'; 304];
        fraction[..4].copy_from_slice(b"0x1.");
        let fraction = core::str::from_utf8(&fraction).unwrap();

        assert_that!(parse_double(fraction), near(2.0, 1.0e-9));

        let mut integer = [b'f'; 308];
        integer[..2].copy_from_slice(b"0x");
        integer[302..].copy_from_slice(b"p-1200");
        let integer = core::str::from_utf8(&integer).unwrap();

        assert_that!(parse_double(integer), near(1.0, 1.0e-9));
    }

    #[test]
    fn it_should_skip_leading_zeros_of_hex_floats() {
        let mut zeros = [b'0'; 40];
        zeros[1] = b'x';
        zeros[39] = b'1';
        let zeros = core::str::from_utf8(&zeros).unwrap();

        assert_that!(parse_double(zeros), eq(1.0));
        assert_that!(parse_double("0x0.0000000000000000000001p88"), eq(1.0));
    }

    #[test]
    fn it_should_truncate_for_narrow_targets() {
        assert_that!(u8::parse_permissive("258"), eq(2));
        assert_that!(u32::parse_permissive("-1"), eq(u32::MAX));
        assert_that!(i64::parse_permissive("-5x"), eq(-5));
        assert_that!(f64::parse_permissive("2.5s"), eq(2.5));
    }
}
