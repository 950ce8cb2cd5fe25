//! A scanner for walking the command line tokens once, from left to right.

use core::str::FromStr;

use heapless::Vec;

use crate::convert::Permissive;

/// Defines the possible errors that may occur in the strict conversion mode.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The argument value is invalid, meaning that it cannot be converted to the destination
    /// type with [`str::parse`].
    #[error("invalid argument")]
    InvalidArgument,

    /// The argument value is missing, which occurs when the flag is the last token.
    #[error("missing argument")]
    MissingArgument,
}

/// Defines the position of a scan over the command line tokens.
///
/// The handler given to [`scan`] or [`scan_with`] receives the one and only cursor of the scan.
/// It can read the current token and consume the following ones as values of the current flag.
/// Consumed tokens are skipped by the scan.
#[derive(Debug)]
pub struct Cursor<'a, 's, S = ()> {
    argv: &'a [&'a str],
    index: usize,
    state: &'s mut S,
}

impl<'a, S> Cursor<'a, '_, S> {
    /// Position of the current token, starting from zero.
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of tokens in the scan.
    #[inline(always)]
    pub fn total(&self) -> usize {
        self.argv.len()
    }

    /// All the tokens in the scan, whatever the position.
    #[inline(always)]
    pub fn tokens(&self) -> &'a [&'a str] {
        self.argv
    }

    /// The current token.
    #[inline(always)]
    pub fn current(&self) -> &'a str {
        self.argv[self.index]
    }

    /// Evaluate if the current token is the first one, which is usually the program name.
    #[inline(always)]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// The tokens after the current one.
    #[inline(always)]
    pub fn remaining(&self) -> &'a [&'a str] {
        self.argv.get(self.index + 1..).unwrap_or_default()
    }

    /// Shared access to the caller state.
    #[inline(always)]
    pub fn state(&self) -> &S {
        &*self.state
    }

    /// Exclusive access to the caller state.
    #[inline(always)]
    pub fn state_mut(&mut self) -> &mut S {
        &mut *self.state
    }

    /// Retrieve the next token without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<&'a str> {
        self.argv.get(self.index + 1).copied()
    }

    /// Consume the next token. Return `None` and leave the cursor in place when the current
    /// token is the last one.
    pub fn request_next(&mut self) -> Option<&'a str> {
        let Some(token) = self.peek() else {
            trace!("no token after index {=usize}", self.index);
            return None;
        };

        self.index += 1;
        Some(token)
    }

    /// Consume the next token as an integer, or return `default` if there is none.
    ///
    /// Uses the permissive conversion: `"12abc"` gives `12` and `"abc"` gives `0`.
    #[inline]
    pub fn request_next_int(&mut self, default: i32) -> i32 {
        self.request_next_as(default)
    }

    /// Consume the next token as a float, or return `default` if there is none.
    ///
    /// Uses the permissive conversion: `"2.0f"` gives `2.0` and `"abc"` gives `0.0`.
    #[inline]
    pub fn request_next_float(&mut self, default: f32) -> f32 {
        self.request_next_as(default)
    }

    /// Consume the next token with the permissive conversion to `T`, or return `default` if
    /// there is none.
    pub fn request_next_as<T>(&mut self, default: T) -> T
    where
        T: Permissive,
    {
        self.request_next()
            .map(T::parse_permissive)
            .unwrap_or(default)
    }

    /// Try to consume and parse the next token with the strict conversion.
    ///
    /// The result is `Ok(None)` when there is no next token. The token is consumed even if it
    /// cannot be parsed.
    pub fn try_request_next<T>(&mut self) -> Result<Option<T>, Error>
    where
        T: FromStr,
    {
        self.request_next()
            .map(|token| token.parse::<T>().map_err(|_| Error::InvalidArgument))
            .transpose()
    }

    /// Consume and parse the next token with the strict conversion, which must exist.
    pub fn require_next<T>(&mut self) -> Result<T, Error>
    where
        T: FromStr,
    {
        self.try_request_next::<T>()?
            .ok_or(Error::MissingArgument)
    }

    /// Consume up to `SIZE` following tokens, stopping before the next flag.
    pub fn request_values<const SIZE: usize>(&mut self) -> Vec<&'a str, SIZE> {
        let mut out = Vec::new();

        while let Some(token) = self.peek() {
            if is_flag(token) || out.push(token).is_err() {
                break;
            }

            self.index += 1;
        }

        out
    }
}

/// Scan the tokens, calling `handler` once per token that has not been consumed.
///
/// Caller state is simply captured by the handler closure.
#[inline]
pub fn scan<'a>(argv: &'a [&'a str], handler: impl FnMut(&mut Cursor<'a, '_>)) {
    scan_with(argv, &mut (), handler);
}

/// Scan the tokens with an explicit state, reachable from the cursor given to `handler`.
pub fn scan_with<'a, S>(
    argv: &'a [&'a str],
    state: &mut S,
    mut handler: impl FnMut(&mut Cursor<'a, '_, S>),
) {
    trace!("scan over {=usize} tokens", argv.len());

    let mut cursor = Cursor {
        argv,
        index: 0,
        state,
    };

    while cursor.index < cursor.argv.len() {
        handler(&mut cursor);
        cursor.index += 1;
    }
}

/// Evaluate if two tokens are the same, byte per byte.
#[inline(always)]
pub fn tokens_equal(a: &str, b: &str) -> bool {
    a.as_bytes() == b.as_bytes()
}

/// Evaluate if the token looks like a flag, i.e. starts with a hyphen and is not a number.
#[inline(always)]
pub fn is_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-') && !is_number(token)
}

/// Evaluate if the token represents a number (e.g. `-2`, `2.`, `-2.5e1`).
pub fn is_number(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);

    let mut position_of_e = None;
    let mut have_seen_dot = false;

    for (i, c) in digits.bytes().enumerate() {
        match c {
            b'0'..=b'9' => {}

            // Exponent, OK if not the first character.
            b'e' | b'E' if position_of_e.is_none() && i > 0 => {
                position_of_e = Some(i);
            }

            // Dot, OK if unique, not the first character and before any exponent.
            b'.' if !have_seen_dot && position_of_e.is_none() && i > 0 => {
                have_seen_dot = true;
            }

            _ => return false,
        }
    }

    position_of_e.is_none_or(|pos| pos + 1 != digits.len())
}
