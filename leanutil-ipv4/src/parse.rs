//! Parser for the dotted-decimal text of an IPv4 address.

use core::str::FromStr;

use crate::Ipv4Address;

/// Defines the possible errors that may occur when parsing an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum ParseError {
    /// The input is empty.
    #[error("empty address")]
    Empty,

    /// An octet is empty or contains something else than decimal digits.
    #[error("invalid digit in octet")]
    InvalidDigit,

    /// An octet is greater than 255 or longer than three digits.
    #[error("octet out of range")]
    OctetOverflow,

    /// The address has more or less than four octets.
    #[error("expected four octets")]
    OctetCount,
}

impl FromStr for Ipv4Address {
    type Err = ParseError;

    /// Parse exactly four octets of one to three decimal digits, separated by single dots.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut value = 0u32;
        let mut count = 0usize;

        for part in s.split('.') {
            if count == 4 {
                return Err(ParseError::OctetCount);
            }

            value = (value << 8) | u32::from(parse_octet(part)?);
            count += 1;
        }

        if count != 4 {
            return Err(ParseError::OctetCount);
        }

        Ok(Ipv4Address::new(value))
    }
}

fn parse_octet(part: &str) -> Result<u8, ParseError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidDigit);
    }

    if part.len() > 3 {
        return Err(ParseError::OctetOverflow);
    }

    let value = part
        .bytes()
        .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));

    u8::try_from(value).map_err(|_| ParseError::OctetOverflow)
}
