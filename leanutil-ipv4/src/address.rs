//! An IPv4 address together with its dotted-decimal text.

use core::ffi::CStr;
use core::fmt;
use core::net::Ipv4Addr;

/// Size of the text buffer, i.e. the length of `"255.255.255.255"` plus the NUL terminator.
pub const TEXT_SIZE: usize = 16;

/// Defines an IPv4 address, stored both as an integer and as NUL-terminated dotted-decimal text.
///
/// The text is rendered once, at construction, into a fixed buffer. The address cannot be
/// modified afterwards, so the integer and the text always agree. Copies are plain bitwise
/// copies.
///
/// ```
/// use leanutil_ipv4::Ipv4Address;
///
/// let addr = Ipv4Address::new(0xC0A8_0001);
/// assert_eq!(addr.as_str(), "192.168.0.1");
/// assert_eq!(addr.value(), 0xC0A8_0001);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ipv4Address {
    value: u32,
    text: [u8; TEXT_SIZE],
    len: usize,
}

impl Ipv4Address {
    /// Size of the text buffer, terminator included.
    pub const SIZE: usize = TEXT_SIZE;

    /// Create an address from its integer value, most significant octet first.
    pub const fn new(value: u32) -> Self {
        let mut text = [0u8; TEXT_SIZE];
        let mut len = 0;

        len = write_octet(&mut text, len, (value >> 24) as u8);
        text[len] = b'.';
        len = write_octet(&mut text, len + 1, (value >> 16) as u8);
        text[len] = b'.';
        len = write_octet(&mut text, len + 1, (value >> 8) as u8);
        text[len] = b'.';
        len = write_octet(&mut text, len + 1, value as u8);

        // The longest text is 15 bytes, so `text[len]` is still the zero terminator.
        Ipv4Address { value, text, len }
    }

    /// Create an address from its four octets, in network order.
    #[inline]
    pub const fn from_octets(octets: [u8; 4]) -> Self {
        Self::new(u32::from_be_bytes(octets))
    }

    /// The integer value of the address.
    #[inline(always)]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// The four octets of the address, in network order.
    #[inline(always)]
    pub const fn octets(&self) -> [u8; 4] {
        self.value.to_be_bytes()
    }

    /// Length of the rendered text, without the terminator, from 7 (`0.0.0.0`) to 15
    /// (`255.255.255.255`).
    ///
    /// This is the actual length of this address, not the constant `SIZE - 1`.
    #[inline(always)]
    pub const fn length(&self) -> usize {
        self.len
    }

    /// The dotted-decimal text, without the terminator.
    #[inline]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.text[..self.len]).unwrap_or_default()
    }

    /// The dotted-decimal text, terminator included.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.text[..=self.len]
    }

    /// The dotted-decimal text as a C string.
    #[inline]
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_with_nul(self.as_bytes_with_nul()).unwrap_or_default()
    }
}

/// Render one octet at `pos`, without leading zeros, and return the position after it.
const fn write_octet(text: &mut [u8; TEXT_SIZE], mut pos: usize, x: u8) -> usize {
    if x >= 100 {
        text[pos] = b'0' + x / 100;
        pos += 1;
    }

    if x >= 10 {
        text[pos] = b'0' + x / 10 % 10;
        pos += 1;
    }

    text[pos] = b'0' + x % 10;
    pos + 1
}

impl Default for Ipv4Address {
    /// The unspecified address, `0.0.0.0`.
    fn default() -> Self {
        Self::new(0)
    }
}

impl From<u32> for Ipv4Address {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<[u8; 4]> for Ipv4Address {
    fn from(octets: [u8; 4]) -> Self {
        Self::from_octets(octets)
    }
}

impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self::new(u32::from(addr))
    }
}

impl From<Ipv4Address> for u32 {
    fn from(addr: Ipv4Address) -> Self {
        addr.value
    }
}

impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self {
        Ipv4Addr::from(addr.value)
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ipv4Address").field(&self.as_str()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Ipv4Address {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}
