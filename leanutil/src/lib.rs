//! leanutil, a `no_std` argument scanner and IPv4 formatter for constrained systems.
#![no_std]
#![deny(missing_docs)]

pub use leanutil_args as args;
pub use leanutil_ipv4 as ipv4;

pub use args::{Cursor, scan, scan_with, tokens_equal};
pub use ipv4::Ipv4Address;

/// Defines the possible errors that may occur during usage of the crate.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// An error comes from the strict conversion of a scanned argument.
    #[error(transparent)]
    Args(#[from] args::Error),

    /// An error comes from the parsing of an IPv4 address.
    #[error(transparent)]
    Ipv4(#[from] ipv4::ParseError),
}
