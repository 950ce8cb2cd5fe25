//! A `no_std` IPv4 address formatter. An address is rendered once into a fixed 16-byte buffer
//! and never allocates.
#![no_std]
#![deny(missing_docs)]

pub mod address;
pub mod parse;

pub use address::{Ipv4Address, TEXT_SIZE};
pub use parse::ParseError;
