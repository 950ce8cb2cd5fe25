//! A `no_std` scanner walking command line tokens once, with on-demand lookahead and typed
//! conversion of the consumed values.
#![no_std]
#![deny(missing_docs)]

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
    };
}

pub mod convert;
pub mod scanner;

pub use convert::Permissive;
pub use scanner::{Cursor, Error, is_flag, is_number, scan, scan_with, tokens_equal};
