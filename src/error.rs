// Host-side errors.
//
// The peripheral itself has no fault channel: malformed frames are inert.
// These errors only come from configuring the model, building stimulus
// and parsing command scripts.

use displaydoc::Display;
use thiserror::Error;

// Error raised by the model's host-side surfaces.
#[derive(Display, Error, Debug)]
pub enum Error {
    /// System clock and carrier frequency must be non-zero.
    ZeroFrequency,
    /// Carrier of {carrier_hz} Hz leaves only {period} clocks per period at {sys_clock_hz} Hz (need 256).
    CarrierTooFast {
        sys_clock_hz: u32,
        carrier_hz: u32,
        period: u32,
    },
    /// Address 0x{0:02X} does not fit in 7 bits.
    AddressOutOfRange(u8),
    /// Channel {0} does not exist.
    InvalidChannel(u8),
    /// Unknown command: {0}
    UnknownCommand(String),
    /// Invalid argument: {0}
    InvalidArgument(String),
    /// Line {line}: {source}
    AtLine {
        line: usize,
        source: Box<Error>,
    },
    /// I/O error: {0}
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
