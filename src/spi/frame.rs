// 16-bit command frames: [W/R | ADDRESS(7) | DATA(8)], MSB first.

use crate::error::{Error, Result};
use crate::regs::Register;

use std::convert::TryFrom;
use std::fmt;

pub const FRAME_BITS: u8 = 16;

const WRITE_FLAG: u8 = bit!(7);
const ADDR_MASK: u8 = 0x7F;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    write:      bool,
    address:    u8,
    data:       u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardReason {
    ReadUnsupported,
    AddressOutOfRange(u8),
}

// What the decoder does with a complete frame. Only Commit has a visible effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Commit {
        register:   Register,
        data:       u8,
    },
    Discard(DiscardReason),
}

impl Frame {
    pub fn new(write: bool, address: u8, data: u8) -> Result<Self> {
        if address > ADDR_MASK {
            return Err(Error::AddressOutOfRange(address));
        }
        Ok(Frame { write, address, data })
    }

    pub fn write(address: u8, data: u8) -> Result<Self> {
        Frame::new(true, address, data)
    }

    pub fn read(address: u8, data: u8) -> Result<Self> {
        Frame::new(false, address, data)
    }

    pub fn from_bits(bits: u16) -> Self {
        let head = (bits >> 8) as u8;
        Frame {
            write:      test_bit!(head, 7),
            address:    head & ADDR_MASK,
            data:       bits as u8,
        }
    }

    pub fn to_bits(&self) -> u16 {
        let flag = if self.write { WRITE_FLAG } else { 0 };
        let head = flag | self.address;
        make_16!(head, self.data)
    }

    // The n-th bit on the wire, counting from 0 (MSB first).
    pub fn wire_bit(&self, n: u8) -> bool {
        debug_assert!(n < FRAME_BITS);
        (self.to_bits() >> (FRAME_BITS - 1 - n)) & 1 != 0
    }

    pub fn is_write(&self) -> bool {
        self.write
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn data(&self) -> u8 {
        self.data
    }

    pub fn decode(&self) -> FrameOutcome {
        if !self.write {
            return FrameOutcome::Discard(DiscardReason::ReadUnsupported);
        }
        match Register::try_from(self.address) {
            Ok(register) => FrameOutcome::Commit { register, data: self.data },
            Err(addr) => FrameOutcome::Discard(DiscardReason::AddressOutOfRange(addr)),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = if self.write { "W" } else { "R" };
        write!(f, "{} 0x{:02X} <- 0x{:02X}", op, self.address, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_layout() {
        let frame = Frame::write(0x01, 0xCC).unwrap();
        assert_eq!(frame.to_bits(), 0x81CC);
        assert!(frame.wire_bit(0));
        assert!(!frame.wire_bit(1));
        assert!(frame.wire_bit(7));
        assert!(frame.wire_bit(8));
        assert!(!frame.wire_bit(15));

        let frame = Frame::from_bits(0x3045);
        assert!(!frame.is_write());
        assert_eq!(frame.address(), 0x30);
        assert_eq!(frame.data(), 0x45);
    }

    #[test]
    fn wide_address_rejected() {
        assert!(matches!(Frame::write(0x80, 0), Err(Error::AddressOutOfRange(0x80))));
    }

    #[test]
    fn decode_outcomes() {
        assert_eq!(
            Frame::write(0x04, 0x80).unwrap().decode(),
            FrameOutcome::Commit { register: Register::Duty, data: 0x80 }
        );
        assert_eq!(
            Frame::write(0x30, 0xAA).unwrap().decode(),
            FrameOutcome::Discard(DiscardReason::AddressOutOfRange(0x30))
        );
        assert_eq!(
            Frame::read(0x00, 0xBE).unwrap().decode(),
            FrameOutcome::Discard(DiscardReason::ReadUnsupported)
        );
        assert_eq!(
            Frame::read(0x41, 0xEF).unwrap().decode(),
            FrameOutcome::Discard(DiscardReason::ReadUnsupported)
        );
    }
}
