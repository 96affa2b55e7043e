// Register file and addressing

mod file;

pub use file::RegisterFile;

use std::convert::TryFrom;

// Anything addressable over the serial bus.
pub trait RegDevice {
    fn read(&self, addr: u8) -> u8;
    fn write(&mut self, addr: u8, val: u8);
}

// Implemented register addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    OutLow      = 0x00,
    OutHigh     = 0x01,
    PwmEnLow    = 0x02,
    PwmEnHigh   = 0x03,
    Duty        = 0x04,
}

impl Register {
    pub const ALL: [Register; 5] = [
        Register::OutLow,
        Register::OutHigh,
        Register::PwmEnLow,
        Register::PwmEnHigh,
        Register::Duty,
    ];

    pub fn addr(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::OutLow    => "OUT_LOW",
            Register::OutHigh   => "OUT_HIGH",
            Register::PwmEnLow  => "PWM_EN_LOW",
            Register::PwmEnHigh => "PWM_EN_HIGH",
            Register::Duty      => "DUTY",
        }
    }
}

impl TryFrom<u8> for Register {
    type Error = u8;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        match addr {
            0x00 => Ok(Register::OutLow),
            0x01 => Ok(Register::OutHigh),
            0x02 => Ok(Register::PwmEnLow),
            0x03 => Ok(Register::PwmEnHigh),
            0x04 => Ok(Register::Duty),
            other => Err(other),
        }
    }
}
