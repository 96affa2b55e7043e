// Per-channel selection between static level and PWM waveform.

use std::convert::TryFrom;
use std::fmt;

use crate::regs::RegisterFile;

pub const CHANNEL_COUNT: u8 = 16;
const CHANNELS_PER_PORT: u8 = 8;

// 8-bit output port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Port {
    // `uo_out`, channels 0-7.
    A,
    // `uio_out`, channels 8-15.
    B,
}

// One of the 16 output channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Channel(u8);

impl TryFrom<u8> for Channel {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < CHANNEL_COUNT {
            Ok(Channel(value))
        } else {
            Err(value)
        }
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Channel {
    // Builds a channel from a port and its bit position.
    pub fn on_port(port: Port, bit: u8) -> Option<Self> {
        if bit >= CHANNELS_PER_PORT {
            return None;
        }
        Some(match port {
            Port::A => Channel(bit),
            Port::B => Channel(bit + CHANNELS_PER_PORT),
        })
    }

    pub fn port(self) -> Port {
        if self.0 < CHANNELS_PER_PORT {
            Port::A
        } else {
            Port::B
        }
    }

    // Bit position within the owning port.
    pub fn bit(self) -> u8 {
        self.0 % CHANNELS_PER_PORT
    }

    pub fn all() -> impl Iterator<Item = Channel> {
        (0..CHANNEL_COUNT).map(Channel)
    }
}

// Combinational output stage.
pub struct OutputMux;

impl OutputMux {
    // Drives one port from its static bits, its enable mask and the shared waveform.
    pub fn drive(static_bits: u8, pwm_enable: u8, pwm_level: bool) -> u8 {
        let pwm_bits = if pwm_level { pwm_enable } else { 0 };
        (static_bits & !pwm_enable) | pwm_bits
    }

    pub fn port(regs: &RegisterFile, port: Port, pwm_level: bool) -> u8 {
        match port {
            Port::A => Self::drive(regs.out_low(), regs.pwm_en_low(), pwm_level),
            Port::B => Self::drive(regs.out_high(), regs.pwm_en_high(), pwm_level),
        }
    }

    pub fn channel(regs: &RegisterFile, channel: Channel, pwm_level: bool) -> bool {
        test_bit!(Self::port(regs, channel.port(), pwm_level), channel.bit())
    }
}
