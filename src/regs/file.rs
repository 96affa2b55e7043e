use super::{RegDevice, Register};

use std::convert::TryFrom;

// The five configuration registers. Single owner of all output configuration.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    out_low:        u8,
    out_high:       u8,
    pwm_en_low:     u8,
    pwm_en_high:    u8,
    duty:           u8,
}

impl RegisterFile {
    pub fn new() -> Self {
        RegisterFile::default()
    }

    // Return every register to 0x00.
    pub fn reset(&mut self) {
        *self = RegisterFile::default();
    }

    pub fn get(&self, reg: Register) -> u8 {
        match reg {
            Register::OutLow    => self.out_low,
            Register::OutHigh   => self.out_high,
            Register::PwmEnLow  => self.pwm_en_low,
            Register::PwmEnHigh => self.pwm_en_high,
            Register::Duty      => self.duty,
        }
    }

    pub fn set(&mut self, reg: Register, val: u8) {
        match reg {
            Register::OutLow    => self.out_low = val,
            Register::OutHigh   => self.out_high = val,
            Register::PwmEnLow  => self.pwm_en_low = val,
            Register::PwmEnHigh => self.pwm_en_high = val,
            Register::Duty      => self.duty = val,
        }
    }

    #[inline]
    pub fn out_low(&self) -> u8 {
        self.out_low
    }

    #[inline]
    pub fn out_high(&self) -> u8 {
        self.out_high
    }

    #[inline]
    pub fn pwm_en_low(&self) -> u8 {
        self.pwm_en_low
    }

    #[inline]
    pub fn pwm_en_high(&self) -> u8 {
        self.pwm_en_high
    }

    #[inline]
    pub fn duty(&self) -> u8 {
        self.duty
    }
}

// Unimplemented addresses read as 0 and swallow writes.
impl RegDevice for RegisterFile {
    fn read(&self, addr: u8) -> u8 {
        match Register::try_from(addr) {
            Ok(reg) => self.get(reg),
            Err(_) => 0,
        }
    }

    fn write(&mut self, addr: u8, val: u8) {
        if let Ok(reg) = Register::try_from(addr) {
            self.set(reg, val);
        }
    }
}
