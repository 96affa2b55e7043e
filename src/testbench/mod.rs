// Stimulus driver.
//
// Bit-bangs command frames into a `Peripheral` with real SCLK timing and
// samples its outputs, the way an external SPI controller on the board
// would.

pub mod meter;

pub use meter::PwmMeasurement;

use log::debug;

use crate::config::Config;
use crate::error::Result;
use crate::output::Channel;
use crate::peripheral::Peripheral;
use crate::pins::InputPins;
use crate::spi::{Frame, FRAME_BITS};
use crate::SpiPwm;

// System clocks per half SCLK period (100 kHz SCLK at 10 MHz).
pub const HALF_SCLK_CYCLES: u32 = 50;
// Idle clocks after releasing nCS.
pub const SETTLE_CYCLES: u32 = 600;
// Clocks reset is held low, and then high, by `Testbench::reset`.
pub const RESET_CYCLES: u32 = 5;

pub struct Testbench {
    dut:        SpiPwm,

    half_sclk:  u32,
    settle:     u32,
}

impl Testbench {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Testbench::attach(SpiPwm::new(config)?))
    }

    // Drive an existing device.
    pub fn attach(mut dut: SpiPwm) -> Self {
        dut.set_inputs(InputPins::NCS);
        Testbench {
            dut,
            half_sclk:  HALF_SCLK_CYCLES,
            settle:     SETTLE_CYCLES,
        }
    }

    // Overrides the SCLK half period, in system clocks.
    pub fn with_half_sclk(mut self, cycles: u32) -> Self {
        self.half_sclk = cycles.max(1);
        self
    }

    // Overrides the idle time after each frame, in system clocks.
    pub fn with_settle(mut self, cycles: u32) -> Self {
        self.settle = cycles;
        self
    }

    pub fn reset(&mut self) {
        self.dut.set_inputs(InputPins::NCS);
        self.dut.set_reset_n(false);
        self.clock(RESET_CYCLES);
        self.dut.set_reset_n(true);
        self.clock(RESET_CYCLES);
    }

    pub fn clock(&mut self, cycles: u32) {
        self.dut.run(cycles);
    }

    // Drives reset low without clocking, for tests that hold it.
    pub fn set_reset_n(&mut self, level: bool) {
        self.dut.set_reset_n(level);
    }

    pub fn send_frame(&mut self, frame: Frame) {
        debug!("sending {}", frame);
        self.send_bits(frame, FRAME_BITS);
    }

    // Shifts the first `bits` bits of the frame, then releases nCS.
    pub fn send_partial(&mut self, frame: Frame, bits: u8) {
        debug!("sending {} aborted after {} bits", frame, bits);
        self.send_bits(frame, bits.min(FRAME_BITS));
    }

    pub fn write(&mut self, address: u8, data: u8) -> Result<()> {
        self.send_frame(Frame::write(address, data)?);
        Ok(())
    }

    pub fn read(&mut self, address: u8, data: u8) -> Result<()> {
        self.send_frame(Frame::read(address, data)?);
        Ok(())
    }

    pub fn measure(&mut self, channel: Channel) -> PwmMeasurement {
        meter::measure(self, channel)
    }

    pub fn uo_out(&self) -> u8 {
        self.dut.uo_out()
    }

    pub fn uio_out(&self) -> u8 {
        self.dut.uio_out()
    }

    pub fn dut(&self) -> &Peripheral {
        self.dut.peripheral()
    }

    pub fn handle(&self) -> &SpiPwm {
        &self.dut
    }

    pub fn config(&self) -> &Config {
        self.dut.config()
    }
}

// Internal functions
impl Testbench {
    fn send_bits(&mut self, frame: Frame, bits: u8) {
        self.dut.set_inputs(InputPins::from_levels(false, false, false));
        self.clock(1);

        for n in 0..bits {
            let bit = frame.wire_bit(n);
            self.dut.set_inputs(InputPins::from_levels(false, bit, false));
            self.clock(self.half_sclk);
            self.dut.set_inputs(InputPins::from_levels(false, bit, true));
            self.clock(self.half_sclk);
        }

        self.dut.set_inputs(InputPins::from_levels(true, false, false));
        self.clock(self.settle);
    }
}
