// Cycle-level model of a serially programmed 16-channel output/PWM peripheral.
//
// A 16-bit SPI-style command stream fills five registers; every system clock
// the outputs are recomputed from those registers and one shared PWM counter.

#[macro_use]
mod utils;

mod config;
mod error;
mod output;
mod peripheral;
mod pins;
mod pwm;
mod regs;
mod spi;

pub mod testbench;

#[cfg(feature = "debug")]
pub mod debug;
#[cfg(feature = "debug")]
pub mod script;

pub use config::Config;
pub use error::{Error, Result};
pub use output::{Channel, OutputMux, Port, CHANNEL_COUNT};
pub use peripheral::Peripheral;
pub use pins::InputPins;
pub use pwm::PwmGenerator;
pub use regs::{RegDevice, Register, RegisterFile};
pub use spi::{DecoderState, DiscardReason, Frame, FrameOutcome, SpiDecoder, FRAME_BITS};
pub use testbench::{PwmMeasurement, Testbench};

// Top-level handle: the device with its clocking, driven at pin level.
pub struct SpiPwm {
    peripheral: Peripheral,
    config:     Config,
}

impl SpiPwm {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let mut peripheral = Peripheral::new(&config);
        peripheral.set_inputs(InputPins::NCS);
        Ok(SpiPwm {
            peripheral,
            config,
        })
    }

    // Advance one system clock.
    pub fn step(&mut self) {
        self.peripheral.tick();
    }

    pub fn run(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.peripheral.tick();
        }
    }

    pub fn set_ui_in(&mut self, val: u8) {
        self.peripheral.set_ui_in(val);
    }

    pub fn set_inputs(&mut self, pins: InputPins) {
        self.peripheral.set_inputs(pins);
    }

    pub fn set_reset_n(&mut self, level: bool) {
        self.peripheral.set_reset_n(level);
    }

    pub fn uo_out(&self) -> u8 {
        self.peripheral.uo_out()
    }

    pub fn uio_out(&self) -> u8 {
        self.peripheral.uio_out()
    }

    pub fn channel(&self, channel: Channel) -> bool {
        self.peripheral.channel(channel)
    }

    pub fn cycles(&self) -> u64 {
        self.peripheral.cycles()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn peripheral(&self) -> &Peripheral {
        &self.peripheral
    }

    #[cfg(feature = "debug")]
    pub fn get_state(&self) -> debug::PeripheralState {
        self.peripheral.get_state()
    }
}
