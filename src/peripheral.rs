// The whole device: decoder -> register file -> generator -> output mux.

use log::{debug, trace};

use crate::config::Config;
use crate::output::{Channel, OutputMux, Port};
use crate::pins::InputPins;
use crate::pwm::PwmGenerator;
use crate::regs::RegisterFile;
use crate::spi::{DecoderState, FrameOutcome, SpiDecoder};

pub struct Peripheral {
    regs:       RegisterFile,
    decoder:    SpiDecoder,
    pwm:        PwmGenerator,

    inputs:     InputPins,
    reset_n:    bool,
    in_reset:   bool,

    cycles:     u64,
}

impl Peripheral {
    pub fn new(config: &Config) -> Self {
        Peripheral {
            regs:       RegisterFile::new(),
            decoder:    SpiDecoder::new(),
            pwm:        PwmGenerator::new(config),

            inputs:     InputPins::NCS,
            reset_n:    true,
            in_reset:   false,

            cycles:     0,
        }
    }

    // Drive the packed input port. Sampled on the next tick.
    pub fn set_ui_in(&mut self, val: u8) {
        self.inputs = InputPins::from_bits_truncate(val);
    }

    pub fn set_inputs(&mut self, pins: InputPins) {
        self.inputs = pins;
    }

    // Active-low reset level.
    pub fn set_reset_n(&mut self, level: bool) {
        self.reset_n = level;
    }

    // Advance one system clock.
    pub fn tick(&mut self) {
        self.cycles += 1;

        if !self.reset_n {
            if !self.in_reset {
                debug!("reset asserted at cycle {}", self.cycles);
                self.in_reset = true;
            }
            self.regs.reset();
            self.decoder.hold_reset(self.inputs);
            self.pwm.reset();
            return;
        }

        if self.in_reset {
            debug!("reset released at cycle {}", self.cycles);
            self.in_reset = false;
        }

        if let Some(outcome) = self.decoder.clock(self.inputs) {
            self.commit(outcome);
        }
        self.pwm.update();
    }

    pub fn uo_out(&self) -> u8 {
        self.port(Port::A)
    }

    pub fn uio_out(&self) -> u8 {
        self.port(Port::B)
    }

    pub fn port(&self, port: Port) -> u8 {
        OutputMux::port(&self.regs, port, self.pwm_level())
    }

    pub fn channel(&self, channel: Channel) -> bool {
        OutputMux::channel(&self.regs, channel, self.pwm_level())
    }

    pub fn pwm_level(&self) -> bool {
        self.pwm.level(self.regs.duty())
    }

    pub fn regs(&self) -> &RegisterFile {
        &self.regs
    }

    pub fn inputs(&self) -> InputPins {
        self.inputs
    }

    pub fn decoder_state(&self) -> DecoderState {
        self.decoder.state()
    }

    pub fn pwm_counter(&self) -> u32 {
        self.pwm.counter()
    }

    pub fn pwm_period(&self) -> u32 {
        self.pwm.period()
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

// Internal functions
impl Peripheral {
    fn commit(&mut self, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Commit { register, data } => {
                debug!("{} <- 0x{:02X}", register.name(), data);
                self.regs.set(register, data);
            },
            FrameOutcome::Discard(reason) => {
                trace!("frame discarded: {:?}", reason);
            },
        }
    }
}
