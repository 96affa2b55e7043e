// Shared PWM waveform generator.
//
// One free-running counter and one duty value feed every channel, so all
// PWM-enabled outputs are phase-aligned and switch on the same tick.

use crate::config::Config;

const FULL_DUTY: u8 = 0xFF;

pub struct PwmGenerator {
    counter:    u32,
    period:     u32,
}

impl PwmGenerator {
    pub fn new(config: &Config) -> Self {
        PwmGenerator {
            counter:    0,
            period:     config.pwm_period().max(1),
        }
    }

    // Call every system clock.
    pub fn update(&mut self) {
        self.counter += 1;
        if self.counter >= self.period {
            self.counter = 0;
        }
    }

    // Held at zero while reset is asserted.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    // Waveform level for the given duty register value.
    pub fn level(&self, duty: u8) -> bool {
        self.counter < self.threshold(duty)
    }

    // Number of clocks per period the waveform is high.
    pub fn threshold(&self, duty: u8) -> u32 {
        match duty {
            FULL_DUTY => self.period,
            d => ((d as u64 * self.period as u64) / 256) as u32,
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn period(&self) -> u32 {
        self.period
    }
}
