// Clocking configuration.

use crate::error::{Error, Result};

// Minimum number of system clocks per PWM period, so every duty step is distinct.
const MIN_PERIOD: u32 = 256;

// Clocking of the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    // System clock driving the decoder and the PWM counter.
    pub sys_clock_hz: u32,
    // Target PWM carrier frequency.
    pub carrier_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sys_clock_hz: 10_000_000,
            carrier_hz: 3_000,
        }
    }
}

impl Config {
    pub fn new(sys_clock_hz: u32, carrier_hz: u32) -> Result<Self> {
        let config = Config { sys_clock_hz, carrier_hz };
        config.validate()?;
        Ok(config)
    }

    // Builds a config from optional command-line values, defaulting the rest.
    pub fn from_args(sys_clock: Option<&str>, carrier: Option<&str>) -> Result<Self> {
        let default = Config::default();
        let sys_clock_hz = match sys_clock {
            Some(s) => parse_hz(s)?,
            None => default.sys_clock_hz,
        };
        let carrier_hz = match carrier {
            Some(s) => parse_hz(s)?,
            None => default.carrier_hz,
        };
        Config::new(sys_clock_hz, carrier_hz)
    }

    // Checks that the derived PWM period is usable.
    pub fn validate(&self) -> Result<()> {
        if self.sys_clock_hz == 0 || self.carrier_hz == 0 {
            return Err(Error::ZeroFrequency);
        }
        let period = self.pwm_period();
        if period < MIN_PERIOD {
            return Err(Error::CarrierTooFast {
                sys_clock_hz: self.sys_clock_hz,
                carrier_hz: self.carrier_hz,
                period,
            });
        }
        Ok(())
    }

    // Counter wrap period in system clocks, rounded to the nearest integer.
    pub fn pwm_period(&self) -> u32 {
        if self.carrier_hz == 0 {
            return 0;
        }
        let clock = self.sys_clock_hz as u64;
        let carrier = self.carrier_hz as u64;
        ((clock + carrier / 2) / carrier) as u32
    }

    // Carrier frequency actually produced by the rounded period.
    pub fn carrier_actual_hz(&self) -> f64 {
        match self.pwm_period() {
            0 => 0.0,
            period => self.sys_clock_hz as f64 / period as f64,
        }
    }

    // Length of one system clock in nanoseconds.
    pub fn clock_period_ns(&self) -> f64 {
        1e9 / self.sys_clock_hz as f64
    }
}

fn parse_hz(s: &str) -> Result<u32> {
    s.trim().parse::<u32>()
        .map_err(|e| Error::InvalidArgument(format!("'{}': {}", s, e)))
}
