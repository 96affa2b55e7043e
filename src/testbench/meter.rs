// PWM measurement by sampling a channel every system clock.

use super::Testbench;
use crate::output::Channel;

// Rising edges needed before averaging (gives two full periods).
const RISING_EDGES: usize = 3;
// 4 ms at 10 MHz.
const STUCK_TIMEOUT_NS: f64 = 4_000_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PwmMeasurement {
    // High time over period, 0.0 to 1.0.
    pub duty:           f64,
    pub frequency_hz:   f64,
}

impl PwmMeasurement {
    // A line with no edges within the timeout.
    fn stuck(level: bool) -> Self {
        PwmMeasurement {
            duty:           if level { 1.0 } else { 0.0 },
            frequency_hz:   0.0,
        }
    }

    pub fn is_stuck(&self) -> bool {
        self.frequency_hz == 0.0
    }
}

pub fn measure(tb: &mut Testbench, channel: Channel) -> PwmMeasurement {
    let clock_ns = tb.config().clock_period_ns();
    let timeout = (STUCK_TIMEOUT_NS / clock_ns) as u64;

    let mut rising: Vec<u64> = Vec::with_capacity(RISING_EDGES);
    let mut high_times: Vec<u64> = Vec::new();
    let mut last_rise: Option<u64> = None;
    let mut prev = tb.dut().channel(channel);
    let mut elapsed = 0_u64;

    while rising.len() < RISING_EDGES {
        tb.clock(1);
        elapsed += 1;
        let curr = tb.dut().channel(channel);

        if elapsed > timeout {
            return PwmMeasurement::stuck(curr);
        }

        if curr && !prev {
            rising.push(elapsed);
            last_rise = Some(elapsed);
        } else if !curr && prev {
            if let Some(rise) = last_rise {
                high_times.push(elapsed - rise);
            }
        }

        prev = curr;
    }

    let periods = rising.windows(2).map(|w| w[1] - w[0]).collect::<Vec<_>>();
    let avg_period = periods.iter().sum::<u64>() as f64 / periods.len() as f64;
    let avg_high = if high_times.is_empty() {
        0.0
    } else {
        high_times.iter().sum::<u64>() as f64 / high_times.len() as f64
    };

    PwmMeasurement {
        duty:           avg_high / avg_period,
        frequency_hz:   1e9 / (avg_period * clock_ns),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::convert::TryFrom;

    #[test]
    fn measures_half_duty() {
        let mut tb = Testbench::new(Config::default()).unwrap();
        tb.reset();
        tb.write(0x02, 0x01).unwrap();
        tb.write(0x04, 0x80).unwrap();
        let m = tb.measure(Channel::try_from(0).unwrap());
        assert!((2970.0..=3030.0).contains(&m.frequency_hz), "freq {}", m.frequency_hz);
        assert!((0.499..=0.501).contains(&m.duty), "duty {}", m.duty);
    }

    #[test]
    fn static_line_reports_stuck() {
        let mut tb = Testbench::new(Config::default()).unwrap();
        tb.write(0x00, 0x01).unwrap();
        let m = tb.measure(Channel::try_from(0).unwrap());
        assert!(m.is_stuck());
        assert_eq!(m.duty, 1.0);
        let m = tb.measure(Channel::try_from(1).unwrap());
        assert!(m.is_stuck());
        assert_eq!(m.duty, 0.0);
    }
}
