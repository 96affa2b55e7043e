// PWM carrier and duty measured on the output pins.

use std::convert::TryFrom;

use spipwm::{Channel, Config, Port, PwmMeasurement, Testbench};

const FREQ_MIN: f64 = 2970.0;
const FREQ_MAX: f64 = 3030.0;

fn bench() -> Testbench {
    let mut tb = Testbench::new(Config::default()).unwrap();
    tb.reset();
    tb
}

// Static and enable registers for the port owning the channel.
fn port_addrs(port: Port) -> (u8, u8) {
    match port {
        Port::A => (0x00, 0x02),
        Port::B => (0x01, 0x03),
    }
}

fn enable(tb: &mut Testbench, channel: Channel) {
    let (out, en) = port_addrs(channel.port());
    tb.write(out, 1 << channel.bit()).unwrap();
    tb.write(en, 1 << channel.bit()).unwrap();
}

fn disable(tb: &mut Testbench, channel: Channel) {
    let (out, en) = port_addrs(channel.port());
    tb.write(out, 0).unwrap();
    tb.write(en, 0).unwrap();
}

fn assert_carrier(m: &PwmMeasurement, channel: Channel) {
    assert!(
        FREQ_MIN <= m.frequency_hz && m.frequency_hz <= FREQ_MAX,
        "expected 3000 Hz +- 1% on channel {}, got {}", channel, m.frequency_hz
    );
}

#[test]
fn carrier_on_every_channel() {
    let mut tb = bench();
    tb.write(0x04, 0x80).unwrap();

    for channel in Channel::all() {
        enable(&mut tb, channel);
        let m = tb.measure(channel);
        assert_carrier(&m, channel);
        disable(&mut tb, channel);
    }
}

#[test]
fn duty_extremes_and_midpoint_on_every_channel() {
    let mut tb = bench();

    for channel in Channel::all() {
        enable(&mut tb, channel);

        tb.write(0x04, 0x00).unwrap();
        tb.clock(10_000);
        let m = tb.measure(channel);
        assert_eq!(m.duty, 0.0, "expected 0% duty on channel {}", channel);

        tb.write(0x04, 0x80).unwrap();
        tb.clock(10_000);
        let m = tb.measure(channel);
        assert!(0.499 <= m.duty && m.duty <= 0.501, "expected 50% duty on channel {}, got {}", channel, m.duty);

        tb.write(0x04, 0xFF).unwrap();
        tb.clock(10_000);
        let m = tb.measure(channel);
        assert_eq!(m.duty, 1.0, "expected 100% duty on channel {}", channel);

        disable(&mut tb, channel);
    }
}

#[test]
fn single_channel_half_duty() {
    let mut tb = bench();
    tb.write(0x02, 1 << 3).unwrap();
    tb.write(0x04, 0x80).unwrap();

    let ch3 = Channel::try_from(3).unwrap();
    let m = tb.measure(ch3);
    assert_carrier(&m, ch3);
    assert!((m.duty - 0.5).abs() < 0.001, "duty {}", m.duty);

    // Every other channel stays static low.
    for _ in 0..tb.dut().pwm_period() {
        tb.clock(1);
        assert_eq!(tb.uo_out() & !(1 << 3), 0);
        assert_eq!(tb.uio_out(), 0);
    }
}

#[test]
fn duty_follows_register_without_sticking() {
    let mut tb = bench();
    let ch = Channel::try_from(12).unwrap();
    tb.write(0x03, 1 << ch.bit()).unwrap();

    for &(duty, expected) in [(0x00, 0.0), (0xFF, 1.0), (0x00, 0.0), (0xFF, 1.0)].iter() {
        tb.write(0x04, duty).unwrap();
        let m = tb.measure(ch);
        assert!(m.is_stuck());
        assert_eq!(m.duty, expected, "duty register 0x{:02X}", duty);
    }

    tb.write(0x04, 0x01).unwrap();
    let m = tb.measure(ch);
    assert_carrier(&m, ch);
    assert!(m.duty > 0.0 && m.duty < 0.01, "duty {}", m.duty);
}

#[test]
fn measured_duty_is_linear() {
    let mut tb = bench();
    let ch = Channel::try_from(0).unwrap();
    tb.write(0x02, 0x01).unwrap();

    for &duty in [0x01_u8, 0x20, 0x40, 0x80, 0xC0, 0xCF, 0xFE].iter() {
        tb.write(0x04, duty).unwrap();
        let m = tb.measure(ch);
        assert_carrier(&m, ch);
        let ideal = duty as f64 / 256.0;
        assert!((m.duty - ideal).abs() < 0.001, "duty 0x{:02X}: got {} want {}", duty, m.duty, ideal);
    }
}

#[test]
fn enabled_channels_switch_together() {
    let mut tb = bench();
    tb.write(0x00, 0x0F).unwrap();
    tb.write(0x01, 0xF0).unwrap();
    tb.write(0x02, 0xFF).unwrap();
    tb.write(0x03, 0xFF).unwrap();
    tb.write(0x04, 0x40).unwrap();

    let mut high = 0;
    for _ in 0..tb.dut().pwm_period() {
        tb.clock(1);
        let a = tb.uo_out();
        assert!(a == 0x00 || a == 0xFF, "port A split: {:08b}", a);
        assert_eq!(a, tb.uio_out());
        if a == 0xFF {
            high += 1;
        }
    }
    assert_eq!(high, 0x40 * 3333 / 256);
}

#[test]
fn static_bits_hidden_under_pwm() {
    let mut tb = bench();
    tb.write(0x00, 0xFF).unwrap();
    tb.write(0x02, 0x0F).unwrap();
    // Duty still 0: enabled channels held low, the rest static high.
    for _ in 0..tb.dut().pwm_period() {
        tb.clock(1);
        assert_eq!(tb.uo_out(), 0xF0);
    }
}

#[test]
fn other_carrier_configuration() {
    let config = Config::new(10_000_000, 1_000).unwrap();
    let mut tb = Testbench::new(config).unwrap();
    tb.reset();
    tb.write(0x02, 0x01).unwrap();
    tb.write(0x04, 0x80).unwrap();
    let m = tb.measure(Channel::try_from(0).unwrap());
    assert!((m.frequency_hz - 1000.0).abs() < 1.0, "freq {}", m.frequency_hz);
    assert!((m.duty - 0.5).abs() < 0.001, "duty {}", m.duty);
}

#[test]
fn very_long_period_keeps_duty() {
    let config = Config::new(100_000_000, 1).unwrap();
    let mut tb = Testbench::new(config).unwrap();
    tb.reset();
    tb.write(0x02, 0x01).unwrap();
    tb.write(0x04, 0x80).unwrap();
    assert_eq!(tb.dut().pwm_period(), 100_000_000);
    // Still early in the first half of the period.
    assert_eq!(tb.uo_out(), 0x01);
    tb.write(0x04, 0x00).unwrap();
    assert_eq!(tb.uo_out(), 0x00);
}
