// Command scripts for the debug front end.
//
// One command per line, values in hex unless noted. Blank lines and lines
// starting with `#` are skipped.

use std::convert::TryFrom;

use crate::error::{Error, Result};
use crate::output::{Channel, Port};
use crate::regs::{RegDevice, Register};
use crate::spi::{Frame, FRAME_BITS};
use crate::testbench::Testbench;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Send(Frame),
    Abort(Frame, u8),
    Tick(u32),
    Measure(Channel),
    Reset,
    Print,
    Peek(u8),
    Help,
    Quit,
}

pub enum Step {
    Continue(Option<String>),
    Quit,
}

pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let args = line.split(':').map(str::trim).collect::<Vec<_>>();
    let command = match args.as_slice() {
        ["w", addr, data] => Command::Send(Frame::write(hex(addr)?, hex(data)?)?),
        ["r", addr, data] => Command::Send(Frame::read(hex(addr)?, hex(data)?)?),
        ["a", addr, data, bits] => {
            let bits = dec(bits)?;
            if bits >= FRAME_BITS as u32 {
                return Err(Error::InvalidArgument(format!("abort needs fewer than {} bits", FRAME_BITS)));
            }
            Command::Abort(Frame::write(hex(addr)?, hex(data)?)?, bits as u8)
        },
        ["t", cycles] => Command::Tick(dec(cycles)?),
        ["m", port, bit] => {
            let port = match *port {
                "a" => Port::A,
                "b" => Port::B,
                other => return Err(Error::InvalidArgument(format!("port '{}'", other))),
            };
            let bit = dec(bit)?;
            let bit = u8::try_from(bit).map_err(|_| Error::InvalidArgument(bit.to_string()))?;
            let channel = Channel::on_port(port, bit).ok_or(Error::InvalidChannel(bit))?;
            Command::Measure(channel)
        },
        ["reset"] => Command::Reset,
        ["p"] => Command::Print,
        ["p", addr] => Command::Peek(hex(addr)?),
        ["h"] => Command::Help,
        ["q"] => Command::Quit,
        _ => return Err(Error::UnknownCommand(line.to_string())),
    };

    Ok(Some(command))
}

pub fn execute(tb: &mut Testbench, command: Command) -> Step {
    let text = match command {
        Command::Send(frame) => {
            tb.send_frame(frame);
            None
        },
        Command::Abort(frame, bits) => {
            tb.send_partial(frame, bits);
            None
        },
        Command::Tick(cycles) => {
            tb.clock(cycles);
            None
        },
        Command::Measure(channel) => {
            let m = tb.measure(channel);
            Some(if m.is_stuck() {
                format!("ch{}: stuck {}", channel, m.duty as u8)
            } else {
                format!("ch{}: duty {:.4} freq {:.1} Hz", channel, m.duty, m.frequency_hz)
            })
        },
        Command::Reset => {
            tb.reset();
            None
        },
        Command::Print => Some(tb.dut().get_state().to_string()),
        Command::Peek(addr) => {
            let name = Register::try_from(addr).map(Register::name).unwrap_or("unimplemented");
            Some(format!("0x{:02X} {}: 0x{:02X}", addr, name, tb.dut().regs().read(addr)))
        },
        Command::Help => Some(help().to_string()),
        Command::Quit => return Step::Quit,
    };
    Step::Continue(text)
}

// Runs a whole script. Each line is parsed just before it runs; the first
// bad line stops the run, leaving earlier commands applied.
pub fn run<F: FnMut(String)>(tb: &mut Testbench, text: &str, mut emit: F) -> Result<()> {
    for (n, line) in text.lines().enumerate() {
        let command = match parse(line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => return Err(Error::AtLine { line: n + 1, source: Box::new(e) }),
        };
        match execute(tb, command) {
            Step::Continue(Some(text)) => emit(text),
            Step::Continue(None) => {},
            Step::Quit => break,
        }
    }
    Ok(())
}

pub fn help() -> &'static str {
    "w:a:d: Write data d to address a (hex).\n\
     r:a:d: Send a read frame (ignored by the device).\n\
     a:a:d:n: Start a write frame and release nCS after n bits.\n\
     t:n: Run n system clocks (decimal).\n\
     m:a:c / m:b:c: Measure PWM on bit c of port A (uo_out) or B (uio_out).\n\
     reset: Pulse reset.\n\
     p: Print the device state.\n\
     p:a: Print the register at address a (hex).\n\
     q: Quit."
}

fn hex(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|e| Error::InvalidArgument(format!("'{}': {}", s, e)))
}

fn dec(s: &str) -> Result<u32> {
    s.parse::<u32>().map_err(|e| Error::InvalidArgument(format!("'{}': {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn parses_commands() {
        assert_eq!(parse("w:00:F0").unwrap(), Some(Command::Send(Frame::write(0x00, 0xF0).unwrap())));
        assert_eq!(parse(" r:30:be ").unwrap(), Some(Command::Send(Frame::read(0x30, 0xBE).unwrap())));
        assert_eq!(parse("a:01:FF:7").unwrap(), Some(Command::Abort(Frame::write(0x01, 0xFF).unwrap(), 7)));
        assert_eq!(parse("t:30000").unwrap(), Some(Command::Tick(30000)));
        assert_eq!(parse("m:b:3").unwrap(), Some(Command::Measure(Channel::try_from(11).unwrap())));
        assert_eq!(parse("reset").unwrap(), Some(Command::Reset));
        assert_eq!(parse("p:04").unwrap(), Some(Command::Peek(0x04)));
        assert_eq!(parse("# comment").unwrap(), None);
        assert_eq!(parse("").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse("x"), Err(Error::UnknownCommand(_))));
        assert!(matches!(parse("w:80:00"), Err(Error::AddressOutOfRange(0x80))));
        assert!(matches!(parse("w:zz:00"), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse("m:c:0"), Err(Error::InvalidArgument(_))));
        assert!(matches!(parse("m:a:8"), Err(Error::InvalidChannel(8))));
        assert!(matches!(parse("a:00:00:16"), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn runs_a_script() {
        let mut tb = Testbench::new(Config::default()).unwrap();
        let script = "reset\nw:00:F0\nw:30:AA\na:00:0F:15\np\n";
        let mut printed = Vec::new();
        for line in script.lines() {
            if let Some(cmd) = parse(line).unwrap() {
                if let Step::Continue(Some(text)) = execute(&mut tb, cmd) {
                    printed.push(text);
                }
            }
        }
        assert_eq!(tb.uo_out(), 0xF0);
        assert_eq!(printed.len(), 1);
        assert!(printed[0].starts_with("out: F0 00"));
        match execute(&mut tb, Command::Peek(0x00)) {
            Step::Continue(Some(text)) => assert_eq!(text, "0x00 OUT_LOW: 0xF0"),
            _ => panic!("peek printed nothing"),
        }
        match execute(&mut tb, Command::Peek(0x30)) {
            Step::Continue(Some(text)) => assert_eq!(text, "0x30 unimplemented: 0x00"),
            _ => panic!("peek printed nothing"),
        }
        assert!(matches!(execute(&mut tb, Command::Quit), Step::Quit));
    }

    #[test]
    fn run_collects_output() {
        let mut tb = Testbench::new(Config::default()).unwrap();
        let mut printed = Vec::new();
        run(&mut tb, "reset\n\nw:01:3C\np:01\n", |t| printed.push(t)).unwrap();
        assert_eq!(tb.uio_out(), 0x3C);
        assert_eq!(printed, vec!["0x01 OUT_HIGH: 0x3C".to_string()]);
    }

    #[test]
    fn run_stops_at_bad_line() {
        let mut tb = Testbench::new(Config::default()).unwrap();
        let mut printed = Vec::new();
        let script = "reset\nw:00:0F\nw:00:zz\nw:00:F0\np:00\n";
        match run(&mut tb, script, |t| printed.push(t)) {
            Err(Error::AtLine { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(*source, Error::InvalidArgument(_)));
            },
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(tb.uo_out(), 0x0F);
        assert!(printed.is_empty());
    }

    #[test]
    fn run_stops_at_quit() {
        let mut tb = Testbench::new(Config::default()).unwrap();
        run(&mut tb, "reset\nq\nw:00:FF\n", |_| {}).unwrap();
        assert_eq!(tb.uo_out(), 0x00);
    }
}
