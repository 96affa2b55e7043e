// Serial command decoder.
//
// Shifts COPI in on each SCLK rising edge while nCS is low and hands
// back a `FrameOutcome` once the 16th bit arrives. Releasing nCS at any
// point drops the partial frame.

pub mod frame;

pub use frame::{DiscardReason, Frame, FrameOutcome, FRAME_BITS};

use log::trace;

use crate::pins::InputPins;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecoderState {
    Idle,
    Shifting {
        bits:   u8,
        shift:  u16,
    },
    // Frame consumed, waiting for nCS release.
    Commit,
}

pub struct SpiDecoder {
    state:      DecoderState,
    last_sclk:  bool,
}

impl SpiDecoder {
    pub fn new() -> Self {
        SpiDecoder {
            state:      DecoderState::Idle,
            last_sclk:  false,
        }
    }

    // Call once per system clock with the sampled input port.
    pub fn clock(&mut self, pins: InputPins) -> Option<FrameOutcome> {
        let rising = pins.sclk() && !self.last_sclk;
        self.last_sclk = pins.sclk();

        if !pins.selected() {
            if let DecoderState::Shifting { bits, .. } = self.state {
                trace!("nCS released after {} bits, frame dropped", bits);
            }
            self.state = DecoderState::Idle;
            return None;
        }

        if !rising {
            return None;
        }

        let (bits, shift) = match self.state {
            DecoderState::Idle => (0, 0),
            DecoderState::Shifting { bits, shift } => (bits, shift),
            DecoderState::Commit => return None,
        };

        let shift = (shift << 1) | (pins.copi() as u16);
        let bits = bits + 1;

        if bits == FRAME_BITS {
            self.state = DecoderState::Commit;
            Some(Frame::from_bits(shift).decode())
        } else {
            self.state = DecoderState::Shifting { bits, shift };
            None
        }
    }

    // Held in reset: track SCLK but accept nothing.
    pub fn hold_reset(&mut self, pins: InputPins) {
        self.last_sclk = pins.sclk();
        self.state = DecoderState::Idle;
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }
}
