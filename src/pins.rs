// Packed input port.

use bitflags::bitflags;

bitflags! {
    #[derive(Default)]
    pub struct InputPins: u8 {
        const SCLK  = bit!(0);
        const COPI  = bit!(1);
        const NCS   = bit!(2);
    }
}

impl InputPins {
    // Build the input port from individual logic levels.
    pub fn from_levels(ncs: bool, copi: bool, sclk: bool) -> Self {
        let mut pins = InputPins::empty();
        pins.set(InputPins::NCS, ncs);
        pins.set(InputPins::COPI, copi);
        pins.set(InputPins::SCLK, sclk);
        pins
    }

    // Chip-select is active-low.
    pub fn selected(&self) -> bool {
        !self.contains(InputPins::NCS)
    }

    pub fn sclk(&self) -> bool {
        self.contains(InputPins::SCLK)
    }

    pub fn copi(&self) -> bool {
        self.contains(InputPins::COPI)
    }
}
