// Snapshot of the peripheral for the debug front end.

use std::fmt;

use crate::peripheral::Peripheral;
use crate::regs::Register;
use crate::spi::DecoderState;

pub struct PeripheralState {
    pub out_low:        u8,
    pub out_high:       u8,
    pub pwm_en_low:     u8,
    pub pwm_en_high:    u8,
    pub duty:           u8,

    pub decoder:        DecoderState,
    pub pwm_counter:    u32,
    pub pwm_period:     u32,

    pub ui_in:          u8,
    pub uo_out:         u8,
    pub uio_out:        u8,

    pub cycles:         u64
}

impl Peripheral {
    pub fn get_state(&self) -> PeripheralState {
        let regs = self.regs();
        PeripheralState {
            out_low:        regs.get(Register::OutLow),
            out_high:       regs.get(Register::OutHigh),
            pwm_en_low:     regs.get(Register::PwmEnLow),
            pwm_en_high:    regs.get(Register::PwmEnHigh),
            duty:           regs.get(Register::Duty),

            decoder:        self.decoder_state(),
            pwm_counter:    self.pwm_counter(),
            pwm_period:     self.pwm_period(),

            ui_in:          self.inputs().bits(),
            uo_out:         self.uo_out(),
            uio_out:        self.uio_out(),

            cycles:         self.cycles()
        }
    }
}

impl fmt::Display for PeripheralState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decoder = match self.decoder {
            DecoderState::Idle => "idle".to_string(),
            DecoderState::Shifting { bits, shift } => format!("shifting {:2} bits ({:04X})", bits, shift),
            DecoderState::Commit => "commit".to_string(),
        };
        write!(f, "out: {:02X} {:02X}  pwm_en: {:02X} {:02X}  duty: {:02X}\n\
                decoder: {}  counter: {}/{}\n\
                ui_in: {:03b}  uo_out: {:08b}  uio_out: {:08b}\n\
                cycle: {}",
                self.out_low, self.out_high, self.pwm_en_low, self.pwm_en_high, self.duty,
                decoder, self.pwm_counter, self.pwm_period,
                self.ui_in, self.uo_out, self.uio_out,
                self.cycles)
    }
}
