// Bit twiddling helpers

macro_rules! bit {
    ($bit_num:expr) => {
        (1 << $bit_num) as u8
    };
}

macro_rules! test_bit {
    ($val:expr, $bit_num:expr) => {
        ($val & bit!($bit_num)) != 0
    };
}

// Join a high and low byte into a 16-bit word.
macro_rules! make_16 {
    ($hi:expr, $lo:expr) => {
        (($hi as u16) << 8) | ($lo as u16)
    };
}
