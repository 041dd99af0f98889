//! Fixed register payloads of the 3.7" controller

/// Single gray, grayscale compensation waveform. Loaded before every full refresh,
/// the update flags used here don't keep it across refreshes.
#[rustfmt::skip]
pub(crate) const LUT_1GRAY_GC: [u8; 105] = [
    0x2A, 0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 1
    0x05, 0x2A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 2
    0x2A, 0x15, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 3
    0x05, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 4
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 5
    0x00, 0x02, 0x03, 0x0A, 0x00, 0x02, 0x06, 0x0A, 0x05, 0x00, // 6
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 7
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 8
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 9
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 10
    0x22, 0x22, 0x22, 0x22, 0x22,
];

/// Pattern for both auto write commands during init
pub(crate) const AUTO_WRITE_PATTERN: [u8; 1] = [0xF7];

pub(crate) const GATE_VOLTAGE: [u8; 1] = [0x00];
pub(crate) const SOURCE_VOLTAGE: [u8; 3] = [0x41, 0xA8, 0x32];
pub(crate) const BOOSTER_SOFT_START: [u8; 5] = [0xAE, 0xC7, 0xC3, 0xC0, 0xC0];
/// Internal temperature sensor
pub(crate) const TEMPERATURE_SENSOR: [u8; 1] = [0x80];
pub(crate) const VCOM: [u8; 1] = [0x44];
/// Byte 5 (0x4F) switches to the 1 gray mode
pub(crate) const DISPLAY_OPTION: [u8; 10] =
    [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x4F, 0xFF, 0xFF, 0xFF, 0xFF];

/// X window in RAM address units, 0..=0x117 (280 sources)
pub(crate) const RAM_X_WINDOW: [u8; 4] = [0x00, 0x00, 0x17, 0x01];
/// Y window, 0..=0x1DF (480 gates)
pub(crate) const RAM_Y_WINDOW: [u8; 4] = [0x00, 0x00, 0xDF, 0x01];
pub(crate) const RAM_COUNTER_ORIGIN: [u8; 2] = [0x00, 0x00];

pub(crate) const SLEEP_BORDER: [u8; 1] = [0xF7];
pub(crate) const DEEP_SLEEP_MAGIC: [u8; 1] = [0xA5];

/// ms the reset line is held after every edge
pub(crate) const RESET_DELAY_MS: u32 = 30;
/// ms after the software reset
pub(crate) const SW_RESET_DELAY_MS: u32 = 300;
/// ms before entering deep sleep
pub(crate) const SLEEP_DELAY_MS: u32 = 500;
