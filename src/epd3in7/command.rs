//! Register addresses and parameter encodings of the 3.7" controller
use crate::traits;

use bit_field::BitField;

/// Commands sent by this driver, named after the controller datasheet
///
/// Commands without a description only carry fixed payloads from
/// [constants](super::constants).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Gate count and scan order, see [GateScan]
    GateSetting = 0x01,
    /// Switches the analog supply off
    PowerOff = 0x02,
    GateVoltage = 0x03,
    GateVoltageSource = 0x04,
    /// Needs [DEEP_SLEEP_MAGIC](super::constants::DEEP_SLEEP_MAGIC), only a hardware reset wakes it up again
    DeepSleep = 0x07,
    BoosterSoftStartControl = 0x0C,
    /// Address counter direction, see [DataEntry]
    DataEntrySequence = 0x11,
    /// Registers back to their defaults, RAM is kept. Busy stays high meanwhile.
    SwReset = 0x12,
    TemperatureSensorSelection = 0x18,
    /// Runs the update sequence selected with [Command::DisplayUpdateSequenceSetting].
    /// Busy is high until the panel has been driven.
    DisplayUpdateSequence = 0x20,
    /// Steps of the update sequence, see [UpdateSequence]
    DisplayUpdateSequenceSetting = 0x22,
    /// Everything following goes into the black/white RAM
    WriteRam = 0x24,
    WriteVcomRegister = 0x2C,
    /// 105 byte waveform
    WriteLutRegister = 0x32,
    /// Selects the 1 gray or the 4 gray mode
    DisplayOption = 0x37,
    /// See [BorderWaveform]
    BorderWaveformControl = 0x3C,
    /// RAM window in x, in RAM address units
    SetRamXAddressStartEndPosition = 0x44,
    /// RAM window in y
    SetRamYAddressStartEndPosition = 0x45,
    AutoWriteRedRamRegularPattern = 0x46,
    AutoWriteBwRamRegularPattern = 0x47,
    /// Not in the datasheet, the vendor driver writes 0x00 here before every frame
    PrepareFrameUpload = 0x49,
    SetRamXAddressCounter = 0x4E,
    SetRamYAddressCounter = 0x4F,
    /// Border level while the panel sleeps
    SleepBorder = 0x50,
}

impl traits::Command for Command {
    fn address(self) -> u8 {
        self as u8
    }
}

/// Parameter of [Command::GateSetting]
pub(crate) struct GateScan {
    /// Number of gates driven
    pub gates: u16,
    pub interlaced: bool,
    /// Scan starts at G0
    pub g0_first: bool,
    /// Gates are scanned with increasing number
    pub ascending: bool,
}

impl GateScan {
    pub fn to_bytes(&self) -> [u8; 3] {
        let last_gate = self.gates.saturating_sub(1);
        let mut scan = 0u8;
        scan.set_bit(0, !self.ascending)
            .set_bit(1, !self.g0_first)
            .set_bit(2, self.interlaced);
        [last_gate as u8, (last_gate >> 8) as u8, scan]
    }
}

/// One step of the display update sequence, the value is its bit in [UpdateSequence]
#[allow(dead_code)]
#[derive(Copy, Clone)]
pub(crate) enum UpdateStep {
    DisableClock = 0,
    DisableAnalog = 1,
    Display = 2,
    /// Drives the panel with the 1 gray LUT
    DisplayMode2 = 3,
    LoadLut = 4,
    LoadTemperature = 5,
    EnableClock = 6,
    EnableAnalog = 7,
}

/// Parameter of [Command::DisplayUpdateSequenceSetting]
#[derive(Copy, Clone, Default)]
pub(crate) struct UpdateSequence(u8);

impl UpdateSequence {
    pub fn with(mut self, step: UpdateStep) -> Self {
        self.0.set_bit(step as usize, true);
        self
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Parameter of [Command::DataEntrySequence]
pub(crate) struct DataEntry {
    pub x_increments: bool,
    pub y_increments: bool,
    /// The counter moves along y first
    pub y_first: bool,
}

impl DataEntry {
    pub fn to_u8(&self) -> u8 {
        *0u8.set_bit(0, self.x_increments)
            .set_bit(1, self.y_increments)
            .set_bit(2, self.y_first)
    }
}

/// Where the border voltage comes from
#[allow(dead_code)]
#[derive(Copy, Clone)]
pub(crate) enum BorderSource {
    /// Follows the LUT transition
    Waveform = 0x0,
    FixLevel = 0x1,
    Vcom = 0x2,
}

#[allow(dead_code)]
#[derive(Copy, Clone)]
pub(crate) enum BorderLevel {
    Vss = 0x0,
    Vsh1 = 0x1,
    Vsl = 0x2,
    Vsh2 = 0x3,
}

/// Parameter of [Command::BorderWaveformControl]
pub(crate) struct BorderWaveform {
    pub source: BorderSource,
    pub level: BorderLevel,
    /// LUT used for the border transition
    pub lut: u8,
}

impl BorderWaveform {
    pub fn to_u8(&self) -> u8 {
        *0u8.set_bits(6..8, self.source as u8)
            .set_bits(4..6, self.level as u8)
            .set_bits(0..2, self.lut & 0x03)
    }
}
