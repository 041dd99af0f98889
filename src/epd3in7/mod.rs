//! A simple Driver for the Waveshare 3.7" E-Ink Display via SPI
//!
//! The panel is 280x480 in its native orientation. It's used in landscape here:
//! drawing happens on a 480x280 [`Canvas`] which [`Epd3in7::render`] rotates
//! into the panel's memory layout while streaming it.
//!
//! Build with the help of documentation/code from [Waveshare](https://www.waveshare.com/wiki/3.7inch_e-Paper_HAT),
//!
//! # Example
//!
//!```rust, no_run
//!# use embedded_hal_mock::eh1::*;
//!# fn main() -> Result<(), embedded_hal::spi::ErrorKind> {
//!use epd3in7_sign::{epd3in7::*, prelude::*};
//!#
//!# let expectations = [];
//!# let mut spi = spi::Mock::new(&expectations);
//!# let expectations = [];
//!# let busy_in = digital::Mock::new(&expectations);
//!# let dc = digital::Mock::new(&expectations);
//!# let rst = digital::Mock::new(&expectations);
//!# let delay = delay::NoopDelay::new();
//!
//!// Setup EPD
//!let mut epd = Epd3in7::new(&mut spi, busy_in, dc, rst, delay, Config::default())
//!    .map_err(|_| embedded_hal::spi::ErrorKind::Other)?;
//!
//!let mut canvas = Canvas::default();
//!canvas.clear(Color::White);
//!canvas.fill_rect(20, 20, 100, 40, false);
//!
//!epd.render(&mut spi, &canvas)
//!    .map_err(|_| embedded_hal::spi::ErrorKind::Other)?;
//!
//!// Set the EPD to sleep
//!epd.power_down(&mut spi)
//!    .map_err(|_| embedded_hal::spi::ErrorKind::Other)?;
//!# Ok(())
//!# }
//!```
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};
use log::{debug, warn};

pub(crate) mod command;
mod constants;
pub mod remap;

use self::command::{
    BorderLevel, BorderSource, BorderWaveform, Command, DataEntry, GateScan, UpdateSequence,
    UpdateStep,
};
use self::constants::*;
pub use self::remap::FRAME_LEN;

use crate::buffer::{Packing, PixelBuffer};
use crate::config::Config;
use crate::error::ErrorKind;
use crate::interface::DisplayInterface;

/// Width of the display.
pub const WIDTH: u32 = 280;

/// Height of the display
pub const HEIGHT: u32 = 480;

/// Bytes of one native row
pub const WIDTH_BYTES: usize = 35;

/// Width of the landscape canvas
pub const CANVAS_WIDTH: u32 = HEIGHT;

/// Height of the landscape canvas
pub const CANVAS_HEIGHT: u32 = WIDTH;

const _: () = assert!(CANVAS_WIDTH == HEIGHT && CANVAS_HEIGHT == WIDTH);
const _: () = assert!(WIDTH_BYTES * 8 == WIDTH as usize);

/// Landscape drawing buffer, packed vertically as the remap expects it
pub type Canvas = PixelBuffer<CANVAS_WIDTH, CANVAS_HEIGHT, FRAME_LEN>;

/// Where the driver is in its command protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Nothing was sent yet
    Uninitialized,
    /// The reset line was toggled, configuration follows
    Resetting,
    /// The configuration sequence is running or was interrupted
    Configuring,
    /// Ready for the next command
    Idle,
    /// Waiting for the busy line after an update was triggered
    Busy,
    /// Streaming a white frame
    Clearing,
    /// Streaming a canvas
    ShowingFrame,
    /// Powered down, only a reset and a new init bring it back
    DeepSleep,
}

/// Epd3in7 driver
pub struct Epd3in7<SPI, BUSY, DC, RST, DELAY> {
    /// Connection Interface
    interface: DisplayInterface<SPI, BUSY, DC, RST, DELAY>,
    state: PanelState,
}

impl<SPI, BUSY, DC, RST, DELAY> Epd3in7<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new driver from a SPI peripheral, Busy InputPin, DC and RST
    ///
    /// This already initialises the device.
    pub fn new(
        spi: &mut SPI,
        busy: BUSY,
        dc: DC,
        rst: RST,
        delay: DELAY,
        config: Config,
    ) -> Result<Self, ErrorKind<SPI, BUSY, DC, RST>> {
        let mut epd = Epd3in7 {
            interface: DisplayInterface::new(busy, dc, rst, delay, config),
            state: PanelState::Uninitialized,
        };

        epd.initialize(spi)?;
        Ok(epd)
    }

    /// Current protocol state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Get the width of the display
    pub fn width(&self) -> u32 {
        WIDTH
    }

    /// Get the height of the display
    pub fn height(&self) -> u32 {
        HEIGHT
    }

    /// Reads the busy line
    pub fn is_busy(&mut self) -> Result<bool, ErrorKind<SPI, BUSY, DC, RST>> {
        self.interface.is_busy()
    }

    /// Forces the controller into its power on state
    ///
    /// Allowed in every state, the panel needs [initialize](Epd3in7::initialize) afterwards.
    pub fn reset(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        debug!("resetting 3.7\" panel");
        self.state = PanelState::Resetting;
        self.interface.reset(RESET_DELAY_MS)
    }

    /// This initialises the EPD and powers it up
    ///
    /// This function calls [reset](Epd3in7::reset),
    /// so you don't need to call reset your self when trying to wake your device up
    /// after setting it to sleep.
    pub fn initialize(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.reset()?;
        self.state = PanelState::Configuring;
        debug!("configuring 3.7\" panel");

        self.interface.cmd(spi, Command::SwReset)?;
        self.interface.delay_ms(SW_RESET_DELAY_MS);

        self.interface
            .cmd_with_data(spi, Command::AutoWriteRedRamRegularPattern, &AUTO_WRITE_PATTERN)?;
        self.interface.wait_until_idle()?;
        self.interface
            .cmd_with_data(spi, Command::AutoWriteBwRamRegularPattern, &AUTO_WRITE_PATTERN)?;
        self.interface.wait_until_idle()?;

        let gates = GateScan {
            gates: HEIGHT as u16,
            interlaced: false,
            g0_first: true,
            ascending: true,
        };
        self.interface
            .cmd_with_data(spi, Command::GateSetting, &gates.to_bytes())?;
        self.interface
            .cmd_with_data(spi, Command::GateVoltage, &GATE_VOLTAGE)?;
        self.interface
            .cmd_with_data(spi, Command::GateVoltageSource, &SOURCE_VOLTAGE)?;

        let entry = DataEntry {
            x_increments: true,
            y_increments: true,
            y_first: false,
        };
        self.interface
            .cmd_with_data(spi, Command::DataEntrySequence, &[entry.to_u8()])?;

        let border = BorderWaveform {
            source: BorderSource::Waveform,
            level: BorderLevel::Vss,
            lut: 3,
        };
        self.interface
            .cmd_with_data(spi, Command::BorderWaveformControl, &[border.to_u8()])?;

        self.interface
            .cmd_with_data(spi, Command::BoosterSoftStartControl, &BOOSTER_SOFT_START)?;

        self.interface
            .cmd_with_data(spi, Command::TemperatureSensorSelection, &TEMPERATURE_SENSOR)?;

        self.interface
            .cmd_with_data(spi, Command::WriteVcomRegister, &VCOM)?;

        self.interface
            .cmd_with_data(spi, Command::DisplayOption, &DISPLAY_OPTION)?;

        self.interface
            .cmd_with_data(spi, Command::SetRamXAddressStartEndPosition, &RAM_X_WINDOW)?;
        self.interface
            .cmd_with_data(spi, Command::SetRamYAddressStartEndPosition, &RAM_Y_WINDOW)?;

        let update = UpdateSequence::default()
            .with(UpdateStep::EnableAnalog)
            .with(UpdateStep::EnableClock)
            .with(UpdateStep::DisplayMode2)
            .with(UpdateStep::Display)
            .with(UpdateStep::DisableAnalog)
            .with(UpdateStep::DisableClock);
        self.interface
            .cmd_with_data(spi, Command::DisplayUpdateSequenceSetting, &[update.bits()])?;

        self.state = PanelState::Idle;
        Ok(())
    }

    /// Wakes the device up from deep sleep by running the whole init again
    pub fn wake_up(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.initialize(spi)
    }

    /// Loads the single gray waveform
    ///
    /// [clear](Epd3in7::clear) and [render](Epd3in7::render) already do this before every refresh.
    pub fn load_lut(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.ensure_idle()?;
        self.send_lut(spi)
    }

    /// Turns the whole panel white
    pub fn clear(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.ensure_idle()?;
        debug!("clearing 3.7\" panel");
        self.state = PanelState::Clearing;
        let result = self.clear_frame(spi);
        self.state = PanelState::Idle;
        result
    }

    /// Rotates the canvas into the panel layout, streams it and refreshes the panel
    pub fn render(
        &mut self,
        spi: &mut SPI,
        canvas: &Canvas,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.ensure_idle()?;
        if canvas.packing() != Packing::VerticalLsb {
            return Err(ErrorKind::UnsupportedPacking(canvas.packing()));
        }
        debug!("rendering canvas");
        self.state = PanelState::ShowingFrame;
        let result = self.show_frame(spi, remap::native_bytes(canvas.buffer()));
        self.state = PanelState::Idle;
        result
    }

    /// Streams a frame that already is in the native layout and refreshes the panel
    ///
    /// `frame` needs exactly [FRAME_LEN] bytes.
    pub fn render_native(
        &mut self,
        spi: &mut SPI,
        frame: &[u8],
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.ensure_idle()?;
        if frame.len() != FRAME_LEN {
            return Err(ErrorKind::BufferSize {
                expected: FRAME_LEN,
                actual: frame.len(),
            });
        }
        debug!("rendering native frame");
        self.state = PanelState::ShowingFrame;
        let result = self.show_frame(spi, frame.iter().copied());
        self.state = PanelState::Idle;
        result
    }

    /// Let the device enter deep-sleep mode to save power.
    ///
    /// Every further command fails with [ErrorKind::InvalidState] until
    /// [wake_up](Epd3in7::wake_up) or [initialize](Epd3in7::initialize) ran.
    pub fn power_down(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.ensure_idle()?;
        debug!("powering down 3.7\" panel");
        self.interface.delay_ms(SLEEP_DELAY_MS);
        let result = self.enter_deep_sleep(spi);
        // a half sent sleep sequence leaves the controller undefined
        self.state = match result {
            Ok(()) => PanelState::DeepSleep,
            Err(_) => PanelState::Uninitialized,
        };
        result
    }

    /// Gives back the owned busy, dc, rst pins and the delay
    pub fn release(self) -> (BUSY, DC, RST, DELAY) {
        self.interface.release()
    }

    pub(crate) fn delay_ms(&mut self, ms: u32) {
        self.interface.delay_ms(ms);
    }

    fn ensure_idle(&self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        if self.state == PanelState::Idle {
            Ok(())
        } else {
            warn!("command rejected in state {:?}", self.state);
            Err(ErrorKind::InvalidState(self.state))
        }
    }

    fn send_lut(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.interface
            .cmd_with_data(spi, Command::WriteLutRegister, &LUT_1GRAY_GC)
    }

    fn set_ram_counter(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.interface
            .cmd_with_data(spi, Command::SetRamXAddressCounter, &RAM_COUNTER_ORIGIN)?;
        self.interface
            .cmd_with_data(spi, Command::SetRamYAddressCounter, &RAM_COUNTER_ORIGIN)
    }

    // lut, update trigger and the wait for it
    fn refresh(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.send_lut(spi)?;
        self.interface.cmd(spi, Command::DisplayUpdateSequence)?;
        self.state = PanelState::Busy;
        self.interface.wait_until_idle()
    }

    fn clear_frame(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.set_ram_counter(spi)?;
        self.interface.cmd(spi, Command::WriteRam)?;
        self.interface.data_x_times(spi, 0xFF, FRAME_LEN as u32)?;
        self.refresh(spi)
    }

    fn show_frame<I>(&mut self, spi: &mut SPI, frame: I) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>>
    where
        I: IntoIterator<Item = u8>,
    {
        self.interface
            .cmd_with_data(spi, Command::PrepareFrameUpload, &[0x00])?;
        self.set_ram_counter(spi)?;
        self.interface.cmd(spi, Command::WriteRam)?;
        self.interface.data_iter(spi, frame)?;
        self.refresh(spi)
    }

    fn enter_deep_sleep(&mut self, spi: &mut SPI) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.interface
            .cmd_with_data(spi, Command::SleepBorder, &SLEEP_BORDER)?;
        self.interface.cmd(spi, Command::PowerOff)?;
        self.interface
            .cmd_with_data(spi, Command::DeepSleep, &DEEP_SLEEP_MAGIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::testing::{Event, FakeBusy, FakeDc, FakeDelay, FakeHw, FakeRst, FakeSpi};
    use std::vec;
    use std::vec::Vec;

    type TestEpd = Epd3in7<FakeSpi, FakeBusy, FakeDc, FakeRst, FakeDelay>;

    fn setup(config: Config) -> (FakeHw, FakeSpi, TestEpd) {
        let hw = FakeHw::new();
        let mut spi = hw.spi();
        let epd = Epd3in7::new(&mut spi, hw.busy(), hw.dc(), hw.rst(), hw.delay(), config)
            .unwrap();
        (hw, spi, epd)
    }

    fn init_frames() -> Vec<(u8, Vec<u8>)> {
        vec![
            (0x12, vec![]),
            (0x46, vec![0xF7]),
            (0x47, vec![0xF7]),
            (0x01, vec![0xDF, 0x01, 0x00]),
            (0x03, vec![0x00]),
            (0x04, vec![0x41, 0xA8, 0x32]),
            (0x11, vec![0x03]),
            (0x3C, vec![0x03]),
            (0x0C, vec![0xAE, 0xC7, 0xC3, 0xC0, 0xC0]),
            (0x18, vec![0x80]),
            (0x2C, vec![0x44]),
            (
                0x37,
                vec![0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x4F, 0xFF, 0xFF, 0xFF, 0xFF],
            ),
            (0x44, vec![0x00, 0x00, 0x17, 0x01]),
            (0x45, vec![0x00, 0x00, 0xDF, 0x01]),
            (0x22, vec![0xCF]),
        ]
    }

    #[test]
    fn epd_size() {
        assert_eq!(WIDTH, 280);
        assert_eq!(HEIGHT, 480);
        assert_eq!(CANVAS_WIDTH, 480);
        assert_eq!(CANVAS_HEIGHT, 280);
        assert_eq!(FRAME_LEN, 16800);
        assert_eq!(LUT_1GRAY_GC.len(), 105);
    }

    #[test]
    fn init_sequence() {
        let (hw, _spi, epd) = setup(Config::default());
        assert_eq!(epd.state(), PanelState::Idle);
        assert_eq!(hw.frames(), init_frames());

        let events = hw.events();
        assert_eq!(
            &events[..8],
            &[
                Event::Rst(true),
                Event::DelayMs(30),
                Event::Rst(false),
                Event::DelayMs(30),
                Event::Rst(true),
                Event::DelayMs(30),
                Event::Command(0x12),
                Event::DelayMs(300),
            ]
        );
        // both auto write commands wait for busy and settle
        assert_eq!(
            &events[8..14],
            &[
                Event::Command(0x46),
                Event::Data(0xF7),
                Event::DelayMs(200),
                Event::Command(0x47),
                Event::Data(0xF7),
                Event::DelayMs(200),
            ]
        );
    }

    #[test]
    fn clear_streams_white_frame() {
        let (hw, mut spi, mut epd) = setup(Config::default());
        hw.clear_events();
        hw.set_busy_polls(5);
        epd.clear(&mut spi).unwrap();

        let frames = hw.frames();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0], (0x4E, vec![0x00, 0x00]));
        assert_eq!(frames[1], (0x4F, vec![0x00, 0x00]));
        assert_eq!(frames[2].0, 0x24);
        assert_eq!(frames[2].1.len(), 16800);
        assert!(frames[2].1.iter().all(|&b| b == 0xFF));
        assert_eq!(frames[3], (0x32, LUT_1GRAY_GC.to_vec()));
        assert_eq!(frames[4], (0x20, vec![]));

        // busy polls and the settle delay come last
        let events = hw.events();
        assert_eq!(events.last(), Some(&Event::DelayMs(200)));
        assert_eq!(hw.elapsed_ms(), 5 * 10 + 200);
        assert_eq!(epd.state(), PanelState::Idle);
    }

    #[test]
    fn clear_is_repeatable() {
        let (hw, mut spi, mut epd) = setup(Config::default());
        hw.clear_events();
        epd.clear(&mut spi).unwrap();
        let first = hw.frames();
        hw.clear_events();
        epd.clear(&mut spi).unwrap();
        assert_eq!(hw.frames(), first);
    }

    #[test]
    fn render_streams_remapped_canvas() {
        let (hw, mut spi, mut epd) = setup(Config::default());
        let mut canvas = Canvas::default();
        canvas.clear(Color::White);
        canvas.fill_rect(140, 125, 200, 30, false);
        canvas.set_pixel(0, 0, false);

        hw.clear_events();
        epd.render(&mut spi, &canvas).unwrap();

        let mut expected = vec![0u8; FRAME_LEN];
        remap::remap_into(canvas.buffer(), &mut expected);

        let frames = hw.frames();
        assert_eq!(
            frames.iter().map(|(cmd, _)| *cmd).collect::<Vec<_>>(),
            vec![0x49, 0x4E, 0x4F, 0x24, 0x32, 0x20]
        );
        assert_eq!(frames[0].1, vec![0x00]);
        assert_eq!(frames[3].1, expected);
        // canvas (0, 0) is native (279, 0): last byte of the first row, lsb
        assert_eq!(frames[3].1[34], 0b1111_1110);
    }

    #[test]
    fn render_native_checks_length() {
        let (hw, mut spi, mut epd) = setup(Config::default());
        hw.clear_events();
        let err = epd.render_native(&mut spi, &[0u8; 100]).unwrap_err();
        assert!(matches!(
            err,
            ErrorKind::BufferSize {
                expected: 16800,
                actual: 100
            }
        ));
        assert!(hw.frames().is_empty());

        let frame = vec![0xAAu8; FRAME_LEN];
        epd.render_native(&mut spi, &frame).unwrap();
        assert_eq!(hw.frames()[3].1, frame);
    }

    #[test]
    fn render_rejects_horizontal_canvas() {
        let (_hw, mut spi, mut epd) = setup(Config::default());
        // 280 rows of 60 bytes happen to be 16800 bytes too
        let canvas = Canvas::new(Packing::HorizontalMsb);
        let err = epd.render(&mut spi, &canvas).unwrap_err();
        assert!(matches!(
            err,
            ErrorKind::UnsupportedPacking(Packing::HorizontalMsb)
        ));
        assert_eq!(epd.state(), PanelState::Idle);
    }

    #[test]
    fn power_down_sequence() {
        let (hw, mut spi, mut epd) = setup(Config::default());
        hw.clear_events();
        epd.power_down(&mut spi).unwrap();
        assert_eq!(
            hw.events(),
            vec![
                Event::DelayMs(500),
                Event::Command(0x50),
                Event::Data(0xF7),
                Event::Command(0x02),
                Event::Command(0x07),
                Event::Data(0xA5),
            ]
        );
        assert_eq!(epd.state(), PanelState::DeepSleep);
    }

    #[test]
    fn commands_after_power_down_are_rejected() {
        let (hw, mut spi, mut epd) = setup(Config::default());
        epd.power_down(&mut spi).unwrap();
        hw.clear_events();

        let canvas = Canvas::default();
        assert!(matches!(
            epd.clear(&mut spi),
            Err(ErrorKind::InvalidState(PanelState::DeepSleep))
        ));
        assert!(matches!(
            epd.render(&mut spi, &canvas),
            Err(ErrorKind::InvalidState(PanelState::DeepSleep))
        ));
        assert!(matches!(
            epd.load_lut(&mut spi),
            Err(ErrorKind::InvalidState(PanelState::DeepSleep))
        ));
        assert!(matches!(
            epd.power_down(&mut spi),
            Err(ErrorKind::InvalidState(PanelState::DeepSleep))
        ));
        assert!(hw.events().is_empty());

        epd.wake_up(&mut spi).unwrap();
        assert_eq!(epd.state(), PanelState::Idle);
        assert_eq!(hw.frames(), init_frames());
        epd.clear(&mut spi).unwrap();
    }

    #[test]
    fn timeout_during_refresh_returns_to_idle() {
        let (hw, mut spi, mut epd) = setup(Config::new().busy_timeout_ms(50));
        hw.set_stuck_busy(true);
        let err = epd.clear(&mut spi).unwrap_err();
        assert!(matches!(err, ErrorKind::HardwareTimeout { waited_ms: 50 }));
        assert_eq!(epd.state(), PanelState::Idle);

        hw.set_stuck_busy(false);
        epd.clear(&mut spi).unwrap();
    }

    #[test]
    fn timeout_during_init_needs_new_init() {
        let hw = FakeHw::new();
        let mut spi = hw.spi();
        hw.set_stuck_busy(true);
        let result = Epd3in7::new(
            &mut spi,
            hw.busy(),
            hw.dc(),
            hw.rst(),
            hw.delay(),
            Config::new().busy_timeout_ms(20),
        );
        assert!(matches!(
            result,
            Err(ErrorKind::HardwareTimeout { waited_ms: 20 })
        ));
        // init stopped right after the first auto write
        assert_eq!(hw.commands(), vec![0x12, 0x46]);
    }

    #[test]
    fn interrupted_init_rejects_refresh() {
        let (hw, mut spi, mut epd) = setup(Config::new().busy_timeout_ms(20));
        hw.set_stuck_busy(true);
        assert!(epd.initialize(&mut spi).is_err());
        assert_eq!(epd.state(), PanelState::Configuring);
        assert!(matches!(
            epd.clear(&mut spi),
            Err(ErrorKind::InvalidState(PanelState::Configuring))
        ));
        assert!(epd.is_busy().unwrap());
    }
}
