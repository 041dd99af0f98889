//! Recording fakes for the spi bus, the gpio lines and the clock.
//!
//! All fakes of one [`FakeHw`] share a log, so the order of dc levels, bus
//! bytes, reset edges and delays can be checked across devices.

use core::cell::RefCell;
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin, OutputPin};
use embedded_hal::spi::{ErrorType as SpiErrorType, Operation, SpiDevice};
use std::rc::Rc;
use std::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Command(u8),
    Data(u8),
    Rst(bool),
    DelayMs(u32),
}

#[derive(Default)]
struct Log {
    events: Vec<Event>,
    dc_high: bool,
    transactions: usize,
    elapsed_ns: u64,
    busy_polls: u32,
    stuck_busy: bool,
}

#[derive(Clone, Default)]
pub(crate) struct FakeHw(Rc<RefCell<Log>>);

impl FakeHw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spi(&self) -> FakeSpi {
        FakeSpi(self.clone())
    }

    pub fn busy(&self) -> FakeBusy {
        FakeBusy(self.clone())
    }

    pub fn dc(&self) -> FakeDc {
        FakeDc(self.clone())
    }

    pub fn rst(&self) -> FakeRst {
        FakeRst(self.clone())
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay(self.clone())
    }

    /// The next `polls` reads of the busy line report busy
    pub fn set_busy_polls(&self, polls: u32) {
        self.0.borrow_mut().busy_polls = polls;
    }

    pub fn set_stuck_busy(&self, stuck: bool) {
        self.0.borrow_mut().stuck_busy = stuck;
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        let mut log = self.0.borrow_mut();
        log.events.clear();
        log.transactions = 0;
        log.elapsed_ns = 0;
    }

    pub fn transactions(&self) -> usize {
        self.0.borrow().transactions
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.0.borrow().elapsed_ns / 1_000_000
    }

    /// Bus traffic grouped into commands with the data bytes following them
    pub fn frames(&self) -> Vec<(u8, Vec<u8>)> {
        let mut frames: Vec<(u8, Vec<u8>)> = Vec::new();
        for event in self.0.borrow().events.iter() {
            match *event {
                Event::Command(cmd) => frames.push((cmd, Vec::new())),
                Event::Data(byte) => match frames.last_mut() {
                    Some((_, data)) => data.push(byte),
                    None => panic!("data byte {byte:#04x} sent before any command"),
                },
                _ => {}
            }
        }
        frames
    }

    /// Only the command bytes, in the order they were sent
    pub fn commands(&self) -> Vec<u8> {
        self.frames().into_iter().map(|(cmd, _)| cmd).collect()
    }
}

pub(crate) struct FakeSpi(FakeHw);

impl SpiErrorType for FakeSpi {
    type Error = Infallible;
}

impl SpiDevice for FakeSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let mut log = (self.0).0.borrow_mut();
        log.transactions += 1;
        for op in operations.iter() {
            match op {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        let event = if log.dc_high {
                            Event::Data(byte)
                        } else {
                            Event::Command(byte)
                        };
                        log.events.push(event);
                    }
                }
                Operation::DelayNs(ns) => log.elapsed_ns += u64::from(*ns),
                _ => panic!("the panel bus is write only"),
            }
        }
        Ok(())
    }
}

pub(crate) struct FakeBusy(FakeHw);

impl PinErrorType for FakeBusy {
    type Error = Infallible;
}

impl InputPin for FakeBusy {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let mut log = (self.0).0.borrow_mut();
        if log.stuck_busy {
            return Ok(true);
        }
        if log.busy_polls > 0 {
            log.busy_polls -= 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

pub(crate) struct FakeDc(FakeHw);

impl PinErrorType for FakeDc {
    type Error = Infallible;
}

impl OutputPin for FakeDc {
    fn set_low(&mut self) -> Result<(), Infallible> {
        (self.0).0.borrow_mut().dc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        (self.0).0.borrow_mut().dc_high = true;
        Ok(())
    }
}

pub(crate) struct FakeRst(FakeHw);

impl PinErrorType for FakeRst {
    type Error = Infallible;
}

impl OutputPin for FakeRst {
    fn set_low(&mut self) -> Result<(), Infallible> {
        (self.0).0.borrow_mut().events.push(Event::Rst(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        (self.0).0.borrow_mut().events.push(Event::Rst(true));
        Ok(())
    }
}

/// Fake clock, time only advances through the driver's own delays
pub(crate) struct FakeDelay(FakeHw);

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        (self.0).0.borrow_mut().elapsed_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        let mut log = (self.0).0.borrow_mut();
        log.events.push(Event::DelayMs(ms));
        log.elapsed_ns += u64::from(ms) * 1_000_000;
    }
}
