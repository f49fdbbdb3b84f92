//! In-memory IO for tests
//!
//! `MockIo` is a cheap cloneable handle over shared state: tests keep
//! one handle to script inputs and inspect outputs while the network
//! owns another. Everything runs on the single test thread.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use rill_core::{PinId, RillResult};

use crate::{InterruptMode, Io, IoEvent, Mailbox, PinMode, PullupMode};

#[derive(Debug, Default)]
struct MockState {
    digital: HashMap<PinId, bool>,
    modes: HashMap<PinId, PinMode>,
    pullups: HashMap<PinId, PullupMode>,
    analog: HashMap<PinId, u16>,
    pwm: Vec<(PinId, u8)>,
    serial_in: HashMap<u8, VecDeque<u8>>,
    serial_out: HashMap<u8, Vec<u8>>,
    serial_open: HashMap<u8, u32>,
    now_ms: u64,
    interrupts: Vec<(u8, InterruptMode, u32)>,
    mailbox: Mailbox,
}

/// Cloneable in-memory `Io` implementation.
#[derive(Clone, Debug, Default)]
pub struct MockIo {
    state: Rc<RefCell<MockState>>,
}

impl MockIo {
    pub fn new() -> Self {
        MockIo::default()
    }

    /// Set the level a digital_read of `pin` will observe.
    pub fn set_digital(&self, pin: PinId, value: bool) {
        self.state.borrow_mut().digital.insert(pin, value);
    }

    /// Last level written to `pin`, if any.
    pub fn digital_level(&self, pin: PinId) -> Option<bool> {
        self.state.borrow().digital.get(&pin).copied()
    }

    /// Configured direction of `pin`, if set.
    pub fn pin_mode(&self, pin: PinId) -> Option<PinMode> {
        self.state.borrow().modes.get(&pin).copied()
    }

    /// Configured pull-up of `pin`, if set.
    pub fn pin_pullup(&self, pin: PinId) -> Option<PullupMode> {
        self.state.borrow().pullups.get(&pin).copied()
    }

    /// Set the value an analog_read of `pin` will observe.
    pub fn set_analog(&self, pin: PinId, value: u16) {
        self.state.borrow_mut().analog.insert(pin, value);
    }

    /// All PWM writes in order.
    pub fn pwm_writes(&self) -> Vec<(PinId, u8)> {
        self.state.borrow().pwm.clone()
    }

    /// Queue bytes for serial_read on `device`.
    pub fn feed_serial(&self, device: u8, bytes: &[u8]) {
        self.state
            .borrow_mut()
            .serial_in
            .entry(device)
            .or_default()
            .extend(bytes.iter().copied());
    }

    /// Everything written to `device` so far.
    pub fn serial_output(&self, device: u8) -> Vec<u8> {
        self.state
            .borrow()
            .serial_out
            .get(&device)
            .cloned()
            .unwrap_or_default()
    }

    /// Baudrate the device was opened with, if opened.
    pub fn serial_baudrate(&self, device: u8) -> Option<u32> {
        self.state.borrow().serial_open.get(&device).copied()
    }

    /// Advance the mock millisecond clock.
    pub fn advance_ms(&self, ms: u64) {
        self.state.borrow_mut().now_ms += ms;
    }

    /// Current value of the mock clock.
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Fire interrupt `interrupt`: every attached token is posted to
    /// the mailbox, exactly as a target's ISR trampoline would.
    pub fn trigger_interrupt(&self, interrupt: u8) {
        let mut state = self.state.borrow_mut();
        let tokens: Vec<u32> = state
            .interrupts
            .iter()
            .filter(|(n, _, _)| *n == interrupt)
            .map(|(_, _, token)| *token)
            .collect();
        for token in tokens {
            state.mailbox.post(IoEvent::Interrupt { token });
        }
    }

    /// Interrupts attached so far.
    pub fn attached_interrupts(&self) -> Vec<(u8, InterruptMode, u32)> {
        self.state.borrow().interrupts.clone()
    }
}

impl Io for MockIo {
    fn serial_begin(&mut self, device: u8, baudrate: u32) -> RillResult<()> {
        self.state.borrow_mut().serial_open.insert(device, baudrate);
        Ok(())
    }

    fn serial_available(&mut self, device: u8) -> RillResult<usize> {
        Ok(self
            .state
            .borrow()
            .serial_in
            .get(&device)
            .map_or(0, |queue| queue.len()))
    }

    fn serial_read(&mut self, device: u8) -> RillResult<Option<u8>> {
        Ok(self
            .state
            .borrow_mut()
            .serial_in
            .get_mut(&device)
            .and_then(|queue| queue.pop_front()))
    }

    fn serial_write(&mut self, device: u8, byte: u8) -> RillResult<()> {
        self.state
            .borrow_mut()
            .serial_out
            .entry(device)
            .or_default()
            .push(byte);
        Ok(())
    }

    fn pin_set_mode(&mut self, pin: PinId, mode: PinMode) -> RillResult<()> {
        self.state.borrow_mut().modes.insert(pin, mode);
        Ok(())
    }

    fn pin_set_pullup(&mut self, pin: PinId, mode: PullupMode) -> RillResult<()> {
        self.state.borrow_mut().pullups.insert(pin, mode);
        Ok(())
    }

    fn digital_write(&mut self, pin: PinId, value: bool) -> RillResult<()> {
        self.state.borrow_mut().digital.insert(pin, value);
        Ok(())
    }

    fn digital_read(&mut self, pin: PinId) -> RillResult<bool> {
        Ok(self.state.borrow().digital.get(&pin).copied().unwrap_or(false))
    }

    fn analog_read(&mut self, pin: PinId) -> RillResult<u16> {
        Ok(self.state.borrow().analog.get(&pin).copied().unwrap_or(0))
    }

    fn pwm_write(&mut self, pin: PinId, duty_percent: u8) -> RillResult<()> {
        self.state.borrow_mut().pwm.push((pin, duty_percent));
        Ok(())
    }

    fn timer_ms(&mut self) -> RillResult<u64> {
        Ok(self.state.borrow().now_ms)
    }

    fn spi_set_mode(&mut self) -> RillResult<()> {
        Ok(())
    }

    fn attach_interrupt(
        &mut self,
        interrupt: u8,
        mode: InterruptMode,
        token: u32,
    ) -> RillResult<()> {
        self.state
            .borrow_mut()
            .interrupts
            .push((interrupt, mode, token));
        Ok(())
    }

    fn poll_event(&mut self) -> Option<IoEvent> {
        self.state.borrow_mut().mailbox.pop()
    }
}
