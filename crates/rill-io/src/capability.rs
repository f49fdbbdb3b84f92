//! The `Io` capability trait
//!
//! Components never touch hardware directly; they go through this trait
//! so different targets can be swapped in and tests can inject mocks.
//! Interrupt callbacks are replaced by an opaque token posted to the IO
//! mailbox: interrupt context must never reach the network directly.

use rill_core::{PinId, RillError, RillResult};

/// Digital pin direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Internal pull-up configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullupMode {
    None,
    Up,
}

/// External interrupt trigger condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptMode {
    OnLow,
    OnHigh,
    OnChange,
    OnRisingEdge,
    OnFallingEdge,
}

/// An event posted from IO context into the main loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoEvent {
    /// An attached interrupt fired; `token` is the value given at attach.
    Interrupt { token: u32 },
}

/// Capability set consumed from the target.
///
/// Analog reads are in [0..1023]; PWM duty is in percent [0..100].
/// Unimplemented operations return [`RillError::IoUnsupported`].
pub trait Io {
    fn serial_begin(&mut self, device: u8, baudrate: u32) -> RillResult<()> {
        let _ = (device, baudrate);
        Err(RillError::IoUnsupported("serial_begin"))
    }

    fn serial_available(&mut self, device: u8) -> RillResult<usize> {
        let _ = device;
        Err(RillError::IoUnsupported("serial_available"))
    }

    fn serial_read(&mut self, device: u8) -> RillResult<Option<u8>> {
        let _ = device;
        Err(RillError::IoUnsupported("serial_read"))
    }

    fn serial_write(&mut self, device: u8, byte: u8) -> RillResult<()> {
        let _ = (device, byte);
        Err(RillError::IoUnsupported("serial_write"))
    }

    fn pin_set_mode(&mut self, pin: PinId, mode: PinMode) -> RillResult<()> {
        let _ = (pin, mode);
        Err(RillError::IoUnsupported("pin_set_mode"))
    }

    fn pin_set_pullup(&mut self, pin: PinId, mode: PullupMode) -> RillResult<()> {
        let _ = (pin, mode);
        Err(RillError::IoUnsupported("pin_set_pullup"))
    }

    fn digital_write(&mut self, pin: PinId, value: bool) -> RillResult<()> {
        let _ = (pin, value);
        Err(RillError::IoUnsupported("digital_write"))
    }

    fn digital_read(&mut self, pin: PinId) -> RillResult<bool> {
        let _ = pin;
        Err(RillError::IoUnsupported("digital_read"))
    }

    fn analog_read(&mut self, pin: PinId) -> RillResult<u16> {
        let _ = pin;
        Err(RillError::IoUnsupported("analog_read"))
    }

    fn pwm_write(&mut self, pin: PinId, duty_percent: u8) -> RillResult<()> {
        let _ = (pin, duty_percent);
        Err(RillError::IoUnsupported("pwm_write"))
    }

    fn timer_ms(&mut self) -> RillResult<u64> {
        Err(RillError::IoUnsupported("timer_ms"))
    }

    fn timer_us(&mut self) -> RillResult<u64> {
        Ok(self.timer_ms()?.saturating_mul(1000))
    }

    fn spi_set_mode(&mut self) -> RillResult<()> {
        Err(RillError::IoUnsupported("spi_set_mode"))
    }

    /// Arm an external interrupt. When it fires, the target posts
    /// `token` into its mailbox; the main loop drains it via
    /// [`Io::poll_event`].
    fn attach_interrupt(
        &mut self,
        interrupt: u8,
        mode: InterruptMode,
        token: u32,
    ) -> RillResult<()> {
        let _ = (interrupt, mode, token);
        Err(RillError::IoUnsupported("attach_interrupt"))
    }

    /// Next pending IO event, if any.
    fn poll_event(&mut self) -> Option<IoEvent> {
        None
    }
}

/// An `Io` with no capabilities at all.
pub struct NullIo;

impl Io for NullIo {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_io_is_unsupported() {
        let mut io = NullIo;
        assert_eq!(
            io.digital_read(2),
            Err(RillError::IoUnsupported("digital_read"))
        );
        assert_eq!(io.timer_ms(), Err(RillError::IoUnsupported("timer_ms")));
        // The derived microsecond clock fails with the base clock.
        assert!(io.timer_us().is_err());
        assert_eq!(io.poll_event(), None);
    }
}
