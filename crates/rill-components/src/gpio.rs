//! Pin-level IO wrapper components
//!
//! Port convention shared by the pin wrappers: in-port 0 carries data,
//! in-port 1 configures the pin number. A wrapper stays inert until the
//! pin is configured. IO failures are mirrored as debug events and the
//! packet is dropped.

use rill_core::{DebugId, DebugLevel, Packet, PinId, PortId, RillResult};
use rill_io::PinMode;

use crate::ProcessContext;

const DATA_PORT: usize = 0;
const CONFIG_PORT: usize = 1;

fn report_io(ctx: &mut dyn ProcessContext, result: RillResult<()>) {
    if result.is_err() {
        ctx.debug(DebugLevel::Error, DebugId::IoOperationNotImplemented);
    }
}

/// Writes its in-port 0 value to a digital pin.
#[derive(Debug, Default)]
pub struct DigitalWritePin {
    pin: Option<PinId>,
}

impl DigitalWritePin {
    pub fn new() -> Self {
        DigitalWritePin::default()
    }

    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, port: PortId) {
        if !packet.is_data() {
            return;
        }
        match port.index() {
            Some(DATA_PORT) => {
                if let Some(pin) = self.pin {
                    let result = ctx.io().digital_write(pin, packet.as_bool());
                    report_io(ctx, result);
                }
            }
            Some(CONFIG_PORT) => {
                let pin = packet.as_integer() as PinId;
                self.pin = Some(pin);
                let result = ctx.io().pin_set_mode(pin, PinMode::Output);
                report_io(ctx, result);
            }
            _ => {}
        }
    }
}

/// Samples a digital pin each tick and emits the level on change.
#[derive(Debug, Default)]
pub struct DigitalReadPin {
    pin: Option<PinId>,
    last: Option<bool>,
}

impl DigitalReadPin {
    pub fn new() -> Self {
        DigitalReadPin::default()
    }

    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, port: PortId) {
        if packet.is_tick() {
            let Some(pin) = self.pin else { return };
            match ctx.io().digital_read(pin) {
                Ok(level) => {
                    if self.last != Some(level) {
                        self.last = Some(level);
                        ctx.send(Packet::Boolean(level), PortId::new(0));
                    }
                }
                Err(_) => ctx.debug(DebugLevel::Error, DebugId::IoOperationNotImplemented),
            }
            return;
        }
        if packet.is_data() && port.index() == Some(CONFIG_PORT) {
            let pin = packet.as_integer() as PinId;
            self.pin = Some(pin);
            self.last = None;
            let result = ctx.io().pin_set_mode(pin, PinMode::Input);
            report_io(ctx, result);
        }
    }
}

/// Reads the analog value [0..1023] when any data packet arrives on
/// in-port 0.
#[derive(Debug, Default)]
pub struct AnalogReadPin {
    pin: Option<PinId>,
}

impl AnalogReadPin {
    pub fn new() -> Self {
        AnalogReadPin::default()
    }

    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, port: PortId) {
        if !packet.is_data() {
            return;
        }
        match port.index() {
            Some(DATA_PORT) => {
                let Some(pin) = self.pin else { return };
                match ctx.io().analog_read(pin) {
                    Ok(value) => ctx.send(Packet::Integer(value as i32), PortId::new(0)),
                    Err(_) => ctx.debug(DebugLevel::Error, DebugId::IoOperationNotImplemented),
                }
            }
            Some(CONFIG_PORT) => {
                let pin = packet.as_integer() as PinId;
                self.pin = Some(pin);
                let result = ctx.io().pin_set_mode(pin, PinMode::Input);
                report_io(ctx, result);
            }
            _ => {}
        }
    }
}

/// Writes its in-port 0 value as a PWM duty cycle, clamped to [0..100].
#[derive(Debug, Default)]
pub struct PwmWritePin {
    pin: Option<PinId>,
}

impl PwmWritePin {
    pub fn new() -> Self {
        PwmWritePin::default()
    }

    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, port: PortId) {
        if !packet.is_data() {
            return;
        }
        match port.index() {
            Some(DATA_PORT) => {
                if let Some(pin) = self.pin {
                    let duty = packet.as_integer().clamp(0, 100) as u8;
                    let result = ctx.io().pwm_write(pin, duty);
                    report_io(ctx, result);
                }
            }
            Some(CONFIG_PORT) => {
                let pin = packet.as_integer() as PinId;
                self.pin = Some(pin);
                let result = ctx.io().pin_set_mode(pin, PinMode::Output);
                report_io(ctx, result);
            }
            _ => {}
        }
    }
}
