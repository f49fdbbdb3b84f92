//! Serial IO wrapper components

use rill_core::{DebugId, DebugLevel, Packet, PortId};

use crate::ProcessContext;

const BAUDRATE: u32 = 9600;

/// Drains available serial input each tick, emitting one Byte packet
/// per byte on out-port 0. A generator: it emits from Tick processing.
#[derive(Debug)]
pub struct SerialIn {
    device: u8,
}

impl SerialIn {
    pub fn new() -> Self {
        SerialIn { device: 0 }
    }

    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, _port: PortId) {
        if packet.is_setup() {
            if ctx.io().serial_begin(self.device, BAUDRATE).is_err() {
                ctx.debug(DebugLevel::Error, DebugId::IoOperationNotImplemented);
            }
            return;
        }
        if !packet.is_tick() {
            return;
        }
        loop {
            match ctx.io().serial_read(self.device) {
                Ok(Some(byte)) => ctx.send(Packet::Byte(byte), PortId::new(0)),
                Ok(None) => break,
                Err(_) => {
                    ctx.debug(DebugLevel::Error, DebugId::IoOperationNotImplemented);
                    break;
                }
            }
        }
    }
}

impl Default for SerialIn {
    fn default() -> Self {
        SerialIn::new()
    }
}

/// Writes each data packet to serial as a byte.
#[derive(Debug)]
pub struct SerialOut {
    device: u8,
}

impl SerialOut {
    pub fn new() -> Self {
        SerialOut { device: 0 }
    }

    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, _port: PortId) {
        if packet.is_setup() {
            if ctx.io().serial_begin(self.device, BAUDRATE).is_err() {
                ctx.debug(DebugLevel::Error, DebugId::IoOperationNotImplemented);
            }
            return;
        }
        if packet.is_data() {
            let byte = packet.as_byte();
            if ctx.io().serial_write(self.device, byte).is_err() {
                ctx.debug(DebugLevel::Error, DebugId::IoOperationNotImplemented);
            }
        }
    }
}

impl Default for SerialOut {
    fn default() -> Self {
        SerialOut::new()
    }
}

#[cfg(test)]
mod tests {
    use rill_core::NodeId;

    use super::*;
    use crate::context::tests::TestContext;

    #[test]
    fn test_serial_in_drains_on_tick() {
        let mut component = SerialIn::new();
        let mut ctx = TestContext::new(NodeId::new(1));

        component.process(&mut ctx, Packet::Setup, PortId::NONE);
        assert_eq!(ctx.io.serial_baudrate(0), Some(BAUDRATE));

        ctx.io.feed_serial(0, b"hi");
        component.process(&mut ctx, Packet::Tick, PortId::NONE);
        assert_eq!(
            ctx.sent,
            vec![
                (Packet::Byte(b'h'), PortId::new(0)),
                (Packet::Byte(b'i'), PortId::new(0)),
            ]
        );

        // Nothing more pending.
        ctx.sent.clear();
        component.process(&mut ctx, Packet::Tick, PortId::NONE);
        assert!(ctx.sent.is_empty());
    }

    #[test]
    fn test_serial_out_writes_coerced_bytes() {
        let mut component = SerialOut::new();
        let mut ctx = TestContext::new(NodeId::new(1));

        component.process(&mut ctx, Packet::Setup, PortId::NONE);
        component.process(&mut ctx, Packet::Byte(0x41), PortId::new(0));
        component.process(&mut ctx, Packet::Ascii(b'B'), PortId::new(0));
        component.process(&mut ctx, Packet::Integer(0x43), PortId::new(0));
        component.process(&mut ctx, Packet::Tick, PortId::NONE);

        assert_eq!(ctx.io.serial_output(0), b"ABC".to_vec());
    }
}
