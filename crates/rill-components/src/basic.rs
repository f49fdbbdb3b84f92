//! Pure leaf components with no IO dependence

use rill_core::{Packet, PortId};

use crate::ProcessContext;

/// Re-emits every data packet on out-port 0.
#[derive(Debug, Default)]
pub struct Forward;

impl Forward {
    pub fn new() -> Self {
        Forward
    }

    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, _port: PortId) {
        if packet.is_data() {
            ctx.send(packet, PortId::new(0));
        }
    }
}

/// Accepts and discards everything.
#[derive(Debug, Default)]
pub struct Sink;

impl Sink {
    pub fn new() -> Self {
        Sink
    }

    pub fn process(&mut self, _ctx: &mut dyn ProcessContext, _packet: Packet, _port: PortId) {}
}

/// Flips an internal boolean on each data packet and emits the new
/// value on out-port 0.
#[derive(Debug, Default)]
pub struct ToggleBoolean {
    on: bool,
}

impl ToggleBoolean {
    pub fn new() -> Self {
        ToggleBoolean::default()
    }

    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, _port: PortId) {
        if packet.is_data() {
            self.on = !self.on;
            ctx.send(Packet::Boolean(self.on), PortId::new(0));
        }
    }
}
