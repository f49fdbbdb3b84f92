//! Time-driven components

use rill_core::{DebugId, DebugLevel, Packet, PortId};

use crate::ProcessContext;

/// Emits Void on out-port 0 each time the configured interval elapses,
/// sampled against the target clock on every tick. The default interval
/// of zero fires on every tick. A generator.
#[derive(Debug, Default)]
pub struct IntervalTimer {
    interval_ms: u64,
    last_ms: u64,
}

impl IntervalTimer {
    pub fn new() -> Self {
        IntervalTimer::default()
    }

    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, port: PortId) {
        if packet.is_tick() {
            let now = match ctx.io().timer_ms() {
                Ok(now) => now,
                Err(_) => {
                    ctx.debug(DebugLevel::Error, DebugId::IoOperationNotImplemented);
                    return;
                }
            };
            if now.saturating_sub(self.last_ms) >= self.interval_ms {
                self.last_ms = now;
                ctx.send(Packet::Void, PortId::new(0));
            }
            return;
        }
        if packet.is_data() && port.index() == Some(0) {
            self.interval_ms = packet.as_integer().max(0) as u64;
        }
    }
}

#[cfg(test)]
mod tests {
    use rill_core::NodeId;

    use super::*;
    use crate::context::tests::TestContext;

    #[test]
    fn test_default_interval_fires_every_tick() {
        let mut timer = IntervalTimer::new();
        let mut ctx = TestContext::new(NodeId::new(1));

        timer.process(&mut ctx, Packet::Tick, PortId::NONE);
        timer.process(&mut ctx, Packet::Tick, PortId::NONE);
        assert_eq!(ctx.sent.len(), 2);
    }

    #[test]
    fn test_interval_gates_on_clock() {
        let mut timer = IntervalTimer::new();
        let mut ctx = TestContext::new(NodeId::new(1));

        timer.process(&mut ctx, Packet::Integer(100), PortId::new(0));

        timer.process(&mut ctx, Packet::Tick, PortId::NONE);
        assert!(ctx.sent.is_empty());

        ctx.io.advance_ms(99);
        timer.process(&mut ctx, Packet::Tick, PortId::NONE);
        assert!(ctx.sent.is_empty());

        ctx.io.advance_ms(1);
        timer.process(&mut ctx, Packet::Tick, PortId::NONE);
        assert_eq!(ctx.sent.len(), 1);

        // Interval restarts from the emitting tick.
        timer.process(&mut ctx, Packet::Tick, PortId::NONE);
        assert_eq!(ctx.sent.len(), 1);

        ctx.io.advance_ms(100);
        timer.process(&mut ctx, Packet::Tick, PortId::NONE);
        assert_eq!(ctx.sent.len(), 2);
    }
}
