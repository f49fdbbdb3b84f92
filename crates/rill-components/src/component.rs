//! The closed component set
//!
//! Dispatch is a tagged enum + match rather than trait objects: the
//! component-type ids are a closed set known at build time and travel
//! as a single byte on the wire.

use rill_core::{ComponentType, Packet, PortId, SUBGRAPH_MAXPORTS};

use crate::{
    AnalogReadPin, DigitalReadPin, DigitalWritePin, Forward, IntervalTimer, ProcessContext,
    PwmWritePin, SerialIn, SerialOut, Sink, SubGraph, ToggleBoolean,
};

/// A component body: the per-node state plus its reaction function.
#[derive(Debug)]
pub enum Component {
    SubGraph(SubGraph),
    Forward(Forward),
    Sink(Sink),
    ToggleBoolean(ToggleBoolean),
    DigitalWritePin(DigitalWritePin),
    DigitalReadPin(DigitalReadPin),
    AnalogReadPin(AnalogReadPin),
    PwmWritePin(PwmWritePin),
    IntervalTimer(IntervalTimer),
    SerialIn(SerialIn),
    SerialOut(SerialOut),
}

impl Component {
    /// Instantiate a component of the given type. `None` only for the
    /// sentinel type.
    pub fn create(kind: ComponentType) -> Option<Component> {
        match kind {
            ComponentType::Invalid => None,
            ComponentType::SubGraph => Some(Component::SubGraph(SubGraph::new())),
            ComponentType::Forward => Some(Component::Forward(Forward::new())),
            ComponentType::Sink => Some(Component::Sink(Sink::new())),
            ComponentType::ToggleBoolean => Some(Component::ToggleBoolean(ToggleBoolean::new())),
            ComponentType::DigitalWritePin => {
                Some(Component::DigitalWritePin(DigitalWritePin::new()))
            }
            ComponentType::DigitalReadPin => Some(Component::DigitalReadPin(DigitalReadPin::new())),
            ComponentType::AnalogReadPin => Some(Component::AnalogReadPin(AnalogReadPin::new())),
            ComponentType::PwmWritePin => Some(Component::PwmWritePin(PwmWritePin::new())),
            ComponentType::IntervalTimer => Some(Component::IntervalTimer(IntervalTimer::new())),
            ComponentType::SerialIn => Some(Component::SerialIn(SerialIn::new())),
            ComponentType::SerialOut => Some(Component::SerialOut(SerialOut::new())),
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            Component::SubGraph(_) => ComponentType::SubGraph,
            Component::Forward(_) => ComponentType::Forward,
            Component::Sink(_) => ComponentType::Sink,
            Component::ToggleBoolean(_) => ComponentType::ToggleBoolean,
            Component::DigitalWritePin(_) => ComponentType::DigitalWritePin,
            Component::DigitalReadPin(_) => ComponentType::DigitalReadPin,
            Component::AnalogReadPin(_) => ComponentType::AnalogReadPin,
            Component::PwmWritePin(_) => ComponentType::PwmWritePin,
            Component::IntervalTimer(_) => ComponentType::IntervalTimer,
            Component::SerialIn(_) => ComponentType::SerialIn,
            Component::SerialOut(_) => ComponentType::SerialOut,
        }
    }

    /// Number of out-port connection slots this component owns.
    pub fn out_ports(&self) -> usize {
        match self {
            Component::SubGraph(_) => SUBGRAPH_MAXPORTS,
            Component::Forward(_) => 1,
            Component::Sink(_) => 0,
            Component::ToggleBoolean(_) => 1,
            Component::DigitalWritePin(_) => 0,
            Component::DigitalReadPin(_) => 1,
            Component::AnalogReadPin(_) => 1,
            Component::PwmWritePin(_) => 0,
            Component::IntervalTimer(_) => 1,
            Component::SerialIn(_) => 1,
            Component::SerialOut(_) => 0,
        }
    }

    /// React to a packet arriving at `port`. Must return promptly.
    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, port: PortId) {
        match self {
            Component::SubGraph(c) => c.process(ctx, packet, port),
            Component::Forward(c) => c.process(ctx, packet, port),
            Component::Sink(c) => c.process(ctx, packet, port),
            Component::ToggleBoolean(c) => c.process(ctx, packet, port),
            Component::DigitalWritePin(c) => c.process(ctx, packet, port),
            Component::DigitalReadPin(c) => c.process(ctx, packet, port),
            Component::AnalogReadPin(c) => c.process(ctx, packet, port),
            Component::PwmWritePin(c) => c.process(ctx, packet, port),
            Component::IntervalTimer(c) => c.process(ctx, packet, port),
            Component::SerialIn(c) => c.process(ctx, packet, port),
            Component::SerialOut(c) => c.process(ctx, packet, port),
        }
    }

    pub fn as_subgraph(&self) -> Option<&SubGraph> {
        match self {
            Component::SubGraph(subgraph) => Some(subgraph),
            _ => None,
        }
    }

    pub fn as_subgraph_mut(&mut self) -> Option<&mut SubGraph> {
        match self {
            Component::SubGraph(subgraph) => Some(subgraph),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [ComponentType; 11] = [
        ComponentType::SubGraph,
        ComponentType::Forward,
        ComponentType::Sink,
        ComponentType::ToggleBoolean,
        ComponentType::DigitalWritePin,
        ComponentType::DigitalReadPin,
        ComponentType::AnalogReadPin,
        ComponentType::PwmWritePin,
        ComponentType::IntervalTimer,
        ComponentType::SerialIn,
        ComponentType::SerialOut,
    ];

    #[test]
    fn test_create_covers_every_type() {
        for kind in ALL_TYPES {
            let component = Component::create(kind).unwrap();
            assert_eq!(component.component_type(), kind);
        }
        assert!(Component::create(ComponentType::Invalid).is_none());
    }

    #[test]
    fn test_out_port_counts() {
        assert_eq!(
            Component::create(ComponentType::SubGraph).unwrap().out_ports(),
            SUBGRAPH_MAXPORTS
        );
        assert_eq!(
            Component::create(ComponentType::Forward).unwrap().out_ports(),
            1
        );
        assert_eq!(Component::create(ComponentType::Sink).unwrap().out_ports(), 0);
        assert_eq!(
            Component::create(ComponentType::SerialOut).unwrap().out_ports(),
            0
        );
    }

    #[test]
    fn test_subgraph_accessor() {
        let mut subgraph = Component::create(ComponentType::SubGraph).unwrap();
        assert!(subgraph.as_subgraph().is_some());
        assert!(subgraph.as_subgraph_mut().is_some());

        let mut forward = Component::create(ComponentType::Forward).unwrap();
        assert!(forward.as_subgraph().is_none());
        assert!(forward.as_subgraph_mut().is_none());
    }
}
