//! SubGraph - a composite node
//!
//! A SubGraph owns two fixed tables of virtual port bindings. Packets
//! arriving at virtual input `p` are re-injected at the bound child's
//! in-port. Output pass-through is structural: the network rewires the
//! bound child's physical out-connection to the SubGraph's downstream
//! target at connect time, so outbound packets cross the boundary in a
//! single hop and `process` never sees them.

use rill_core::{NodeId, Packet, PortId, RillError, RillResult, SUBGRAPH_MAXPORTS};

use crate::ProcessContext;

/// A virtual port bound to a child node port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortBinding {
    pub child: NodeId,
    pub child_port: PortId,
}

#[derive(Debug, Default)]
pub struct SubGraph {
    inputs: [Option<PortBinding>; SUBGRAPH_MAXPORTS],
    outputs: [Option<PortBinding>; SUBGRAPH_MAXPORTS],
}

impl SubGraph {
    pub fn new() -> Self {
        SubGraph::default()
    }

    fn slot(port: PortId) -> RillResult<usize> {
        match port.index() {
            Some(p) if p < SUBGRAPH_MAXPORTS => Ok(p),
            _ => Err(RillError::SubgraphPortOverflow(port)),
        }
    }

    /// Route virtual input `port` to `child`'s in-port.
    pub fn bind_input(
        &mut self,
        port: PortId,
        child: NodeId,
        child_port: PortId,
    ) -> RillResult<()> {
        self.inputs[Self::slot(port)?] = Some(PortBinding { child, child_port });
        Ok(())
    }

    /// Declare that virtual output `port` re-emits `child`'s out-port.
    pub fn bind_output(
        &mut self,
        port: PortId,
        child: NodeId,
        child_port: PortId,
    ) -> RillResult<()> {
        self.outputs[Self::slot(port)?] = Some(PortBinding { child, child_port });
        Ok(())
    }

    pub fn input(&self, port: PortId) -> Option<PortBinding> {
        Self::slot(port).ok().and_then(|p| self.inputs[p])
    }

    pub fn output(&self, port: PortId) -> Option<PortBinding> {
        Self::slot(port).ok().and_then(|p| self.outputs[p])
    }

    /// Setup and Tick reach the SubGraph like any node but are not
    /// re-broadcast into the children; data packets hop to the bound
    /// child input.
    pub fn process(&mut self, ctx: &mut dyn ProcessContext, packet: Packet, port: PortId) {
        if packet.is_special() {
            return;
        }
        if let Some(binding) = self.input(port) {
            ctx.forward(binding.child, binding.child_port, packet);
        }
    }
}
