//! The seam between a component and the network it lives in
//!
//! Components hold no back-pointer to the network; during `process` the
//! network hands them a context borrowing exactly what they may touch:
//! their own out-port connections (through `send`), the message queue
//! (through `send`/`forward`), the IO capability object, and the debug
//! channel.

use rill_core::{DebugId, DebugLevel, NodeId, Packet, PortId};
use rill_io::Io;

pub trait ProcessContext {
    /// Id of the node currently processing.
    fn self_id(&self) -> NodeId;

    /// Emit a packet on one of this node's out-ports. A no-op when the
    /// port is unconnected.
    fn send(&mut self, packet: Packet, out_port: PortId);

    /// Inject a packet directly at another node's in-port, bypassing
    /// this node's connection table. Used by SubGraph virtual-input
    /// pass-through.
    fn forward(&mut self, target: NodeId, target_port: PortId, packet: Packet);

    /// The target's IO capability object.
    fn io(&mut self) -> &mut dyn Io;

    /// Report a debug event, filtered by the network's current level.
    fn debug(&mut self, level: DebugLevel, id: DebugId);
}
