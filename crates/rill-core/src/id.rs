//! Identity types for the Rill graph
//!
//! Node ids are 8-bit for wire efficiency: the host protocol addresses
//! nodes with a single byte, and the node table is bounded far below 255.
//! Port ids are signed so that -1 can mean "no port".

use std::fmt;

/// Node identity - position in the network's dense node table plus one.
///
/// The value 0 is reserved and means "no node": it marks top-level
/// components (no parent) and externally injected messages (no sender).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeId(pub u8);

impl NodeId {
    /// Reserved id: no parent / no sender.
    pub const NONE: NodeId = NodeId(0);

    /// First id handed out by the node table.
    pub const FIRST: NodeId = NodeId(1);

    #[inline]
    pub fn new(id: u8) -> Self {
        NodeId(id)
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn from_byte(b: u8) -> Self {
        NodeId(b)
    }

    /// Slot in the dense node table, `None` for the reserved id.
    #[inline]
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Port identity - a numbered input or output slot on a node.
///
/// -1 means "no port": the sender port of injected messages and the
/// delivery port of broadcast Setup/Tick packets.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortId(pub i8);

impl PortId {
    /// Reserved port: no port.
    pub const NONE: PortId = PortId(-1);

    #[inline]
    pub fn new(port: i8) -> Self {
        PortId(port)
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn from_byte(b: u8) -> Self {
        PortId(b as i8)
    }

    /// Slot in a dense connection array, `None` for negative ports.
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl Default for PortId {
    fn default() -> Self {
        PortId::NONE
    }
}

impl fmt::Debug for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Port({})", self.0)
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hardware pin number, target-defined.
pub type PinId = i32;
