//! Command frames
//!
//! Frame = 1 opcode byte + 7 payload bytes:
//! - CreateComponent: componentType, parentId
//! - ConnectNodes: srcId, srcPort, tgtId, tgtPort
//! - SendPacket: tgtId, tgtPort, kind, payload(4 LE)
//! - SubscribeToPort: nodeId, portId, enable
//! - ConnectSubgraphPort: isOutput, subId, subPort, childId, childPort
//! - PacketSent: index(2 LE), srcId, srcPort, tgtId, tgtPort, kind
//! - PacketDelivered: index(2 LE), tgtId, tgtPort, kind, value(2 LE)
//!
//! PacketDelivered carries the payload truncated to its low 16 bits;
//! Boolean, Byte and Ascii values are always exact on the wire.

use rill_core::{
    ComponentType, DebugId, DebugLevel, NodeId, Packet, PacketKind, PortId, RillError, RillResult,
};

/// Stream-opening magic header.
pub const MAGIC: [u8; 9] = *b"MAGIC!012";

/// Fixed frame size: 1 opcode byte + 7 payload bytes.
pub const CMD_SIZE: usize = 8;

/// Frame opcodes, one numbering space for both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Invalid = 0x00,
    Reset = 0x01,
    StartNetwork = 0x02,
    CreateComponent = 0x03,
    ConnectNodes = 0x04,
    SendPacket = 0x05,
    SetDebugLevel = 0x06,
    SubscribeToPort = 0x07,
    ConnectSubgraphPort = 0x08,
    Ping = 0x09,
    Pong = 0x0A,
    NodeAdded = 0x0B,
    NodesConnected = 0x0C,
    NetworkStateChanged = 0x0D,
    PacketSent = 0x0E,
    PacketDelivered = 0x0F,
    DebugMessage = 0x10,
    DebugChanged = 0x11,
    SubgraphPortConnected = 0x12,
    PortSubscriptionChanged = 0x13,
}

impl Opcode {
    /// Parse from wire byte. The sentinel is not a recognized opcode.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x01 => Some(Opcode::Reset),
            0x02 => Some(Opcode::StartNetwork),
            0x03 => Some(Opcode::CreateComponent),
            0x04 => Some(Opcode::ConnectNodes),
            0x05 => Some(Opcode::SendPacket),
            0x06 => Some(Opcode::SetDebugLevel),
            0x07 => Some(Opcode::SubscribeToPort),
            0x08 => Some(Opcode::ConnectSubgraphPort),
            0x09 => Some(Opcode::Ping),
            0x0A => Some(Opcode::Pong),
            0x0B => Some(Opcode::NodeAdded),
            0x0C => Some(Opcode::NodesConnected),
            0x0D => Some(Opcode::NetworkStateChanged),
            0x0E => Some(Opcode::PacketSent),
            0x0F => Some(Opcode::PacketDelivered),
            0x10 => Some(Opcode::DebugMessage),
            0x11 => Some(Opcode::DebugChanged),
            0x12 => Some(Opcode::SubgraphPortConnected),
            0x13 => Some(Opcode::PortSubscriptionChanged),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// A decoded frame, inbound or outbound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Reset,
    StartNetwork,
    CreateComponent {
        component: ComponentType,
        parent: NodeId,
    },
    ConnectNodes {
        src: NodeId,
        src_port: PortId,
        target: NodeId,
        target_port: PortId,
    },
    SendPacket {
        target: NodeId,
        target_port: PortId,
        packet: Packet,
    },
    SetDebugLevel {
        level: DebugLevel,
    },
    SubscribeToPort {
        node: NodeId,
        port: PortId,
        enable: bool,
    },
    ConnectSubgraphPort {
        is_output: bool,
        subgraph: NodeId,
        subgraph_port: PortId,
        child: NodeId,
        child_port: PortId,
    },
    Ping,
    Pong,
    NodeAdded {
        parent: NodeId,
        component: ComponentType,
        node: NodeId,
    },
    NodesConnected {
        src: NodeId,
        src_port: PortId,
        target: NodeId,
        target_port: PortId,
    },
    NetworkStateChanged {
        running: bool,
    },
    PacketSent {
        index: u16,
        sender: NodeId,
        sender_port: PortId,
        target: NodeId,
        target_port: PortId,
        kind: PacketKind,
    },
    PacketDelivered {
        index: u16,
        target: NodeId,
        target_port: PortId,
        kind: PacketKind,
        value: u16,
    },
    DebugMessage {
        level: DebugLevel,
        id: DebugId,
    },
    DebugChanged {
        level: DebugLevel,
    },
    SubgraphPortConnected {
        is_output: bool,
        subgraph: NodeId,
        subgraph_port: PortId,
        child: NodeId,
        child_port: PortId,
    },
    PortSubscriptionChanged {
        node: NodeId,
        port: PortId,
        enable: bool,
    },
}

impl Command {
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::Reset => Opcode::Reset,
            Command::StartNetwork => Opcode::StartNetwork,
            Command::CreateComponent { .. } => Opcode::CreateComponent,
            Command::ConnectNodes { .. } => Opcode::ConnectNodes,
            Command::SendPacket { .. } => Opcode::SendPacket,
            Command::SetDebugLevel { .. } => Opcode::SetDebugLevel,
            Command::SubscribeToPort { .. } => Opcode::SubscribeToPort,
            Command::ConnectSubgraphPort { .. } => Opcode::ConnectSubgraphPort,
            Command::Ping => Opcode::Ping,
            Command::Pong => Opcode::Pong,
            Command::NodeAdded { .. } => Opcode::NodeAdded,
            Command::NodesConnected { .. } => Opcode::NodesConnected,
            Command::NetworkStateChanged { .. } => Opcode::NetworkStateChanged,
            Command::PacketSent { .. } => Opcode::PacketSent,
            Command::PacketDelivered { .. } => Opcode::PacketDelivered,
            Command::DebugMessage { .. } => Opcode::DebugMessage,
            Command::DebugChanged { .. } => Opcode::DebugChanged,
            Command::SubgraphPortConnected { .. } => Opcode::SubgraphPortConnected,
            Command::PortSubscriptionChanged { .. } => Opcode::PortSubscriptionChanged,
        }
    }

    /// May a host legally send this frame to the runtime?
    pub fn is_inbound(&self) -> bool {
        matches!(
            self,
            Command::Reset
                | Command::StartNetwork
                | Command::CreateComponent { .. }
                | Command::ConnectNodes { .. }
                | Command::SendPacket { .. }
                | Command::SetDebugLevel { .. }
                | Command::SubscribeToPort { .. }
                | Command::ConnectSubgraphPort { .. }
                | Command::Ping
        )
    }

    /// Parse one fixed-size frame.
    pub fn parse(buf: &[u8]) -> RillResult<Command> {
        if buf.len() < CMD_SIZE {
            return Err(RillError::FrameTooShort {
                expected: CMD_SIZE,
                actual: buf.len(),
            });
        }
        let opcode = Opcode::from_byte(buf[0]).ok_or(RillError::UnknownOpcode(buf[0]))?;
        let command = match opcode {
            Opcode::Invalid => return Err(RillError::UnknownOpcode(buf[0])),
            Opcode::Reset => Command::Reset,
            Opcode::StartNetwork => Command::StartNetwork,
            Opcode::CreateComponent => Command::CreateComponent {
                component: ComponentType::from_byte(buf[1])
                    .ok_or(RillError::UnknownComponentType(buf[1]))?,
                parent: NodeId::from_byte(buf[2]),
            },
            Opcode::ConnectNodes => Command::ConnectNodes {
                src: NodeId::from_byte(buf[1]),
                src_port: PortId::from_byte(buf[2]),
                target: NodeId::from_byte(buf[3]),
                target_port: PortId::from_byte(buf[4]),
            },
            Opcode::SendPacket => {
                let kind = PacketKind::from_byte(buf[3])
                    .ok_or(RillError::UnknownPacketKind(buf[3]))?;
                let payload = [buf[4], buf[5], buf[6], buf[7]];
                let packet = Packet::from_wire(kind, payload)
                    .ok_or(RillError::InvalidPacketKind(buf[3]))?;
                Command::SendPacket {
                    target: NodeId::from_byte(buf[1]),
                    target_port: PortId::from_byte(buf[2]),
                    packet,
                }
            }
            Opcode::SetDebugLevel => Command::SetDebugLevel {
                level: DebugLevel::from_byte(buf[1]).ok_or(RillError::UnknownDebugLevel(buf[1]))?,
            },
            Opcode::SubscribeToPort => Command::SubscribeToPort {
                node: NodeId::from_byte(buf[1]),
                port: PortId::from_byte(buf[2]),
                enable: buf[3] != 0,
            },
            Opcode::ConnectSubgraphPort => Command::ConnectSubgraphPort {
                is_output: buf[1] != 0,
                subgraph: NodeId::from_byte(buf[2]),
                subgraph_port: PortId::from_byte(buf[3]),
                child: NodeId::from_byte(buf[4]),
                child_port: PortId::from_byte(buf[5]),
            },
            Opcode::Ping => Command::Ping,
            Opcode::Pong => Command::Pong,
            Opcode::NodeAdded => Command::NodeAdded {
                parent: NodeId::from_byte(buf[1]),
                component: ComponentType::from_byte(buf[2])
                    .ok_or(RillError::UnknownComponentType(buf[2]))?,
                node: NodeId::from_byte(buf[3]),
            },
            Opcode::NodesConnected => Command::NodesConnected {
                src: NodeId::from_byte(buf[1]),
                src_port: PortId::from_byte(buf[2]),
                target: NodeId::from_byte(buf[3]),
                target_port: PortId::from_byte(buf[4]),
            },
            Opcode::NetworkStateChanged => Command::NetworkStateChanged {
                running: buf[1] != 0,
            },
            Opcode::PacketSent => Command::PacketSent {
                index: u16::from_le_bytes([buf[1], buf[2]]),
                sender: NodeId::from_byte(buf[3]),
                sender_port: PortId::from_byte(buf[4]),
                target: NodeId::from_byte(buf[5]),
                target_port: PortId::from_byte(buf[6]),
                kind: PacketKind::from_byte(buf[7])
                    .ok_or(RillError::UnknownPacketKind(buf[7]))?,
            },
            Opcode::PacketDelivered => Command::PacketDelivered {
                index: u16::from_le_bytes([buf[1], buf[2]]),
                target: NodeId::from_byte(buf[3]),
                target_port: PortId::from_byte(buf[4]),
                kind: PacketKind::from_byte(buf[5])
                    .ok_or(RillError::UnknownPacketKind(buf[5]))?,
                value: u16::from_le_bytes([buf[6], buf[7]]),
            },
            Opcode::DebugMessage => Command::DebugMessage {
                level: DebugLevel::from_byte(buf[1]).ok_or(RillError::UnknownDebugLevel(buf[1]))?,
                id: DebugId::from_byte(buf[2]).ok_or(RillError::UnknownDebugId(buf[2]))?,
            },
            Opcode::DebugChanged => Command::DebugChanged {
                level: DebugLevel::from_byte(buf[1]).ok_or(RillError::UnknownDebugLevel(buf[1]))?,
            },
            Opcode::SubgraphPortConnected => Command::SubgraphPortConnected {
                is_output: buf[1] != 0,
                subgraph: NodeId::from_byte(buf[2]),
                subgraph_port: PortId::from_byte(buf[3]),
                child: NodeId::from_byte(buf[4]),
                child_port: PortId::from_byte(buf[5]),
            },
            Opcode::PortSubscriptionChanged => Command::PortSubscriptionChanged {
                node: NodeId::from_byte(buf[1]),
                port: PortId::from_byte(buf[2]),
                enable: buf[3] != 0,
            },
        };
        Ok(command)
    }

    /// Encode to one fixed-size frame, unused payload bytes zero.
    pub fn encode(&self) -> [u8; CMD_SIZE] {
        let mut buf = [0u8; CMD_SIZE];
        buf[0] = self.opcode().to_byte();
        match *self {
            Command::Reset | Command::StartNetwork | Command::Ping | Command::Pong => {}
            Command::CreateComponent { component, parent } => {
                buf[1] = component.to_byte();
                buf[2] = parent.to_byte();
            }
            Command::ConnectNodes {
                src,
                src_port,
                target,
                target_port,
            }
            | Command::NodesConnected {
                src,
                src_port,
                target,
                target_port,
            } => {
                buf[1] = src.to_byte();
                buf[2] = src_port.to_byte();
                buf[3] = target.to_byte();
                buf[4] = target_port.to_byte();
            }
            Command::SendPacket {
                target,
                target_port,
                packet,
            } => {
                buf[1] = target.to_byte();
                buf[2] = target_port.to_byte();
                buf[3] = packet.kind().to_byte();
                buf[4..8].copy_from_slice(&packet.payload_bytes());
            }
            Command::SetDebugLevel { level } | Command::DebugChanged { level } => {
                buf[1] = level.to_byte();
            }
            Command::SubscribeToPort { node, port, enable }
            | Command::PortSubscriptionChanged { node, port, enable } => {
                buf[1] = node.to_byte();
                buf[2] = port.to_byte();
                buf[3] = enable as u8;
            }
            Command::ConnectSubgraphPort {
                is_output,
                subgraph,
                subgraph_port,
                child,
                child_port,
            }
            | Command::SubgraphPortConnected {
                is_output,
                subgraph,
                subgraph_port,
                child,
                child_port,
            } => {
                buf[1] = is_output as u8;
                buf[2] = subgraph.to_byte();
                buf[3] = subgraph_port.to_byte();
                buf[4] = child.to_byte();
                buf[5] = child_port.to_byte();
            }
            Command::NodeAdded {
                parent,
                component,
                node,
            } => {
                buf[1] = parent.to_byte();
                buf[2] = component.to_byte();
                buf[3] = node.to_byte();
            }
            Command::NetworkStateChanged { running } => {
                buf[1] = running as u8;
            }
            Command::PacketSent {
                index,
                sender,
                sender_port,
                target,
                target_port,
                kind,
            } => {
                buf[1..3].copy_from_slice(&index.to_le_bytes());
                buf[3] = sender.to_byte();
                buf[4] = sender_port.to_byte();
                buf[5] = target.to_byte();
                buf[6] = target_port.to_byte();
                buf[7] = kind.to_byte();
            }
            Command::PacketDelivered {
                index,
                target,
                target_port,
                kind,
                value,
            } => {
                buf[1..3].copy_from_slice(&index.to_le_bytes());
                buf[3] = target.to_byte();
                buf[4] = target_port.to_byte();
                buf[5] = kind.to_byte();
                buf[6..8].copy_from_slice(&value.to_le_bytes());
            }
            Command::DebugMessage { level, id } => {
                buf[1] = level.to_byte();
                buf[2] = id.to_byte();
            }
        }
        buf
    }
}
