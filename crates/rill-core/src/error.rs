//! Error types for the Rill runtime
//!
//! One error enum shared by all crates. Errors are never fatal to a
//! running graph: the network mirrors them as debug events (see
//! [`RillError::debug_id`]) and drops the offending operation.

use thiserror::Error;

use crate::{DebugId, NodeId, PortId};

/// Core Rill errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RillError {
    // Wire errors
    #[error("frame too short: expected {expected}, got {actual}")]
    FrameTooShort { expected: usize, actual: usize },

    #[error("unknown opcode: {0:#04x}")]
    UnknownOpcode(u8),

    #[error("unknown packet kind: {0:#04x}")]
    UnknownPacketKind(u8),

    #[error("packet kind {0:#04x} carries no value")]
    InvalidPacketKind(u8),

    #[error("unknown component type: {0:#04x}")]
    UnknownComponentType(u8),

    #[error("unknown debug level: {0:#04x}")]
    UnknownDebugLevel(u8),

    #[error("unknown debug id: {0:#04x}")]
    UnknownDebugId(u8),

    // Graph errors
    #[error("node table full")]
    NodeLimitReached,

    #[error("message queue full")]
    QueueFull,

    #[error("invalid node id: {0}")]
    InvalidNodeId(NodeId),

    #[error("node {0} is not a subgraph")]
    NotASubgraph(NodeId),

    #[error("invalid port: {0}")]
    InvalidPort(PortId),

    #[error("subgraph port out of range: {0}")]
    SubgraphPortOverflow(PortId),

    #[error("network is not running")]
    NotRunning,

    #[error("network already running")]
    AlreadyRunning,

    // IO errors
    #[error("io operation not implemented: {0}")]
    IoUnsupported(&'static str),
}

impl RillError {
    /// The debug event mirrored to the host for this error.
    pub fn debug_id(&self) -> DebugId {
        match self {
            RillError::FrameTooShort { .. }
            | RillError::UnknownComponentType(_)
            | RillError::UnknownDebugLevel(_)
            | RillError::UnknownDebugId(_) => DebugId::CommandParseError,
            RillError::UnknownOpcode(_) => DebugId::UnknownOpcode,
            RillError::UnknownPacketKind(_) | RillError::InvalidPacketKind(_) => {
                DebugId::InvalidPacket
            }
            RillError::NodeLimitReached => DebugId::NodeUpperLimitReached,
            RillError::QueueFull => DebugId::MessageQueueFull,
            RillError::InvalidNodeId(_) | RillError::NotASubgraph(_) => DebugId::InvalidNodeId,
            RillError::InvalidPort(_) => DebugId::InvalidPortId,
            RillError::SubgraphPortOverflow(_) => DebugId::SubgraphPortOverflow,
            RillError::NotRunning => DebugId::NotRunning,
            RillError::AlreadyRunning => DebugId::NetworkAlreadyRunning,
            RillError::IoUnsupported(_) => DebugId::IoOperationNotImplemented,
        }
    }
}

/// Result type for Rill operations.
pub type RillResult<T> = Result<T, RillError>;
