//! Debug levels and debug event ids
//!
//! Every soft failure and noteworthy runtime condition is reported as a
//! (level, id) pair through the notification handler, filtered by the
//! network's current debug level, and mirrored to the host as a
//! DebugMessage frame.

/// Verbosity threshold, ordered. An event at `level` passes a current
/// threshold `t` when `level <= t`; `Off` suppresses everything because
/// no event is emitted at level `Off`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum DebugLevel {
    Off = 0,
    #[default]
    Error = 1,
    Info = 2,
    Detailed = 3,
}

impl DebugLevel {
    /// Parse from wire byte.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(DebugLevel::Off),
            1 => Some(DebugLevel::Error),
            2 => Some(DebugLevel::Info),
            3 => Some(DebugLevel::Detailed),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Does an event at `event` pass this threshold?
    #[inline]
    pub fn allows(self, event: DebugLevel) -> bool {
        event <= self
    }
}

/// Debug event identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DebugId {
    Invalid = 0x00,
    // Capacity overruns
    NodeUpperLimitReached = 0x01,
    MessageQueueFull = 0x02,
    SubgraphPortOverflow = 0x03,
    // Protocol errors
    CommandParseError = 0x04,
    UnknownOpcode = 0x05,
    MagicMismatch = 0x06,
    // State errors
    NotRunning = 0x07,
    NetworkAlreadyRunning = 0x08,
    // I/O
    IoOperationNotImplemented = 0x09,
    // Integrity
    InvalidPacket = 0x0A,
    InvalidNodeId = 0x0B,
    InvalidPortId = 0x0C,
}

impl DebugId {
    /// Parse from wire byte.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(DebugId::Invalid),
            0x01 => Some(DebugId::NodeUpperLimitReached),
            0x02 => Some(DebugId::MessageQueueFull),
            0x03 => Some(DebugId::SubgraphPortOverflow),
            0x04 => Some(DebugId::CommandParseError),
            0x05 => Some(DebugId::UnknownOpcode),
            0x06 => Some(DebugId::MagicMismatch),
            0x07 => Some(DebugId::NotRunning),
            0x08 => Some(DebugId::NetworkAlreadyRunning),
            0x09 => Some(DebugId::IoOperationNotImplemented),
            0x0A => Some(DebugId::InvalidPacket),
            0x0B => Some(DebugId::InvalidNodeId),
            0x0C => Some(DebugId::InvalidPortId),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}
