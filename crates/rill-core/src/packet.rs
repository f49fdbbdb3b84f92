//! Packet - the unit of inter-node communication
//!
//! A packet is a tagged value with at most one 4-byte payload slot.
//! Numeric coercion is permissive and C-style: any packet can be read as
//! any numeric kind, with lossy narrowing following Rust `as`-cast
//! semantics. The coercion methods below are the single source of truth
//! for that table.

/// Wire tag for a packet kind.
///
/// `Invalid` and `MaxDefined` are sentinels bounding the valid range;
/// they never tag a live packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketKind {
    Invalid = 0,
    Setup = 1,
    Tick = 2,
    Void = 3,
    Boolean = 4,
    Byte = 5,
    Ascii = 6,
    Integer = 7,
    Float = 8,
    BracketStart = 9,
    BracketEnd = 10,
    MaxDefined = 11,
}

impl PacketKind {
    /// Parse from wire byte.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(PacketKind::Invalid),
            1 => Some(PacketKind::Setup),
            2 => Some(PacketKind::Tick),
            3 => Some(PacketKind::Void),
            4 => Some(PacketKind::Boolean),
            5 => Some(PacketKind::Byte),
            6 => Some(PacketKind::Ascii),
            7 => Some(PacketKind::Integer),
            8 => Some(PacketKind::Float),
            9 => Some(PacketKind::BracketStart),
            10 => Some(PacketKind::BracketEnd),
            11 => Some(PacketKind::MaxDefined),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Strictly between the sentinels.
    #[inline]
    pub fn is_valid(self) -> bool {
        !matches!(self, PacketKind::Invalid | PacketKind::MaxDefined)
    }
}

/// A tagged value flowing through the graph.
///
/// Packets are plain values: copyable, no ownership, at most 4 bytes of
/// payload. Equality is by kind and payload bit pattern (floats compare
/// by bits, so NaN payloads are equal to themselves).
#[derive(Clone, Copy, Debug)]
pub enum Packet {
    Void,
    Boolean(bool),
    Byte(u8),
    Ascii(u8),
    Integer(i32),
    Float(f32),
    BracketStart,
    BracketEnd,
    Setup,
    Tick,
}

impl Packet {
    pub fn kind(&self) -> PacketKind {
        match self {
            Packet::Void => PacketKind::Void,
            Packet::Boolean(_) => PacketKind::Boolean,
            Packet::Byte(_) => PacketKind::Byte,
            Packet::Ascii(_) => PacketKind::Ascii,
            Packet::Integer(_) => PacketKind::Integer,
            Packet::Float(_) => PacketKind::Float,
            Packet::BracketStart => PacketKind::BracketStart,
            Packet::BracketEnd => PacketKind::BracketEnd,
            Packet::Setup => PacketKind::Setup,
            Packet::Tick => PacketKind::Tick,
        }
    }

    #[inline]
    pub fn is_setup(&self) -> bool {
        matches!(self, Packet::Setup)
    }

    #[inline]
    pub fn is_tick(&self) -> bool {
        matches!(self, Packet::Tick)
    }

    /// Setup and Tick are lifecycle packets, not data.
    #[inline]
    pub fn is_special(&self) -> bool {
        self.is_setup() || self.is_tick()
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Packet::Void)
    }

    #[inline]
    pub fn is_data(&self) -> bool {
        !self.is_special()
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Packet::Boolean(_))
    }

    #[inline]
    pub fn is_byte(&self) -> bool {
        matches!(self, Packet::Byte(_))
    }

    #[inline]
    pub fn is_ascii(&self) -> bool {
        matches!(self, Packet::Ascii(_))
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Packet::Integer(_))
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, Packet::Float(_))
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    #[inline]
    pub fn is_start_bracket(&self) -> bool {
        matches!(self, Packet::BracketStart)
    }

    #[inline]
    pub fn is_end_bracket(&self) -> bool {
        matches!(self, Packet::BracketEnd)
    }

    /// Coerced boolean view. Numbers are true when nonzero.
    pub fn as_bool(&self) -> bool {
        match *self {
            Packet::Boolean(b) => b,
            Packet::Byte(v) | Packet::Ascii(v) => v != 0,
            Packet::Integer(v) => v != 0,
            Packet::Float(v) => v != 0.0,
            _ => false,
        }
    }

    /// Coerced byte view. Wide numbers narrow with `as`-cast semantics.
    pub fn as_byte(&self) -> u8 {
        match *self {
            Packet::Boolean(b) => b as u8,
            Packet::Byte(v) | Packet::Ascii(v) => v,
            Packet::Integer(v) => v as u8,
            Packet::Float(v) => v as u8,
            _ => 0,
        }
    }

    /// Coerced character view. An Ascii packet is its code point; the
    /// coercion is identical to `as_byte`.
    pub fn as_ascii(&self) -> u8 {
        self.as_byte()
    }

    /// Coerced integer view. Floats truncate toward zero.
    pub fn as_integer(&self) -> i32 {
        match *self {
            Packet::Boolean(b) => b as i32,
            Packet::Byte(v) | Packet::Ascii(v) => v as i32,
            Packet::Integer(v) => v,
            Packet::Float(v) => v as i32,
            _ => 0,
        }
    }

    /// Coerced float view.
    pub fn as_float(&self) -> f32 {
        match *self {
            Packet::Boolean(b) => b as i32 as f32,
            Packet::Byte(v) | Packet::Ascii(v) => v as f32,
            Packet::Integer(v) => v as f32,
            Packet::Float(v) => v,
            _ => 0.0,
        }
    }

    /// Wire payload: 4 bytes, little-endian, zero-padded.
    pub fn payload_bytes(&self) -> [u8; 4] {
        match *self {
            Packet::Boolean(b) => [b as u8, 0, 0, 0],
            Packet::Byte(v) | Packet::Ascii(v) => [v, 0, 0, 0],
            Packet::Integer(v) => v.to_le_bytes(),
            Packet::Float(v) => v.to_le_bytes(),
            _ => [0; 4],
        }
    }

    /// Rebuild a packet from its wire kind and payload bytes.
    /// Sentinel kinds are not constructable.
    pub fn from_wire(kind: PacketKind, payload: [u8; 4]) -> Option<Packet> {
        match kind {
            PacketKind::Void => Some(Packet::Void),
            PacketKind::Boolean => Some(Packet::Boolean(payload[0] != 0)),
            PacketKind::Byte => Some(Packet::Byte(payload[0])),
            PacketKind::Ascii => Some(Packet::Ascii(payload[0])),
            PacketKind::Integer => Some(Packet::Integer(i32::from_le_bytes(payload))),
            PacketKind::Float => Some(Packet::Float(f32::from_le_bytes(payload))),
            PacketKind::BracketStart => Some(Packet::BracketStart),
            PacketKind::BracketEnd => Some(Packet::BracketEnd),
            PacketKind::Setup => Some(Packet::Setup),
            PacketKind::Tick => Some(Packet::Tick),
            PacketKind::Invalid | PacketKind::MaxDefined => None,
        }
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Packet::Void, Packet::Void) => true,
            (Packet::Boolean(a), Packet::Boolean(b)) => a == b,
            (Packet::Byte(a), Packet::Byte(b)) => a == b,
            (Packet::Ascii(a), Packet::Ascii(b)) => a == b,
            (Packet::Integer(a), Packet::Integer(b)) => a == b,
            // Bit equality, so NaN payloads still compare equal to themselves.
            (Packet::Float(a), Packet::Float(b)) => a.to_bits() == b.to_bits(),
            (Packet::BracketStart, Packet::BracketStart) => true,
            (Packet::BracketEnd, Packet::BracketEnd) => true,
            (Packet::Setup, Packet::Setup) => true,
            (Packet::Tick, Packet::Tick) => true,
            _ => false,
        }
    }
}

impl Eq for Packet {}
