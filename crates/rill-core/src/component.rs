//! Component type ids
//!
//! The component set is closed and known at build time; the host
//! protocol encodes the type as a single byte in CreateComponent and
//! NodeAdded frames.

/// Component type identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComponentType {
    /// Sentinel, never instantiated.
    Invalid = 0x00,
    /// Composite node forwarding through virtual ports.
    SubGraph = 0x01,
    /// Re-emits every data packet on out-port 0.
    Forward = 0x02,
    /// Accepts and discards all packets.
    Sink = 0x03,
    /// Flips an internal boolean on each data packet and emits it.
    ToggleBoolean = 0x04,
    /// Writes its input as a digital pin level.
    DigitalWritePin = 0x05,
    /// Emits the pin level on change, sampled each tick.
    DigitalReadPin = 0x06,
    /// Reads the analog value [0..1023] when triggered.
    AnalogReadPin = 0x07,
    /// Writes its input as a PWM duty cycle [0..100].
    PwmWritePin = 0x08,
    /// Emits Void each time the configured interval elapses.
    IntervalTimer = 0x09,
    /// Drains available serial input, one Byte packet per byte.
    SerialIn = 0x0A,
    /// Writes each data packet to serial as a byte.
    SerialOut = 0x0B,
}

impl ComponentType {
    /// Parse from wire byte. The sentinel is not constructable.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x01 => Some(ComponentType::SubGraph),
            0x02 => Some(ComponentType::Forward),
            0x03 => Some(ComponentType::Sink),
            0x04 => Some(ComponentType::ToggleBoolean),
            0x05 => Some(ComponentType::DigitalWritePin),
            0x06 => Some(ComponentType::DigitalReadPin),
            0x07 => Some(ComponentType::AnalogReadPin),
            0x08 => Some(ComponentType::PwmWritePin),
            0x09 => Some(ComponentType::IntervalTimer),
            0x0A => Some(ComponentType::SerialIn),
            0x0B => Some(ComponentType::SerialOut),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}
