//! Messages and the circular delivery queue
//!
//! The queue is a fixed ring allocated once at bring-up. Read and write
//! indices advance monotonically; the slot is the index modulo
//! capacity, and the slot number is what the host sees as
//! `messageIndex` in PacketSent/PacketDelivered frames.

use rill_core::{NodeId, Packet, PortId, RillError, RillResult};

/// A packet in flight: target, payload, and the sender recorded for
/// debugging only (NodeId::NONE for injected messages).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message {
    pub target: NodeId,
    pub target_port: PortId,
    pub packet: Packet,
    pub sender: NodeId,
    pub sender_port: PortId,
}

impl Message {
    /// An externally injected message with no sender.
    pub fn injected(target: NodeId, target_port: PortId, packet: Packet) -> Self {
        Message {
            target,
            target_port,
            packet,
            sender: NodeId::NONE,
            sender_port: PortId::NONE,
        }
    }
}

/// Fixed-capacity FIFO over `[read, write)` slots.
#[derive(Debug)]
pub struct MessageQueue {
    slots: Box<[Option<Message>]>,
    read: usize,
    write: usize,
}

impl MessageQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        MessageQueue {
            slots: vec![None; capacity].into_boxed_slice(),
            read: 0,
            write: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.write - self.read
    }

    pub fn is_empty(&self) -> bool {
        self.read == self.write
    }

    /// Append at the tail. Returns the slot index for notification, or
    /// `QueueFull` with the queue untouched.
    pub fn push(&mut self, message: Message) -> RillResult<u16> {
        if self.len() >= self.capacity() {
            return Err(RillError::QueueFull);
        }
        let slot = self.write % self.capacity();
        self.slots[slot] = Some(message);
        self.write += 1;
        Ok(slot as u16)
    }

    /// Take from the head, with the slot index it occupied.
    pub fn pop(&mut self) -> Option<(u16, Message)> {
        if self.is_empty() {
            return None;
        }
        let slot = self.read % self.capacity();
        self.read += 1;
        self.slots[slot].take().map(|message| (slot as u16, message))
    }

    /// Discard everything in flight.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}
