//! Rill Graph - the bounded runtime network
//!
//! This crate owns the node table, the circular message queue, the
//! delivery loop, and the Stopped/Running state machine. Every mutation
//! and every observable delivery is broadcast through the
//! [`NotificationHandler`] before control returns to the caller.
//!
//! The runtime is single-threaded and cooperative: one packet is
//! processed to completion before the next is looked at, and nothing in
//! here ever blocks.

pub mod message;
pub mod network;
pub mod notify;

pub use message::*;
pub use network::*;
pub use notify::*;
