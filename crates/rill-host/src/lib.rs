//! Rill Host - the protocol engine between a network and a host
//!
//! [`HostCommunication`] sits on both directions of one byte pipe: a
//! byte-at-a-time parser turning inbound frames into commands, and a
//! [`NotificationHandler`](rill_graph::NotificationHandler) turning
//! runtime events into outbound frames. [`service_host`] pumps the pipe
//! and applies parsed commands to the network.

pub mod protocol;
pub mod transport;

pub use protocol::*;
pub use transport::*;
