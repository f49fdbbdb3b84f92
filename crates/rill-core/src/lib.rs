//! Rill Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the Rill runtime:
//! - Identifiers (NodeId, PortId, PinId)
//! - The Packet value type and its wire kinds
//! - Component type ids
//! - Debug levels and debug ids
//! - Capacity budgets and the shared error type

pub mod component;
pub mod debug;
pub mod error;
pub mod id;
pub mod limits;
pub mod packet;

pub use component::*;
pub use debug::*;
pub use error::*;
pub use id::*;
pub use limits::*;
pub use packet::*;
