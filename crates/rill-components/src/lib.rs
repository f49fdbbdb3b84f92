//! Rill Components - the closed component set
//!
//! This crate defines:
//! - The [`ProcessContext`] seam a component speaks through: emitting
//!   packets, reaching IO, reporting debug events
//! - [`Component`], a closed enum over every component body, dispatched
//!   by match (component-type ids are a closed set known at build time)
//! - [`SubGraph`] and the leaf library
//!
//! A component must not block: `process` runs to completion and its
//! only side-channels are the context it is handed.

pub mod basic;
pub mod component;
pub mod context;
pub mod gpio;
pub mod serial;
pub mod subgraph;
pub mod timer;

pub use basic::*;
pub use component::*;
pub use context::*;
pub use gpio::*;
pub use serial::*;
pub use subgraph::*;
pub use timer::*;
