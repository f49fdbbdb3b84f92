//! Capacity budgets
//!
//! These are the only knobs affecting the RAM footprint of a running
//! graph. All tables are sized once at bring-up and never grow.

/// Default maximum number of concurrent nodes.
pub const MAX_NODES: usize = 50;

/// Default capacity of the circular message queue.
pub const MAX_MESSAGES: usize = 50;

/// Upper bound on port numbering across the protocol.
pub const MAX_PORTS: usize = 255;

/// Number of virtual ports on a SubGraph, input and output each.
pub const SUBGRAPH_MAXPORTS: usize = 10;
