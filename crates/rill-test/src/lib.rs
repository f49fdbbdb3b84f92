//! Rill Test Harness - end-to-end protocol and graph validation
//!
//! This crate provides:
//! - [`TestBench`], a complete runtime wired the way a device boots it:
//!   network + host protocol engine + in-memory transport + mock IO
//! - Frame-level helpers for scripting host sessions and asserting on
//!   the mirrored event stream
//!
//! The end-to-end scenario suite, the invariants suite, the protocol
//! fuzzer and the wire benchmarks live in `tests/` and `benches/`.

pub mod harness;

pub use harness::*;
