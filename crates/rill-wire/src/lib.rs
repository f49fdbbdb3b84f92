//! Rill Wire - the binary host protocol
//!
//! Frame layout is frozen: a 9-byte magic header opens the stream, then
//! every command and every notification is exactly [`CMD_SIZE`] bytes,
//! opcode first, multi-byte fields little-endian, unused trailing bytes
//! zero. Inbound and outbound frames share one opcode numbering space
//! so host toolchains stay interoperable.

pub mod command;

pub use command::*;
