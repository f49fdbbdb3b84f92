//! Rill IO - hardware capability boundary
//!
//! This crate provides:
//! - The [`Io`] trait the runtime consumes for hardware effects
//! - The interrupt [`Mailbox`] decoupling interrupt context from the
//!   runtime loop
//! - [`MockIo`], a full in-memory implementation for tests
//!
//! Every operation defaults to unsupported so targets implement only
//! the subset their hardware has; callers mirror the `IoUnsupported`
//! error as an `IoOperationNotImplemented` debug event.

pub mod capability;
pub mod mailbox;
pub mod mock;

pub use capability::*;
pub use mailbox::*;
pub use mock::*;
