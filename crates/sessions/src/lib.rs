//! Session lifecycle for the AriVa protocol core.
//!
//! One store owns every session record of a platform handle: creation with
//! capacity accounting, snapshot reads, activity touches, caller-authorized
//! close and context replacement, and the idle staleness sweep.

pub mod store;

pub use store::{Session, SessionStatus, SessionStore, StoreCounts};
