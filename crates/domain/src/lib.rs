//! Shared domain types for the AriVa protocol core.
//!
//! Every crate in the workspace speaks the error taxonomy defined here,
//! reads its knobs from [`PlatformConfig`], and reports lifecycle milestones
//! through [`TraceEvent`].

pub mod config;
pub mod error;
pub mod trace;

pub use config::PlatformConfig;
pub use error::{Error, Result};
pub use trace::TraceEvent;
