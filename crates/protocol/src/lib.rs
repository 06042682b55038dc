//! Wire contract of the AriVa request protocol.
//!
//! Holds the uniform envelope every dispatch returns, the fixed method
//! registry, and per-method request templates for callers building their
//! first request.

pub mod envelope;
pub mod methods;

pub use envelope::error_envelope;
pub use methods::{list_methods, method_spec, request_templates, MethodSpec, METHODS};
