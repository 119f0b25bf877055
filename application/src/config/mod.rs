//! Application-level configuration.
//!
//! - [`ExecutionParams`]: per-call timeouts, token budgets and the usable
//!   content threshold

pub mod execution_params;

pub use execution_params::ExecutionParams;
