//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: the validated user query
//! - [`redact`]: secret scrubbing applied at every outbound boundary
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod query;
pub mod redact;
pub mod string;
