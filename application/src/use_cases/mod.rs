//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod agent_call;
pub mod critique;
pub mod dispatch;
pub mod final_write;
pub mod run_pipeline;

#[cfg(test)]
pub(crate) mod test_support;
