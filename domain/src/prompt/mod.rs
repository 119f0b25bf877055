//! Prompt domain
//!
//! Templates for the three model-facing stages: panel fan-out, critique and
//! the final writer pass.

mod template;

pub use template::PromptTemplate;
