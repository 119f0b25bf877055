//! Agent domain module
//!
//! Contains the static panel definition (roles, descriptors, rosters per
//! run mode) and the execution records the dispatcher produces.

pub mod descriptor;
pub mod execution;
pub mod mode;
pub mod role;
pub mod roster;

pub use descriptor::AgentDescriptor;
pub use execution::{AgentExecution, AgentStatus};
pub use mode::RunMode;
pub use role::{AgentRole, DEFAULT_PRIOR, ROLE_PRIORS, RolePrior};
pub use roster::Roster;
