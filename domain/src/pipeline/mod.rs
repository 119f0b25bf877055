//! Pipeline plumbing shared by the stages: the stage sequence, progress
//! events, the append-only context and the final result.

pub mod context;
pub mod event;
pub mod result;
pub mod stage;

pub use context::{ContextError, PipelineContext};
pub use event::{ProgressEvent, SNIPPET_CHARS};
pub use result::PipelineResult;
pub use stage::Stage;
