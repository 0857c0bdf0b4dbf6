//! Function registry for the shopping assistant.
//!
//! Maps the fixed set of catalog function names to their implementations,
//! produces the schemas advertised to the remote assistant service, and
//! dispatches incoming calls - converting every per-call failure into an
//! error output rather than aborting the batch.

mod error;
mod executor;
mod registry;
mod types;

pub mod builtin;

pub use error::ToolError;
pub use executor::ToolExecutor;
pub use registry::ToolRegistry;
pub use types::*;
