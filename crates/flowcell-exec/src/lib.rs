//! Run pipeline: the execution-service client and the dispatcher that
//! drives `Idle → Running → {Succeeded, Failed}` for each cell run, plus
//! the `GraphSession` façade consuming the typed command surface.

pub mod dispatcher;
pub mod service;
pub mod session;

pub use dispatcher::{RunDispatcher, RunHandle, RUNNING_SENTINEL};
pub use service::{ExecuteRequest, ExecuteResponse, ExecutionService, HttpExecutionService};
pub use session::{CommandEffect, GraphSession};
