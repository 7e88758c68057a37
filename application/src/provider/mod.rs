//! Provider building blocks shared by concrete backends.

mod handler;

pub use handler::{HandlerProvider, ToolHandler, describe_panic};
