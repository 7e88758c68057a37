//! Use cases
//!
//! Application-level operations that orchestrate the gateway.

pub mod execute_tool_batch;
pub mod handle_rpc;
