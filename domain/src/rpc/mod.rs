//! JSON-RPC 2.0 envelopes
//!
//! The gateway is an in-process contract; when it is exposed as a
//! standalone service these envelopes mirror the tool protocol types on the
//! wire. Only the request/response subset is modelled: no notifications
//! are emitted and nothing is streamed.

mod envelope;

pub use envelope::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId, error_codes};
