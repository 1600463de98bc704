//! Tool protocol: JSON-RPC 2.0 messages over newline-delimited JSON
//!
//! - `messages`: request/response envelopes, error codes, result shapes
//! - `codec`: line decoding and encoding

mod codec;
mod messages;

pub use codec::{decode_line, encode_message};
pub use messages::{
    Content, ErrorCode, JSONRPC_VERSION, PROTOCOL_VERSION, RpcError, RpcRequest, RpcResponse, ToolCallParams,
    ToolCallResult, ToolListResult, initialize_result,
};
