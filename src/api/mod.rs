//! Purpose: Public surface of the file client library.
//! Exports: Configuration, backend contract, output rendering, transports, dispatch.
//! Role: Everything the CLI needs to resolve one identifier through one backend.
//! Invariants: Transports are chosen only through `connect`.

mod backend;
mod config;
mod dispatch;
mod output;
mod rest;
mod rpc;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind, report};
pub use backend::{Backend, FileContent, FileId, FileMetadata};
pub use config::{
    ClientConfig, DEFAULT_BACKEND, DEFAULT_BASE_URL, DEFAULT_RPC_ENDPOINT, DEFAULT_STDOUT_MARKER,
    Sink,
};
pub use dispatch::{AnyBackend, BackendKind, connect};
pub use output::{FileBody, Printable, emit, render_content, render_metadata};
pub use rest::{
    INVALID_JSON_DETAIL, NOT_OBJECT_DETAIL, RestBackend, TransportFailure, join_url, map_failure,
    sanitize_url,
};
pub use rpc::{RpcBackend, RpcChannel};
