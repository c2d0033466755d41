//! Purpose: Hold the per-invocation client configuration.
//! Exports: `ClientConfig`, `Sink`, default constants.
//! Role: Built once by the CLI, read by the dispatcher and transport constructors.
//! Invariants: Read-only after construction; passed by reference, never global.
use std::path::PathBuf;

pub const DEFAULT_STDOUT_MARKER: &str = "-";
pub const DEFAULT_BACKEND: &str = "rpc";
pub const DEFAULT_RPC_ENDPOINT: &str = "localhost:50051";
pub const DEFAULT_BASE_URL: &str = "http://localhost/";

/// Where rendered output goes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Sink {
    #[default]
    Stdout,
    File(PathBuf),
}

impl Sink {
    pub fn parse(raw: &str) -> Self {
        if raw == DEFAULT_STDOUT_MARKER {
            Sink::Stdout
        } else {
            Sink::File(PathBuf::from(raw))
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    pub backend: String,
    pub rpc_endpoint: String,
    pub base_url: String,
    pub output: Sink,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            rpc_endpoint: DEFAULT_RPC_ENDPOINT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            output: Sink::Stdout,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    pub fn with_rpc_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.rpc_endpoint = endpoint.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output(mut self, output: Sink) -> Self {
        self.output = output;
        self
    }
}
