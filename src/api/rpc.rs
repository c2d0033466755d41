//! Purpose: Placeholder RPC transport for the file service.
//! Exports: `RpcBackend`.
//! Role: Holds a lazy channel target; calls are not wired yet.
//! Invariants: Construction performs no network I/O.
//! Invariants: `read`/`stat` always fail with `Unimplemented`, never return empty data.
use super::backend::{Backend, FileContent, FileId, FileMetadata};
use super::config::{ClientConfig, Sink};
use crate::core::error::{Error, ErrorKind};

type ApiResult<T> = Result<T, Error>;

/// Insecure channel target; dialled on first call.
///
/// Targets follow gRPC naming (`host`, `host:port`, `dns:///host:port`, `unix:path`),
/// so only values that can never name a target are rejected here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RpcChannel {
    target: String,
}

impl RpcChannel {
    pub fn insecure(endpoint: &str) -> ApiResult<Self> {
        if endpoint.is_empty() || endpoint.chars().any(char::is_whitespace) {
            return Err(Error::new(ErrorKind::Config)
                .with_message(format!("invalid rpc endpoint '{endpoint}'"))
                .with_hint("Use a gRPC target like localhost:50051."));
        }
        Ok(Self {
            target: endpoint.to_string(),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

pub struct RpcBackend {
    channel: RpcChannel,
    sink: Sink,
}

impl RpcBackend {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let channel = RpcChannel::insecure(&config.rpc_endpoint)?;
        tracing::debug!(endpoint = %channel.target(), "rpc channel configured");
        Ok(Self {
            channel,
            sink: config.output.clone(),
        })
    }

    pub fn channel(&self) -> &RpcChannel {
        &self.channel
    }
}

// TODO: replace with File service calls once the read/stat message schema is published.
impl Backend for RpcBackend {
    fn read(&self, _id: &FileId) -> ApiResult<FileContent> {
        Err(unimplemented("read"))
    }

    fn stat(&self, _id: &FileId) -> ApiResult<FileMetadata> {
        Err(unimplemented("stat"))
    }

    fn sink(&self) -> &Sink {
        &self.sink
    }
}

fn unimplemented(operation: &str) -> Error {
    Error::new(ErrorKind::Unimplemented)
        .with_message(format!("rpc {operation} is not implemented"))
        .with_hint("Use --backend rest.")
}

#[cfg(test)]
mod tests {
    use super::{RpcBackend, RpcChannel};
    use crate::api::backend::Backend;
    use crate::api::config::ClientConfig;
    use crate::core::error::ErrorKind;

    #[test]
    fn default_endpoint_builds_channel() {
        let backend = RpcBackend::new(&ClientConfig::new()).expect("backend");
        assert_eq!(backend.channel().target(), "localhost:50051");
    }

    #[test]
    fn grpc_target_forms_are_kept_verbatim() {
        for endpoint in [
            "localhost",
            "localhost:50051",
            "dns:///files.internal:50051",
            "unix:/run/files.sock",
            "[::1]:50051",
        ] {
            let channel = RpcChannel::insecure(endpoint).expect(endpoint);
            assert_eq!(channel.target(), endpoint);
        }
    }

    #[test]
    fn portless_target_reaches_unimplemented_call() {
        let config = ClientConfig::new().with_rpc_endpoint("localhost");
        let backend = RpcBackend::new(&config).expect("backend");
        let err = backend.stat("id").expect_err("stat");
        assert_eq!(err.kind(), ErrorKind::Unimplemented);
    }

    #[test]
    fn blank_or_spaced_endpoints_are_config_errors() {
        for endpoint in ["", "not an endpoint", "localhost:50051 "] {
            let err = RpcChannel::insecure(endpoint).expect_err(endpoint);
            assert_eq!(err.kind(), ErrorKind::Config, "endpoint {endpoint:?}");
        }
    }

    #[test]
    fn calls_fail_as_unimplemented() {
        let backend = RpcBackend::new(&ClientConfig::new()).expect("backend");
        let read = backend.read("id").expect_err("read");
        assert_eq!(read.kind(), ErrorKind::Unimplemented);
        assert_eq!(read.message(), Some("rpc read is not implemented"));
        let stat = backend.stat("id").expect_err("stat");
        assert_eq!(stat.kind(), ErrorKind::Unimplemented);
    }
}
