//! Purpose: Choose the transport named by the configuration.
//! Exports: `BackendKind`, `AnyBackend`, `connect`.
//! Role: The only place a backend selector string is interpreted.
//! Invariants: `rest` selects REST; `rpc` and `grpc` select RPC; anything else is `Config`.
use super::backend::{Backend, FileContent, FileId, FileMetadata};
use super::config::{ClientConfig, Sink};
use super::rest::RestBackend;
use super::rpc::RpcBackend;
use crate::core::error::{Error, ErrorKind};

type ApiResult<T> = Result<T, Error>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BackendKind {
    Rest,
    Rpc,
}

impl BackendKind {
    pub fn parse(selector: &str) -> ApiResult<Self> {
        match selector {
            "rest" => Ok(BackendKind::Rest),
            "rpc" | "grpc" => Ok(BackendKind::Rpc),
            other => Err(Error::new(ErrorKind::Config)
                .with_message("Backend not supported")
                .with_hint(format!("Unknown backend '{other}'; use rest or rpc."))),
        }
    }
}

pub enum AnyBackend {
    Rest(RestBackend),
    Rpc(RpcBackend),
}

impl AnyBackend {
    pub fn kind(&self) -> BackendKind {
        match self {
            AnyBackend::Rest(_) => BackendKind::Rest,
            AnyBackend::Rpc(_) => BackendKind::Rpc,
        }
    }
}

pub fn connect(config: &ClientConfig) -> ApiResult<AnyBackend> {
    let kind = BackendKind::parse(&config.backend)?;
    tracing::debug!(backend = ?kind, "selected backend");
    match kind {
        BackendKind::Rest => Ok(AnyBackend::Rest(RestBackend::new(config))),
        BackendKind::Rpc => RpcBackend::new(config).map(AnyBackend::Rpc),
    }
}

impl Backend for AnyBackend {
    fn read(&self, id: &FileId) -> ApiResult<FileContent> {
        match self {
            AnyBackend::Rest(backend) => backend.read(id),
            AnyBackend::Rpc(backend) => backend.read(id),
        }
    }

    fn stat(&self, id: &FileId) -> ApiResult<FileMetadata> {
        match self {
            AnyBackend::Rest(backend) => backend.stat(id),
            AnyBackend::Rpc(backend) => backend.stat(id),
        }
    }

    fn sink(&self) -> &Sink {
        match self {
            AnyBackend::Rest(backend) => backend.sink(),
            AnyBackend::Rpc(backend) => backend.sink(),
        }
    }
}
