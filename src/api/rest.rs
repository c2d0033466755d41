//! Purpose: Implement the backend contract over the file service's REST endpoints.
//! Exports: `RestBackend`, `TransportFailure`, `join_url`, `sanitize_url`, `map_failure`.
//! Role: Builds `file/{id}/read/` and `file/{id}/stat/` targets, issues GETs, maps failures.
//! Invariants: Targets are percent-encoded with `/`, `:` and `@` left literal.
//! Invariants: 404 is always `FileNotFound`; a scheme-less target is always `InvalidUrl`.
//! Invariants: Every failure is reported once, where it is mapped.
use super::backend::{Backend, FileContent, FileId, FileMetadata};
use super::config::{ClientConfig, Sink};
use crate::core::error::{Error, ErrorKind, report};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use std::io::Read;
use url::Url;

type ApiResult<T> = Result<T, Error>;

pub const INVALID_JSON_DETAIL: &str = "The file returned is not a valid JSON.";
pub const NOT_OBJECT_DETAIL: &str = "The file metadata returned is not a JSON object.";

const RELATIVE_SCHEMES: &[&str] = &[
    "ftp", "http", "gopher", "nntp", "imap", "wais", "file", "https", "shttp", "mms",
    "prospero", "rtsp", "rtsps", "rtspu", "sftp", "svn", "svn+ssh", "ws", "wss",
];

const URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/')
    .remove(b':')
    .remove(b'@');

/// Transport-level outcome before it is folded into the client taxonomy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransportFailure {
    MissingScheme(String),
    Status { code: u16, detail: String },
    Other(String),
}

pub struct RestBackend {
    base_url: String,
    sink: Sink,
    agent: ureq::Agent,
}

impl RestBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            sink: config.output.clone(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn read_url(&self, id: &FileId) -> String {
        sanitize_url(&self.base_url, &format!("file/{id}/read/"))
    }

    pub fn stat_url(&self, id: &FileId) -> String {
        sanitize_url(&self.base_url, &format!("file/{id}/stat/"))
    }

    fn get(&self, url: &str) -> Result<ureq::Response, TransportFailure> {
        if let Err(url::ParseError::RelativeUrlWithoutBase) = Url::parse(url) {
            return Err(TransportFailure::MissingScheme(format!(
                "Invalid URL '{url}': No scheme supplied."
            )));
        }
        tracing::debug!(url, "GET");
        match self.agent.get(url).call() {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(code, response)) => Err(TransportFailure::Status {
                code,
                detail: format!("{code} {} for url: {url}", response.status_text()),
            }),
            Err(ureq::Error::Transport(err)) => Err(TransportFailure::Other(err.to_string())),
        }
    }
}

impl Backend for RestBackend {
    fn read(&self, id: &FileId) -> ApiResult<FileContent> {
        let url = self.read_url(id);
        let response = self.get(&url).map_err(map_failure)?;
        let content_disposition = response.header("Content-Disposition").map(str::to_string);
        let content_type = response.header("Content-Type").map(str::to_string);
        let body = read_body(response)?;
        tracing::debug!(bytes = body.len(), "read complete");
        Ok(FileContent {
            body,
            content_disposition,
            content_type,
        })
    }

    fn stat(&self, id: &FileId) -> ApiResult<FileMetadata> {
        let url = self.stat_url(id);
        let response = self.get(&url).map_err(map_failure)?;
        let body = read_body(response)?;
        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(metadata)) => Ok(metadata),
            Ok(_) => Err(report(ErrorKind::Generic, NOT_OBJECT_DETAIL)),
            Err(_) => Err(report(ErrorKind::Generic, INVALID_JSON_DETAIL)),
        }
    }

    fn sink(&self) -> &Sink {
        &self.sink
    }
}

fn read_body(response: ureq::Response) -> ApiResult<Vec<u8>> {
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|err| map_failure(TransportFailure::Other(err.to_string())))?;
    Ok(body)
}

/// Folds a transport failure into the client taxonomy and reports it.
pub fn map_failure(failure: TransportFailure) -> Error {
    match failure {
        TransportFailure::MissingScheme(detail) => report(ErrorKind::InvalidUrl, detail),
        TransportFailure::Status { code: 404, .. } => report(ErrorKind::FileNotFound, ""),
        TransportFailure::Status { detail, .. } | TransportFailure::Other(detail) => {
            report(ErrorKind::Generic, detail)
        }
    }
}

pub fn sanitize_url(base_url: &str, path: &str) -> String {
    utf8_percent_encode(&join_url(base_url, path), URL_SAFE).to_string()
}

/// Resolves `reference` against `base` on the raw strings, without normalizing either.
/// A base whose scheme does not take relative references leaves `reference` untouched.
pub fn join_url(base: &str, reference: &str) -> String {
    if scheme_of(reference).is_some() {
        return reference.to_string();
    }
    if let Some(scheme) = scheme_of(base) {
        let scheme = scheme.to_ascii_lowercase();
        if !RELATIVE_SCHEMES.contains(&scheme.as_str()) {
            return reference.to_string();
        }
    }
    let base = base.split(['?', '#']).next().unwrap_or_default();
    let (origin, base_path) = split_origin(base);
    if reference.starts_with('/') {
        return format!("{origin}{reference}");
    }
    let directory = match base_path.rfind('/') {
        Some(index) => &base_path[..=index],
        None if origin.is_empty() => "",
        None => "/",
    };
    format!("{origin}{directory}{reference}")
}

/// Leading `ALPHA *(ALPHA / DIGIT / "+" / "-" / ".")` before the first `:`.
fn scheme_of(value: &str) -> Option<&str> {
    let (scheme, _) = value.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    let valid = first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

fn has_authority(value: &str) -> bool {
    match value.find("://") {
        Some(index) => !value[..index].contains('/'),
        None => false,
    }
}

fn split_origin(base: &str) -> (&str, &str) {
    if !has_authority(base) {
        return ("", base);
    }
    let authority_start = base.find("://").map(|index| index + 3).unwrap_or(0);
    match base[authority_start..].find('/') {
        Some(offset) => base.split_at(authority_start + offset),
        None => (base, ""),
    }
}
