//! Purpose: Define the closed error taxonomy surfaced by the file client.
//! Exports: `Error`, `ErrorKind`, `report`, `to_exit_code`.
//! Role: Shared by transports, dispatcher, output sink, and the CLI boundary.
//! Invariants: Client kinds carry a fixed user-facing header.
//! Invariants: Client errors are printed once, by `report`, where they are created.
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Generic,
    InvalidArgument,
    FileNotFound,
    FailedPrecondition,
    InvalidUrl,
    Config,
    Unimplemented,
    Io,
    Usage,
}

impl ErrorKind {
    /// True for the kinds a backend call can surface to the user as a client error.
    pub fn is_client(self) -> bool {
        matches!(
            self,
            ErrorKind::Generic
                | ErrorKind::InvalidArgument
                | ErrorKind::FileNotFound
                | ErrorKind::FailedPrecondition
                | ErrorKind::InvalidUrl
        )
    }

    pub fn header(self) -> &'static str {
        match self {
            ErrorKind::Generic => "An unexpected client exception occurred. More details:",
            ErrorKind::InvalidArgument => "Invalid UUID entered.",
            ErrorKind::FileNotFound => "File was not found on the remote server.",
            ErrorKind::FailedPrecondition => "The remote service failed.",
            ErrorKind::InvalidUrl => "Invalid URL was entered.",
            ErrorKind::Config => "Invalid configuration.",
            ErrorKind::Unimplemented => "Operation not implemented.",
            ErrorKind::Io => "Output could not be written.",
            ErrorKind::Usage => "Invalid usage.",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    path: Option<PathBuf>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            path: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The `"{header} {detail}"` line shown to the user; detail may be empty.
    pub fn client_line(&self) -> String {
        format!("{} {}", self.kind.header(), self.message.as_deref().unwrap_or(""))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_client() {
            return f.write_str(&self.client_line());
        }
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// Builds a client error and prints its header line to stderr before handing it back.
pub fn report(kind: ErrorKind, detail: impl Into<String>) -> Error {
    let err = Error::new(kind).with_message(detail);
    tracing::debug!(kind = ?kind, "client error");
    eprintln!("{}", err.client_line());
    err
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Generic => 1,
        ErrorKind::Usage => 2,
        ErrorKind::FileNotFound => 3,
        ErrorKind::InvalidArgument => 4,
        ErrorKind::FailedPrecondition => 5,
        ErrorKind::InvalidUrl => 6,
        ErrorKind::Config => 7,
        ErrorKind::Unimplemented => 8,
        ErrorKind::Io => 9,
    }
}
