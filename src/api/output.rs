//! Purpose: Render backend results and write them to the configured sink.
//! Exports: `Printable`, `FileBody`, `render_content`, `render_metadata`, `emit`.
//! Role: Shared output half of the backend contract; transports never touch stdout.
//! Invariants: Stdout receives the printable form plus a trailing newline, files get the body.
//! Invariants: File sinks are opened, truncated, written, and closed inside one call.
use super::backend::FileMetadata;
use super::config::Sink;
use crate::core::error::{Error, ErrorKind};
use serde_json::Value;
use std::io::Write;

type ApiResult<T> = Result<T, Error>;

/// Console form of a result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Printable {
    Text(String),
    Bytes(Vec<u8>),
}

impl Printable {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Printable::Text(text) => text.as_bytes(),
            Printable::Bytes(bytes) => bytes,
        }
    }
}

/// File form of a result; the variant selects text or binary mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileBody<'a> {
    Text(&'a str),
    Binary(&'a [u8]),
}

impl FileBody<'_> {
    fn as_bytes(&self) -> &[u8] {
        match self {
            FileBody::Text(text) => text.as_bytes(),
            FileBody::Binary(bytes) => bytes,
        }
    }
}

pub fn render_content(body: &[u8], content_type: Option<&str>) -> Printable {
    let textual = content_type
        .map(|value| value.contains("text/") || value.contains("json/"))
        .unwrap_or(false);
    if textual {
        Printable::Text(String::from_utf8_lossy(body).into_owned())
    } else {
        Printable::Bytes(body.to_vec())
    }
}

pub fn render_metadata(metadata: &FileMetadata) -> String {
    metadata
        .iter()
        .map(|(key, value)| format!("{key}: {}", scalar_text(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Writes `printable` to `console` for the stdout sink, or `body` to the sink's file.
pub fn emit<W: Write>(
    console: &mut W,
    sink: &Sink,
    printable: &Printable,
    body: FileBody<'_>,
) -> ApiResult<()> {
    match sink {
        Sink::Stdout => {
            console
                .write_all(printable.as_bytes())
                .and_then(|_| console.write_all(b"\n"))
                .and_then(|_| console.flush())
                .map_err(|err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write to stdout")
                        .with_source(err)
                })
        }
        Sink::File(path) => {
            tracing::debug!(path = %path.display(), "writing output file");
            std::fs::write(path, body.as_bytes()).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to write output file")
                    .with_path(path)
                    .with_source(err)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileBody, Printable, emit, render_content, render_metadata};
    use crate::api::config::Sink;
    use crate::core::error::ErrorKind;
    use serde_json::{Map, Value, json};

    #[test]
    fn binary_content_types_stay_raw() {
        let printable = render_content(b"content", Some("application/pdf; charset=utf-8"));
        assert_eq!(printable, Printable::Bytes(b"content".to_vec()));
        assert_eq!(render_content(b"content", None), Printable::Bytes(b"content".to_vec()));
    }

    #[test]
    fn textual_content_types_decode() {
        let printable = render_content(b"content", Some("text/plain; charset=utf-8"));
        assert_eq!(printable, Printable::Text("content".to_string()));
        let printable = render_content(b"{}", Some("json/anything"));
        assert_eq!(printable, Printable::Text("{}".to_string()));
    }

    #[test]
    fn metadata_lines_keep_backend_order() {
        let mut metadata = Map::new();
        metadata.insert("attribute1".to_string(), json!("value1"));
        metadata.insert("attribute2".to_string(), json!("value2"));
        metadata.insert("att3".to_string(), json!(10));
        assert_eq!(
            render_metadata(&metadata),
            "attribute1: value1\nattribute2: value2\natt3: 10"
        );
    }

    #[test]
    fn metadata_renders_null_and_empty() {
        let mut metadata = Map::new();
        metadata.insert("size".to_string(), Value::Null);
        assert_eq!(render_metadata(&metadata), "size: null");
        assert_eq!(render_metadata(&Map::new()), "");
    }

    #[test]
    fn stdout_sink_writes_printable_and_newline() {
        let mut console = Vec::new();
        emit(
            &mut console,
            &Sink::Stdout,
            &Printable::Text("testing output".to_string()),
            FileBody::Text("ignored"),
        )
        .expect("emit");
        assert_eq!(console, b"testing output\n");
    }

    #[test]
    fn file_sink_writes_body_only() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("testing_output.txt");
        std::fs::write(&path, "stale content that is longer").expect("seed");

        let mut console = Vec::new();
        emit(
            &mut console,
            &Sink::File(path.clone()),
            &Printable::Text("printable".to_string()),
            FileBody::Binary(b"testing output"),
        )
        .expect("emit");

        assert!(console.is_empty());
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "testing output");
    }

    #[test]
    fn unwritable_file_sink_is_io_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("missing").join("out.txt");
        let err = emit(
            &mut Vec::new(),
            &Sink::File(path.clone()),
            &Printable::Bytes(Vec::new()),
            FileBody::Binary(b""),
        )
        .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.path(), Some(path.as_path()));
    }
}
