//! Purpose: Define the capability set every transport provides.
//! Exports: `Backend`, `FileId`, `FileContent`, `FileMetadata`.
//! Role: Transports implement `read`/`stat`; rendering and sink selection are provided here.
//! Invariants: `read`/`stat` either return complete data or an error, never partial content.
//! Invariants: Metadata is a passthrough of whatever keys the backend returned, in its order.
use super::config::Sink;
use super::output::{self, FileBody};
use crate::core::error::Error;
use serde_json::{Map, Value};
use std::io::{self, Write};

type ApiResult<T> = Result<T, Error>;

/// Opaque file identifier; shape checks belong to the transport.
pub type FileId = str;

pub type FileMetadata = Map<String, Value>;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FileContent {
    pub body: Vec<u8>,
    pub content_disposition: Option<String>,
    pub content_type: Option<String>,
}

pub trait Backend {
    fn read(&self, id: &FileId) -> ApiResult<FileContent>;

    fn stat(&self, id: &FileId) -> ApiResult<FileMetadata>;

    fn sink(&self) -> &Sink;

    fn read_and_emit(&self, id: &FileId) -> ApiResult<()> {
        self.read_and_emit_to(&mut io::stdout().lock(), id)
    }

    fn stat_and_emit(&self, id: &FileId) -> ApiResult<()> {
        self.stat_and_emit_to(&mut io::stdout().lock(), id)
    }

    fn read_and_emit_to<W: Write>(&self, console: &mut W, id: &FileId) -> ApiResult<()> {
        let content = self.read(id)?;
        let printable = output::render_content(&content.body, content.content_type.as_deref());
        output::emit(
            console,
            self.sink(),
            &printable,
            FileBody::Binary(&content.body),
        )
    }

    fn stat_and_emit_to<W: Write>(&self, console: &mut W, id: &FileId) -> ApiResult<()> {
        let text = output::render_metadata(&self.stat(id)?);
        output::emit(
            console,
            self.sink(),
            &output::Printable::Text(text.clone()),
            FileBody::Text(&text),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Backend, FileContent, FileId, FileMetadata};
    use crate::api::config::Sink;
    use crate::core::error::{Error, ErrorKind};
    use serde_json::json;
    use std::cell::Cell;

    struct CannedBackend {
        sink: Sink,
        content: FileContent,
        metadata: FileMetadata,
        calls: Cell<usize>,
    }

    impl CannedBackend {
        fn new(sink: Sink) -> Self {
            let mut metadata = FileMetadata::new();
            metadata.insert("key1".to_string(), json!("val1"));
            metadata.insert("key2".to_string(), json!(10));
            Self {
                sink,
                content: FileContent {
                    body: b"content read".to_vec(),
                    content_disposition: Some("attachment".to_string()),
                    content_type: Some("text/plain".to_string()),
                },
                metadata,
                calls: Cell::new(0),
            }
        }
    }

    impl Backend for CannedBackend {
        fn read(&self, _id: &FileId) -> Result<FileContent, Error> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.content.clone())
        }

        fn stat(&self, _id: &FileId) -> Result<FileMetadata, Error> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.metadata.clone())
        }

        fn sink(&self) -> &Sink {
            &self.sink
        }
    }

    struct FailingBackend {
        sink: Sink,
    }

    impl Backend for FailingBackend {
        fn read(&self, _id: &FileId) -> Result<FileContent, Error> {
            Err(Error::new(ErrorKind::FileNotFound))
        }

        fn stat(&self, _id: &FileId) -> Result<FileMetadata, Error> {
            Err(Error::new(ErrorKind::FileNotFound))
        }

        fn sink(&self) -> &Sink {
            &self.sink
        }
    }

    const ID: &str = "1f2b5c6e-3d4e-5f6g-7h8i-9j0k1l2m3n4o";

    #[test]
    fn read_and_emit_prints_decoded_text() {
        let backend = CannedBackend::new(Sink::Stdout);
        let mut console = Vec::new();
        backend.read_and_emit_to(&mut console, ID).expect("emit");
        assert_eq!(backend.calls.get(), 1);
        assert_eq!(console, b"content read\n");
    }

    #[test]
    fn stat_and_emit_prints_key_value_lines() {
        let backend = CannedBackend::new(Sink::Stdout);
        let mut console = Vec::new();
        backend.stat_and_emit_to(&mut console, ID).expect("emit");
        assert_eq!(backend.calls.get(), 1);
        assert_eq!(console, b"key1: val1\nkey2: 10\n");
    }

    #[test]
    fn stat_and_emit_writes_text_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("stat.txt");
        let backend = CannedBackend::new(Sink::File(path.clone()));
        let mut console = Vec::new();
        backend.stat_and_emit_to(&mut console, ID).expect("emit");
        assert!(console.is_empty());
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "key1: val1\nkey2: 10"
        );
    }

    #[test]
    fn failures_propagate_without_output() {
        let mut console = Vec::new();
        let backend = FailingBackend { sink: Sink::Stdout };
        let err = backend
            .read_and_emit_to(&mut console, ID)
            .expect_err("err");
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(console.is_empty());
    }
}
