//! Multipart form values.
//!
//! A form is an ordered list of entries, each decided by the caller to be
//! either a text field or a file field. File content comes either from memory
//! or from an `AttachmentSource` that the host environment supplies.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Content type used for file parts that do not declare one.
pub const DEFAULT_FILE_CONTENT_TYPE: &str = "application/octet-stream";

/// Host-provided capability that yields the full bytes of an attachment.
pub trait AttachmentSource: Send + Sync + fmt::Debug {
    /// Read the attachment completely into memory.
    fn read_all(&self) -> BoxFuture<'_, io::Result<Vec<u8>>>;
}

/// Attachment backed by a file on disk, read with `tokio::fs`.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    path: PathBuf,
}

impl FileAttachment {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AttachmentSource for FileAttachment {
    fn read_all(&self) -> BoxFuture<'_, io::Result<Vec<u8>>> {
        Box::pin(tokio::fs::read(&self.path))
    }
}

/// Where a file field's bytes come from.
#[derive(Clone)]
pub enum FileSource {
    /// Already resident in memory.
    Bytes(Vec<u8>),
    /// Read on demand during encoding.
    Lazy(Arc<dyn AttachmentSource>),
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSource::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            FileSource::Lazy(source) => f.debug_tuple("Lazy").field(source).finish(),
        }
    }
}

impl FileSource {
    /// Resolve the source to bytes, awaiting lazy attachments.
    pub async fn read_all(&self) -> io::Result<Vec<u8>> {
        match self {
            FileSource::Bytes(bytes) => Ok(bytes.clone()),
            FileSource::Lazy(source) => source.read_all().await,
        }
    }
}

/// A named file attachment.
#[derive(Debug, Clone)]
pub struct FileField {
    pub name: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub source: FileSource,
}

impl FileField {
    /// File field with in-memory content.
    pub fn from_bytes(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            content_type,
            source: FileSource::Bytes(bytes.into()),
        }
    }

    /// File field whose content is read from `source` at encode time.
    pub fn lazy(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: Option<String>,
        source: Arc<dyn AttachmentSource>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            content_type,
            source: FileSource::Lazy(source),
        }
    }

    /// Declared content type, or `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or(DEFAULT_FILE_CONTENT_TYPE)
    }

    /// In-memory content, if the field is not lazy.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.source {
            FileSource::Bytes(bytes) => Some(bytes),
            FileSource::Lazy(_) => None,
        }
    }
}

/// One form entry.
#[derive(Debug, Clone)]
pub enum FormEntry {
    Text { name: String, value: String },
    File(FileField),
}

impl FormEntry {
    pub fn name(&self) -> &str {
        match self {
            FormEntry::Text { name, .. } => name,
            FormEntry::File(file) => &file.name,
        }
    }
}

/// Ordered collection of text and file entries.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    entries: Vec<FormEntry>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(FormEntry::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn append_file(&mut self, file: FileField) {
        self.entries.push(FormEntry::File(file));
    }

    /// First text field named `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            FormEntry::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// First file field named `name`.
    pub fn file(&self, name: &str) -> Option<&FileField> {
        self.entries.iter().find_map(|entry| match entry {
            FormEntry::File(file) if file.name == name => Some(file),
            _ => None,
        })
    }

    pub fn entries(&self) -> &[FormEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct FileSummary<'a>(&'a FileField);

impl Serialize for FileSummary<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("filename", &self.0.filename)?;
        map.serialize_entry("contentType", self.0.content_type())?;
        map.serialize_entry("size", &self.0.bytes().map(<[u8]>::len))?;
        map.end()
    }
}

struct Section<'a> {
    entries: &'a [FormEntry],
    files: bool,
}

impl Serialize for Section<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for entry in self.entries {
            match entry {
                FormEntry::Text { name, value } if !self.files => {
                    map.serialize_entry(name, value)?
                }
                FormEntry::File(file) if self.files => {
                    map.serialize_entry(&file.name, &FileSummary(file))?
                }
                _ => {}
            }
        }
        map.end()
    }
}

/// Serializes as `{"fields": {...}, "files": {name: {filename, contentType, size}}}`.
impl Serialize for FormData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "fields",
            &Section {
                entries: &self.entries,
                files: false,
            },
        )?;
        map.serialize_entry(
            "files",
            &Section {
                entries: &self.entries,
                files: true,
            },
        )?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct StaticSource(&'static [u8]);

    impl AttachmentSource for StaticSource {
        fn read_all(&self) -> BoxFuture<'_, io::Result<Vec<u8>>> {
            Box::pin(async move { Ok(self.0.to_vec()) })
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let mut form = FormData::new();
        form.append_text("title", "hello");
        form.append_file(FileField::from_bytes("upload", "a.txt", None, b"abc".to_vec()));

        assert_eq!(form.text("title"), Some("hello"));
        assert_eq!(form.text("upload"), None);
        let file = form.file("upload").unwrap();
        assert_eq!(file.content_type(), DEFAULT_FILE_CONTENT_TYPE);
        assert_eq!(file.bytes(), Some(&b"abc"[..]));
    }

    #[tokio::test]
    async fn test_lazy_source_is_read_on_demand() {
        let file = FileField::lazy("doc", "doc.bin", None, Arc::new(StaticSource(b"lazy")));
        assert!(file.bytes().is_none());
        assert_eq!(file.source.read_all().await.unwrap(), b"lazy");
    }

    #[test]
    fn test_serialized_summary() {
        let mut form = FormData::new();
        form.append_text("a", "1");
        form.append_file(FileField::from_bytes(
            "f",
            "x.png",
            Some("image/png".into()),
            vec![0u8; 4],
        ));

        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["fields"]["a"], "1");
        assert_eq!(value["files"]["f"]["filename"], "x.png");
        assert_eq!(value["files"]["f"]["contentType"], "image/png");
        assert_eq!(value["files"]["f"]["size"], 4);
    }
}
