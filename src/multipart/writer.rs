//! Multipart/form-data writer.
//!
//! # Design Decisions
//! - One part per entry, in form order, each opened by `--<boundary>` CRLF
//! - Attachments are read fully before concatenation so the length is known
//! - Output always ends with `--<boundary>--` CRLF

use crate::error::{CodecError, CodecResult};
use crate::message::{FormData, FormEntry};

/// Serialize `form` into a boundary-delimited body.
pub async fn write_form(form: &FormData, boundary: &str) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();

    for entry in form.entries() {
        out.extend_from_slice(b"--");
        out.extend_from_slice(boundary.as_bytes());
        out.extend_from_slice(b"\r\n");

        match entry {
            FormEntry::Text { name, value } => {
                out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                        escape_param(name)
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(value.as_bytes());
            }
            FormEntry::File(file) => {
                let content =
                    file.source
                        .read_all()
                        .await
                        .map_err(|source| CodecError::Attachment {
                            name: file.name.clone(),
                            source,
                        })?;
                out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        escape_param(&file.name),
                        escape_param(&file.filename)
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(
                    format!("Content-Type: {}\r\n\r\n", file.content_type()).as_bytes(),
                );
                out.extend_from_slice(&content);
            }
        }
        out.extend_from_slice(b"\r\n");
    }

    out.extend_from_slice(b"--");
    out.extend_from_slice(boundary.as_bytes());
    out.extend_from_slice(b"--\r\n");

    Ok(out)
}

/// Escape a quoted `Content-Disposition` parameter value.
///
/// Quotes and backslashes are backslash-escaped; CR and LF are percent-encoded
/// so the value cannot end the header line.
fn escape_param(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\r' => out.push_str("%0D"),
            '\n' => out.push_str("%0A"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    use futures_util::future::BoxFuture;

    use crate::message::{AttachmentSource, FileField};
    use crate::multipart::read_form;

    #[derive(Debug)]
    struct FailingSource;

    impl AttachmentSource for FailingSource {
        fn read_all(&self) -> BoxFuture<'_, io::Result<Vec<u8>>> {
            Box::pin(async { Err(io::Error::new(io::ErrorKind::NotFound, "gone")) })
        }
    }

    #[tokio::test]
    async fn test_text_field_layout() {
        let mut form = FormData::new();
        form.append_text("name", "John");

        let body = write_form(&form, "b").await.unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "--b\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nJohn\r\n--b--\r\n"
        );
    }

    #[tokio::test]
    async fn test_file_field_layout() {
        let mut form = FormData::new();
        form.append_file(FileField::from_bytes("f", "a.bin", None, vec![0u8, 1, 2]));

        let body = write_form(&form, "b").await.unwrap();
        let mut expected = b"--b\r\n\
            Content-Disposition: form-data; name=\"f\"; filename=\"a.bin\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n"
            .to_vec();
        expected.extend_from_slice(&[0, 1, 2]);
        expected.extend_from_slice(b"\r\n--b--\r\n");
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn test_empty_form_is_terminator_only() {
        let body = write_form(&FormData::new(), "b").await.unwrap();
        assert_eq!(body, b"--b--\r\n");
    }

    #[tokio::test]
    async fn test_round_trip_through_reader() {
        let mut form = FormData::new();
        form.append_text("title", "Report");
        form.append_file(FileField::from_bytes(
            "doc",
            "r.pdf",
            Some("application/pdf".into()),
            b"%PDF\r\n\r\nbinary".to_vec(),
        ));

        let body = write_form(&form, "XyZ").await.unwrap();
        let decoded = read_form(&body, "XyZ");

        assert_eq!(decoded.text("title"), Some("Report"));
        let file = decoded.file("doc").unwrap();
        assert_eq!(file.filename, "r.pdf");
        assert_eq!(file.content_type(), "application/pdf");
        assert_eq!(file.bytes(), Some(&b"%PDF\r\n\r\nbinary"[..]));
    }

    #[tokio::test]
    async fn test_round_trip_quoted_names() {
        let mut form = FormData::new();
        form.append_text("say \"hi\"", "ok");
        form.append_file(FileField::from_bytes("doc", "q1;q2 report.txt", None, "x"));

        let body = write_form(&form, "b").await.unwrap();
        let decoded = read_form(&body, "b");

        assert_eq!(decoded.text("say \"hi\""), Some("ok"));
        assert_eq!(decoded.file("doc").unwrap().filename, "q1;q2 report.txt");
    }

    #[test]
    fn test_escape_param() {
        assert_eq!(escape_param("plain.txt"), "plain.txt");
        assert_eq!(escape_param("a\"b\\c"), "a\\\"b\\\\c");
        assert_eq!(escape_param("x\r\ny"), "x%0D%0Ay");
    }

    #[tokio::test]
    async fn test_attachment_failure() {
        let mut form = FormData::new();
        form.append_file(FileField::lazy("f", "x", None, Arc::new(FailingSource)));

        let err = write_form(&form, "b").await.unwrap_err();
        assert!(matches!(err, CodecError::Attachment { ref name, .. } if name == "f"));
    }
}
