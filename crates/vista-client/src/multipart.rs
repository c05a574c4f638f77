// multipart.rs — multipart/form-data body encoder.
//
// Bodies are built fully in memory. Field content is copied verbatim with no
// transfer encoding, so the boundary must not occur inside any field; the
// encoder does not check for that.

use std::io::{self, Read, Write};

/// One part of a multipart body.
pub struct MultipartField<'a> {
    pub name: String,
    pub filename: Option<String>,
    pub content: Box<dyn Read + 'a>,
    /// Terminate this field's delimiter with `--`.
    pub is_last: bool,
}

impl<'a> MultipartField<'a> {
    /// A plain text field.
    pub fn text(name: impl Into<String>, value: &'a str) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content: Box::new(value.as_bytes()),
            is_last: false,
        }
    }

    /// A file field streamed from `content`.
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content: impl Read + 'a,
    ) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            content: Box::new(content),
            is_last: false,
        }
    }

    pub fn last(mut self) -> Self {
        self.is_last = true;
        self
    }
}

/// `Content-Type` header value for a body built with `boundary`.
pub fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={}", boundary)
}

/// Encode `fields` in order into a single body.
///
/// Each field is written as `--boundary`, its `Content-Disposition` line, a
/// blank line, the raw content, CRLF and a `--boundary` delimiter. The
/// delimiter of the field flagged `is_last` is terminated with `--`; every
/// other field's delimiter is followed by CRLF.
pub fn encode<'a>(
    boundary: &str,
    fields: impl IntoIterator<Item = MultipartField<'a>>,
) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for field in fields {
        append_field(&mut buffer, boundary, field)?;
    }
    Ok(buffer)
}

fn append_field(
    buffer: &mut Vec<u8>,
    boundary: &str,
    mut field: MultipartField<'_>,
) -> io::Result<()> {
    write!(buffer, "--{}\r\n", boundary)?;
    write!(buffer, "Content-Disposition: form-data; name=\"{}\"", field.name)?;
    if let Some(filename) = &field.filename {
        write!(buffer, ";filename=\"{}\"", filename)?;
    }
    buffer.extend_from_slice(b"\r\n\r\n");
    io::copy(&mut field.content, buffer)?;
    write!(buffer, "\r\n--{}", boundary)?;
    if field.is_last {
        buffer.extend_from_slice(b"--");
    } else {
        buffer.extend_from_slice(b"\r\n");
    }
    Ok(())
}
