//! The response record filled in by [`ResponseParser`](crate::codec::ResponseParser).

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::protocol::error::http_version;
use crate::protocol::header;
use crate::protocol::message::HttpMessage;
use crate::protocol::{ConvertError, HeaderItem};

/// A parsed (or partially parsed) HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub(crate) version_major: u16,
    pub(crate) version_minor: u16,
    pub(crate) status_code: u16,
    pub(crate) status: String,
    pub(crate) headers: Vec<HeaderItem>,
    pub(crate) content: BytesMut,
    pub(crate) keep_alive: bool,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version_major(&self) -> u16 {
        self.version_major
    }

    pub fn version_minor(&self) -> u16 {
        self.version_minor
    }

    /// Returns `(major, minor)`.
    pub fn version(&self) -> (u16, u16) {
        (self.version_major, self.version_minor)
    }

    /// Numeric status, within `100..=999` once the status line is read.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The reason phrase.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn headers(&self) -> &[HeaderItem] {
        &self.headers
    }

    /// Value of the first header named `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        header::find(&self.headers, name).map(HeaderItem::value)
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    pub fn into_content(self) -> Bytes {
        self.content.freeze()
    }

    /// Converts the record into an [`http::Response`].
    ///
    /// # Errors
    ///
    /// Fails when the version has no [`http::Version`] counterpart, or when
    /// `http` rejects the status code or a header.
    pub fn into_http(self) -> Result<http::Response<Bytes>, ConvertError> {
        let mut builder = http::Response::builder()
            .status(self.status_code)
            .version(http_version(self.version_major, self.version_minor)?);

        for item in &self.headers {
            builder = builder.header(item.name(), item.value_bytes());
        }

        Ok(builder.body(self.content.freeze())?)
    }
}

impl HttpMessage for Response {
    fn headers(&self) -> &[HeaderItem] {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Vec<HeaderItem> {
        &mut self.headers
    }

    fn content_mut(&mut self) -> &mut BytesMut {
        &mut self.content
    }

    fn version(&self) -> (u16, u16) {
        (self.version_major, self.version_minor)
    }

    fn set_keep_alive(&mut self, keep_alive: bool) {
        self.keep_alive = keep_alive;
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HTTP/{}.{} {} {}", self.version_major, self.version_minor, self.status_code, self.status)?;
        for item in &self.headers {
            writeln!(f, "{item}")?;
        }
        writeln!(f, "{}", String::from_utf8_lossy(&self.content))
    }
}
