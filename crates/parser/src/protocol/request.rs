//! The request record filled in by [`RequestParser`](crate::codec::RequestParser).

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::protocol::error::http_version;
use crate::protocol::header::{self, latin1_octets};
use crate::protocol::message::HttpMessage;
use crate::protocol::{ConvertError, HeaderItem};

/// A parsed (or partially parsed) HTTP request.
///
/// The record is mutated in place while bytes arrive. After
/// [`ParseResult::Error`](crate::protocol::ParseResult::Error) it still holds
/// whatever was read up to the bad byte and should be discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) uri: String,
    pub(crate) version_major: u16,
    pub(crate) version_minor: u16,
    pub(crate) headers: Vec<HeaderItem>,
    pub(crate) content: BytesMut,
    pub(crate) keep_alive: bool,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The raw request target, not percent-decoded.
    pub fn uri(&self) -> &str {
        &self.uri
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

    /// Consumes the record and returns its body.
    pub fn into_content(self) -> Bytes {
        self.content.freeze()
    }

    /// Converts the record into an [`http::Request`].
    ///
    /// # Errors
    ///
    /// Fails when the version has no [`http::Version`] counterpart, or when
    /// `http` rejects the method, the uri or a header.
    pub fn into_http(self) -> Result<http::Request<Bytes>, ConvertError> {
        let mut builder = http::Request::builder()
            .method(self.method.as_str())
            .uri(latin1_octets(&self.uri))
            .version(http_version(self.version_major, self.version_minor)?);

        for item in &self.headers {
            builder = builder.header(item.name(), item.value_bytes());
        }

        Ok(builder.body(self.content.freeze())?)
    }
}

impl HttpMessage for Request {
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

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} HTTP/{}.{}", self.method, self.uri, self.version_major, self.version_minor)?;
        for item in &self.headers {
            writeln!(f, "{item}")?;
        }
        writeln!(f, "{}", String::from_utf8_lossy(&self.content))?;
        writeln!(f, "+ keep-alive: {}", self.keep_alive)
    }
}
