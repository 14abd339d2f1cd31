use std::io;
use thiserror::Error;

/// Errors raised by the framed decoders.
///
/// The parsers themselves only report [`ParseResult`](crate::protocol::ParseResult);
/// this type exists for callers that drive them through
/// [`tokio_util::codec::Decoder`].
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed http message")]
    Malformed,

    #[error("connection closed in the middle of a message")]
    UnexpectedEof,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, ParseError::Malformed)
    }
}

/// Errors raised while turning a parsed record into an [`http`] message.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("http version {major}.{minor} has no http::Version counterpart")]
    UnsupportedVersion { major: u16, minor: u16 },

    #[error("http error: {source}")]
    Http {
        #[from]
        source: http::Error,
    },
}

impl ConvertError {
    pub fn unsupported_version(major: u16, minor: u16) -> Self {
        Self::UnsupportedVersion { major, minor }
    }
}

/// Maps a parsed version pair onto [`http::Version`].
pub(crate) fn http_version(major: u16, minor: u16) -> Result<http::Version, ConvertError> {
    match (major, minor) {
        (0, 9) => Ok(http::Version::HTTP_09),
        (1, 0) => Ok(http::Version::HTTP_10),
        (1, 1) => Ok(http::Version::HTTP_11),
        (2, 0) => Ok(http::Version::HTTP_2),
        (3, 0) => Ok(http::Version::HTTP_3),
        _ => Err(ConvertError::unsupported_version(major, minor)),
    }
}
