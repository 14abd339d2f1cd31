//! HTTP/1.x parsing engines.
//!
//! Every parser here is an explicit state machine fed with byte slices of
//! any size. Each call consumes what it can, and the parser remembers its
//! position so the next slice continues exactly where the previous one
//! stopped. A byte is never looked at twice.
//!
//! # Components
//!
//! - [`RequestParser`]: request line, headers, body
//! - [`ResponseParser`]: status line, headers, body
//! - [`RequestDecoder`] / [`ResponseDecoder`]: [`tokio_util::codec::Decoder`]
//!   adapters yielding whole records from a buffered stream
//!
//! Both parsers share the header and body grammar, including chunked
//! transfer encoding with extensions and trailers.
//!
//! # Example
//!
//! ```
//! use micro_http_parser::codec::ResponseParser;
//! use micro_http_parser::protocol::{ParseResult, Response};
//!
//! let mut parser = ResponseParser::new();
//! let mut response = Response::new();
//!
//! let wire = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\n";
//! for chunk in wire.chunks(7) {
//!     if parser.parse(&mut response, chunk) != ParseResult::Incomplete {
//!         break;
//!     }
//! }
//!
//! assert_eq!(response.status_code(), 200);
//! assert_eq!(response.content(), b"hello");
//! ```

mod chars;
mod decoder;
mod message;
mod request_parser;
mod response_parser;

pub use decoder::{RequestDecoder, ResponseDecoder};
pub use request_parser::RequestParser;
pub use response_parser::ResponseParser;

/// Result of feeding one byte (or one body slice) to a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Continue,
    Completed,
    Error,
}

/// Appends decimal digit `b` to `value`, `None` on overflow.
#[inline]
pub(crate) fn push_digit(value: u16, b: u8) -> Option<u16> {
    value.checked_mul(10)?.checked_add(u16::from(b - b'0'))
}
