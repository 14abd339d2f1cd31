//! Incremental HTTP/1.x message parsing and URL decomposition
//!
//! This crate provides byte-at-a-time state machines that turn HTTP/1.x
//! requests and responses into structured records, however the input is
//! split across reads. It also provides a small single-pass URL parser.
//!
//! # Features
//!
//! - Request and response parsing (HTTP/0.9 style request lines included)
//! - Header line folding
//! - `Content-Length` and chunked transfer encoding, with chunk extensions and trailers
//! - Keep-alive detection
//! - [`tokio_util::codec::Decoder`] adapters for framed streams
//! - Conversion into [`http::Request`] and [`http::Response`]
//! - URL splitting into scheme, credentials, host, port, path, query and fragment
//!
//! # Example
//!
//! ```
//! use micro_http_parser::codec::RequestParser;
//! use micro_http_parser::protocol::{ParseResult, Request};
//! use micro_http_parser::url::Url;
//!
//! let wire = b"POST /submit?id=7 HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhello";
//!
//! let mut parser = RequestParser::new();
//! let mut request = Request::new();
//! assert_eq!(parser.parse(&mut request, &wire[..20]), ParseResult::Incomplete);
//! assert_eq!(parser.parse(&mut request, &wire[20..]), ParseResult::Completed);
//!
//! assert_eq!(request.method(), "POST");
//! assert_eq!(request.content(), b"hello");
//!
//! let url = Url::parse(&format!("http://{}{}", request.header("host").unwrap(), request.uri())).unwrap();
//! assert_eq!(url.path(), "/submit");
//! assert_eq!(url.query(), "id=7");
//! assert_eq!(url.http_port(), 80);
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: the parsed records, results and error types
//! - [`codec`]: the request and response state machines and their decoders
//! - [`url`]: URL decomposition
//!
//! # Limitations
//!
//! - No header or body size limits; callers bound their input
//! - Header values are not interpreted beyond the framing and connection headers
//! - IPv6 literal hosts are rejected by the URL parser

pub mod codec;
pub mod protocol;
pub mod url;

mod utils;
pub(crate) use utils::ensure;
