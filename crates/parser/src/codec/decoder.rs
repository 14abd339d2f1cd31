//! [`Decoder`] adapters over the incremental parsers.
//!
//! These let a [`FramedRead`](tokio_util::codec::FramedRead) turn a byte
//! stream into a stream of records. Pipelined messages are supported: the
//! bytes after a completed message stay in the buffer for the next call.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_http_parser::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from(&b"GET /a HTTP/1.1\r\n\r\nGET /b HT"[..]);
//!
//! let first = decoder.decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(first.uri(), "/a");
//! assert!(decoder.decode(&mut buffer).unwrap().is_none());
//! assert!(buffer.is_empty());
//! ```

use std::mem;

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::{RequestParser, ResponseParser};
use crate::protocol::{ParseError, ParseResult, Request, Response};

/// Decodes a stream of bytes into [`Request`]s.
#[derive(Debug, Default)]
pub struct RequestDecoder {
    parser: RequestParser,
    request: Request,
    /// An HTTP/0.9 request completes at its CR; the LF may still be pending
    skip_newline: bool,
}

impl RequestDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Feeds the buffered bytes to the parser.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))` once a request is complete, the parser is then
    ///   ready for the next one
    /// - `Ok(None)` when more data is needed
    /// - `Err(ParseError::Malformed)` if the bytes are not a valid request
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.skip_newline && !src.is_empty() {
            if src[0] == b'\n' {
                src.advance(1);
            }
            self.skip_newline = false;
        }

        if src.is_empty() {
            return Ok(None);
        }

        let (result, consumed) = self.parser.consume(&mut self.request, src);
        src.advance(consumed);

        match result {
            ParseResult::Completed => {
                trace!(consumed, remaining = src.len(), "decoded request");
                self.parser.reset();
                self.skip_newline = self.request.version() == (0, 9);
                Ok(Some(mem::take(&mut self.request)))
            }
            ParseResult::Incomplete => Ok(None),
            ParseResult::Error => Err(ParseError::Malformed),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(request) => Ok(Some(request)),
            None if self.parser.is_idle() => Ok(None),
            None => Err(ParseError::UnexpectedEof),
        }
    }
}

/// Decodes a stream of bytes into [`Response`]s.
#[derive(Debug, Default)]
pub struct ResponseDecoder {
    parser: ResponseParser,
    response: Response,
}

impl ResponseDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for ResponseDecoder {
    type Item = Response;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let (result, consumed) = self.parser.consume(&mut self.response, src);
        src.advance(consumed);

        match result {
            ParseResult::Completed => {
                trace!(consumed, remaining = src.len(), "decoded response");
                self.parser.reset();
                Ok(Some(mem::take(&mut self.response)))
            }
            ParseResult::Incomplete => Ok(None),
            ParseResult::Error => Err(ParseError::Malformed),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(response) => Ok(Some(response)),
            None if self.parser.is_idle() => Ok(None),
            None => Err(ParseError::UnexpectedEof),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use tokio_util::codec::FramedRead;

    #[test]
    fn pipelined_requests() {
        let mut buffer = BytesMut::from(&b"POST /a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcGET /b HTTP/1.0\r\n\r\n"[..]);
        let mut decoder = RequestDecoder::new();

        let first = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(first.uri(), "/a");
        assert_eq!(first.content(), b"abc");

        let second = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(second.uri(), "/b");
        assert!(!second.keep_alive());

        assert!(buffer.is_empty());
        assert!(decoder.decode(&mut buffer).unwrap().is_none());
    }

    #[test]
    fn partial_request_across_calls() {
        let mut buffer = BytesMut::from(&b"GET /a HT"[..]);
        let mut decoder = RequestDecoder::new();

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        assert!(buffer.is_empty());

        buffer.extend_from_slice(b"TP/1.1\r\nHost: x\r\n\r\n");
        let request = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(request.header("host"), Some("x"));
    }

    #[test]
    fn malformed_request() {
        let mut buffer = BytesMut::from(&b"GET /a\x01 HTTP/1.1\r\n\r\n"[..]);
        let mut decoder = RequestDecoder::new();

        let err = decoder.decode(&mut buffer).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn eof_in_the_middle() {
        let mut buffer = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nabc"[..]);
        let mut decoder = ResponseDecoder::new();

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        assert!(matches!(decoder.decode_eof(&mut buffer), Err(ParseError::UnexpectedEof)));
    }

    #[test]
    fn eof_between_messages() {
        let mut buffer = BytesMut::from(&b"HTTP/1.1 204 No Content\r\n\r\n"[..]);
        let mut decoder = ResponseDecoder::new();

        assert!(decoder.decode_eof(&mut buffer).unwrap().is_some());
        assert!(decoder.decode_eof(&mut buffer).unwrap().is_none());
    }

    #[test]
    fn http09_newline_arrives_later() {
        let mut buffer = BytesMut::from(&b"GET /old\r"[..]);
        let mut decoder = RequestDecoder::new();

        let request = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(request.version(), (0, 9));
        assert!(buffer.is_empty());

        buffer.extend_from_slice(b"\nGET /next HTTP/1.1\r\n\r\n");
        let next = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(next.uri(), "/next");
        assert!(decoder.decode_eof(&mut buffer).unwrap().is_none());
    }

    #[tokio::test]
    async fn framed_read_http09_request() {
        let src: &[u8] = b"GET /old\r\n";
        let mut frames = FramedRead::new(src, RequestDecoder::new());

        let request = frames.next().await.unwrap().unwrap();
        assert_eq!(request.uri(), "/old");
        assert_eq!(request.version(), (0, 9));

        assert!(frames.next().await.is_none());
    }

    #[tokio::test]
    async fn framed_read_stream() {
        let src: &[u8] = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n2\r\nok\r\n0\r\n\r\nHTTP/1.1 304 Not Modified\r\n\r\n";
        let mut frames = FramedRead::new(src, ResponseDecoder::new());

        let first = frames.next().await.unwrap().unwrap();
        assert_eq!(first.status_code(), 200);
        assert_eq!(first.content(), b"ok");

        let second = frames.next().await.unwrap().unwrap();
        assert_eq!(second.status_code(), 304);
        assert_eq!(second.status(), "Not Modified");

        assert!(frames.next().await.is_none());
    }
}
