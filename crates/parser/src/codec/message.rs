//! Header block and body grammar shared by the request and response parsers.
//!
//! Once the start line has been read, both message kinds continue with the
//! same states: header lines (with obsolete line folding), the blank line
//! that ends them, then either a `Content-Length` body or a chunked body as
//! described in [RFC 7230 Section 4.1](https://tools.ietf.org/html/rfc7230#section-4.1).
//!
//! Bodies are copied in slices; every other state consumes exactly one byte.

use std::cmp;

use tracing::trace;
use MessageState::*;

use crate::codec::chars::{is_control, is_token};
use crate::codec::Step;
use crate::protocol::{keep_alive, HeaderItem, HttpMessage};

/// Upper bound of a single capacity reservation made from a declared length.
///
/// The declared length is only a hint, the body still grows past it.
const MAX_RESERVE_HINT: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageState {
    /// First byte of a header line, or CR of the blank line
    HeaderLineStart,
    /// Leading whitespace of a folded continuation line
    HeaderLws,
    HeaderName,
    /// The single SP after the colon
    SpaceBeforeHeaderValue,
    HeaderValue,
    /// LF ending a header line
    ExpectingNewline2,
    /// LF ending the header block
    ExpectingNewline3,
    /// Fixed-length body bytes
    Body,
    /// Hex digits of a chunk size
    ChunkSize,
    ChunkExtensionName,
    ChunkExtensionValue,
    /// LF ending a chunk-size line or a trailer line
    ChunkSizeNewLine,
    /// CR of the final blank line, or first byte of a trailer
    ChunkSizeNewLine2,
    /// LF of the final blank line
    ChunkSizeNewLine3,
    ChunkTrailerName,
    ChunkTrailerValue,
    ChunkData,
    /// CR after chunk data
    ChunkDataNewLine1,
    /// LF after chunk data
    ChunkDataNewLine2,
}

/// State machine for everything after the start line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MessageParser {
    state: MessageState,
    /// Whether `Content-Length` and `Transfer-Encoding` decide the body
    framing: bool,
    /// Body bytes still expected
    content_size: u64,
    /// Bytes left in the current chunk
    chunk_size: u64,
    /// Text of the chunk-size line being read
    chunk_size_str: String,
    chunked: bool,
}

impl MessageParser {
    /// Creates a parser positioned at the first header line.
    ///
    /// With `framing` false the message never has a body, whatever its
    /// headers say.
    pub(crate) fn new(framing: bool) -> Self {
        Self { state: HeaderLineStart, framing, content_size: 0, chunk_size: 0, chunk_size_str: String::new(), chunked: false }
    }

    pub(crate) fn state(&self) -> MessageState {
        self.state
    }

    /// Feeds `src` to the machine.
    ///
    /// Returns the step that stopped it and how many bytes were consumed.
    /// `Step::Continue` means all of `src` was consumed.
    pub(crate) fn advance<M: HttpMessage>(&mut self, msg: &mut M, src: &[u8]) -> (Step, usize) {
        let mut pos = 0;

        while pos < src.len() {
            match self.state {
                Body => {
                    let len = take_len(self.content_size, src.len() - pos);
                    msg.content_mut().extend_from_slice(&src[pos..pos + len]);
                    pos += len;
                    self.content_size -= len as u64;

                    if self.content_size == 0 {
                        return (Step::Completed, pos);
                    }
                }

                ChunkData => {
                    let len = take_len(self.chunk_size, src.len() - pos);
                    msg.content_mut().extend_from_slice(&src[pos..pos + len]);
                    pos += len;
                    self.chunk_size -= len as u64;
                    trace!(len, remaining = self.chunk_size, "read chunk data");

                    if self.chunk_size == 0 {
                        self.state = ChunkDataNewLine1;
                    }
                }

                _ => {
                    let b = src[pos];
                    pos += 1;
                    match self.step(msg, b) {
                        Step::Continue => {}
                        step => return (step, pos),
                    }
                }
            }
        }

        (Step::Continue, pos)
    }

    fn step<M: HttpMessage>(&mut self, msg: &mut M, b: u8) -> Step {
        self.state = match (self.state, b) {
            (HeaderLineStart, b'\r') => {
                let keep_alive = keep_alive(msg.headers(), msg.version());
                msg.set_keep_alive(keep_alive);
                ExpectingNewline3
            }
            (HeaderLineStart, b' ' | b'\t') if !msg.headers().is_empty() => HeaderLws,
            (HeaderLineStart, b) if is_token(b) => {
                msg.headers_mut().push(HeaderItem::starting_with(b));
                HeaderName
            }

            (HeaderLws, b'\r') => ExpectingNewline2,
            (HeaderLws, b' ' | b'\t') => HeaderLws,
            (HeaderLws, b) if !is_control(b) => match msg.headers_mut().last_mut() {
                Some(item) => {
                    item.push_value(b);
                    HeaderValue
                }
                None => return Step::Error,
            },

            (HeaderName, b':') => SpaceBeforeHeaderValue,
            (HeaderName, b) if is_token(b) => match msg.headers_mut().last_mut() {
                Some(item) => {
                    item.push_name(b);
                    HeaderName
                }
                None => return Step::Error,
            },

            (SpaceBeforeHeaderValue, b' ') => HeaderValue,

            (HeaderValue, b'\r') => {
                if self.framing {
                    self.inspect_framing(msg);
                }
                ExpectingNewline2
            }
            (HeaderValue, b) if !is_control(b) => match msg.headers_mut().last_mut() {
                Some(item) => {
                    item.push_value(b);
                    HeaderValue
                }
                None => return Step::Error,
            },

            (ExpectingNewline2, b'\n') => HeaderLineStart,

            (ExpectingNewline3, b'\n') => {
                if self.chunked {
                    ChunkSize
                } else if self.content_size == 0 {
                    return Step::Completed;
                } else {
                    Body
                }
            }

            (ChunkSize, b) if b.is_ascii_alphanumeric() => {
                self.chunk_size_str.push(char::from(b));
                ChunkSize
            }
            (ChunkSize, b';') => ChunkExtensionName,
            (ChunkSize, b'\r') => ChunkSizeNewLine,

            // extensions are tolerated and ignored
            (ChunkExtensionName, b) if b.is_ascii_alphanumeric() || b == b' ' => ChunkExtensionName,
            (ChunkExtensionName, b'=') => ChunkExtensionValue,
            (ChunkExtensionName, b'\r') => ChunkSizeNewLine,

            (ChunkExtensionValue, b) if b.is_ascii_alphanumeric() || b == b' ' => ChunkExtensionValue,
            (ChunkExtensionValue, b'\r') => ChunkSizeNewLine,

            (ChunkSizeNewLine, b'\n') => {
                self.chunk_size = parse_hex(&self.chunk_size_str);
                self.chunk_size_str.clear();
                msg.content_mut().reserve(reserve_hint(self.chunk_size));

                if self.chunk_size == 0 { ChunkSizeNewLine2 } else { ChunkData }
            }

            (ChunkSizeNewLine2, b'\r') => ChunkSizeNewLine3,
            (ChunkSizeNewLine2, b) if b.is_ascii_alphabetic() => ChunkTrailerName,

            (ChunkSizeNewLine3, b'\n') => {
                trace!("finished reading chunked data");
                return Step::Completed;
            }

            // trailers are skipped, each line loops back through ChunkSizeNewLine
            // with an empty size, which reads as zero
            (ChunkTrailerName, b) if b.is_ascii_alphanumeric() => ChunkTrailerName,
            (ChunkTrailerName, b':') => ChunkTrailerValue,

            (ChunkTrailerValue, b) if b.is_ascii_alphanumeric() || b == b' ' => ChunkTrailerValue,
            (ChunkTrailerValue, b'\r') => ChunkSizeNewLine,

            (ChunkDataNewLine1, b'\r') => ChunkDataNewLine2,
            (ChunkDataNewLine2, b'\n') => ChunkSize,

            _ => return Step::Error,
        };

        Step::Continue
    }

    /// Looks at the header just finished for body framing information.
    fn inspect_framing<M: HttpMessage>(&mut self, msg: &mut M) {
        let Some(item) = msg.headers().last() else {
            return;
        };

        if item.is(http::header::CONTENT_LENGTH.as_str()) {
            self.content_size = parse_decimal(item.value());
            trace!(content_size = self.content_size, "read content-length");
            msg.content_mut().reserve(reserve_hint(self.content_size));
        } else if item.is(http::header::TRANSFER_ENCODING.as_str()) && item.value().eq_ignore_ascii_case("chunked") {
            self.chunked = true;
        }
    }
}

/// How many of `available` bytes belong to a body with `remaining` bytes left.
#[inline]
fn take_len(remaining: u64, available: usize) -> usize {
    usize::try_from(remaining).map_or(available, |remaining| cmp::min(remaining, available))
}

#[inline]
fn reserve_hint(size: u64) -> usize {
    usize::try_from(size).map_or(MAX_RESERVE_HINT, |size| cmp::min(size, MAX_RESERVE_HINT))
}

/// Lenient decimal conversion in the manner of C `atoi`.
///
/// Leading whitespace and a `+` sign are skipped, digits are read up to the
/// first non-digit, and anything unparsable yields 0. Overflow saturates.
pub(crate) fn parse_decimal(s: &str) -> u64 {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let s = s.strip_prefix('+').unwrap_or(s);

    s.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')))
}

/// Lenient base-16 conversion: leading hex digits, 0 if there are none.
pub(crate) fn parse_hex(s: &str) -> u64 {
    s.chars()
        .map_while(|c| c.to_digit(16))
        .fold(0u64, |acc, digit| acc.saturating_mul(16).saturating_add(u64::from(digit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Response;

    fn run(framing: bool, src: &[u8]) -> (Step, usize, Response, MessageParser) {
        let mut parser = MessageParser::new(framing);
        let mut response = Response::new();
        let (step, consumed) = parser.advance(&mut response, src);
        (step, consumed, response, parser)
    }

    #[test]
    fn lenient_decimal() {
        assert_eq!(parse_decimal("42"), 42);
        assert_eq!(parse_decimal("  42"), 42);
        assert_eq!(parse_decimal("+7"), 7);
        assert_eq!(parse_decimal("12abc"), 12);
        assert_eq!(parse_decimal("abc"), 0);
        assert_eq!(parse_decimal("-5"), 0);
        assert_eq!(parse_decimal(""), 0);
        assert_eq!(parse_decimal("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn lenient_hex() {
        assert_eq!(parse_hex("10"), 16);
        assert_eq!(parse_hex("fF"), 255);
        assert_eq!(parse_hex("1z"), 1);
        assert_eq!(parse_hex("z"), 0);
        assert_eq!(parse_hex(""), 0);
    }

    #[test]
    fn empty_header_block() {
        let (step, consumed, response, _) = run(true, b"\r\nrest");
        assert_eq!(step, Step::Completed);
        assert_eq!(consumed, 2);
        assert!(response.headers().is_empty());
    }

    #[test]
    fn header_lines() {
        let (step, consumed, response, _) = run(true, b"Host: a\r\nX-Empty: \r\n\r\n");
        assert_eq!(step, Step::Completed);
        assert_eq!(consumed, 22);
        assert_eq!(response.headers(), &[HeaderItem::new("Host", "a"), HeaderItem::new("X-Empty", "")]);
    }

    #[test]
    fn folded_header() {
        let (step, _, response, _) = run(true, b"X-Long: abc\r\n   def\r\n\tghi\r\n\r\n");
        assert_eq!(step, Step::Completed);
        assert_eq!(response.headers(), &[HeaderItem::new("X-Long", "abcdefghi")]);
    }

    #[test]
    fn fold_without_header_is_error() {
        let (step, consumed, _, parser) = run(true, b" abc\r\n\r\n");
        assert_eq!(step, Step::Error);
        assert_eq!(consumed, 1);
        assert_eq!(parser.state(), HeaderLineStart);
    }

    #[test]
    fn colon_needs_space() {
        let (step, consumed, _, parser) = run(true, b"Host:a\r\n\r\n");
        assert_eq!(step, Step::Error);
        assert_eq!(consumed, 6);
        assert_eq!(parser.state(), SpaceBeforeHeaderValue);
    }

    #[test]
    fn special_in_header_name() {
        let (step, _, _, parser) = run(true, b"Ho(st: a\r\n\r\n");
        assert_eq!(step, Step::Error);
        assert_eq!(parser.state(), HeaderName);
    }

    #[test]
    fn control_in_header_value() {
        let (step, _, _, parser) = run(true, b"Host: a\x01b\r\n\r\n");
        assert_eq!(step, Step::Error);
        assert_eq!(parser.state(), HeaderValue);
    }

    #[test]
    fn missing_lf_after_header_block() {
        let (step, consumed, _, _) = run(true, b"Content-Length: 2\r\n\rXhi");
        assert_eq!(step, Step::Error);
        assert_eq!(consumed, 21);
    }

    #[test]
    fn fixed_length_body_stops_at_length() {
        let (step, consumed, response, _) = run(true, b"Content-Length: 3\r\n\r\nabcdef");
        assert_eq!(step, Step::Completed);
        assert_eq!(consumed, 24);
        assert_eq!(response.content(), b"abc");
    }

    #[test]
    fn framing_disabled_ignores_length() {
        let (step, consumed, response, _) = run(false, b"Content-Length: 3\r\n\r\nabc");
        assert_eq!(step, Step::Completed);
        assert_eq!(consumed, 21);
        assert!(response.content().is_empty());
    }

    #[test]
    fn invalid_length_means_no_body() {
        let (step, consumed, response, _) = run(true, b"Content-Length: abc\r\n\r\nxyz");
        assert_eq!(step, Step::Completed);
        assert_eq!(consumed, 23);
        assert!(response.content().is_empty());
    }

    #[test]
    fn chunked_body() {
        let (step, _, response, _) = run(true, b"Transfer-Encoding: Chunked\r\n\r\n5\r\nhello\r\n7\r\n, world\r\n0\r\n\r\n");
        assert_eq!(step, Step::Completed);
        assert_eq!(response.content(), b"hello, world");
    }

    #[test]
    fn chunked_wins_over_length() {
        let (step, _, response, _) =
            run(true, b"Content-Length: 100\r\nTransfer-Encoding: chunked\r\n\r\n3\r\nabc\r\n0\r\n\r\n");
        assert_eq!(step, Step::Completed);
        assert_eq!(response.content(), b"abc");
    }

    #[test]
    fn chunk_extensions() {
        let (step, _, response, _) = run(true, b"Transfer-Encoding: chunked\r\n\r\n5;name=value\r\nhello\r\n0;last\r\n\r\n");
        assert_eq!(step, Step::Completed);
        assert_eq!(response.content(), b"hello");
    }

    #[test]
    fn chunk_trailers() {
        let (step, consumed, response, _) =
            run(true, b"Transfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\nExpires: never\r\nChecksum: 1234\r\n\r\nnext");
        assert_eq!(step, Step::Completed);
        assert_eq!(response.content(), b"hello");
        assert_eq!(consumed, 77);
    }

    #[test]
    fn chunk_data_without_crlf() {
        let (step, _, response, parser) = run(true, b"Transfer-Encoding: chunked\r\n\r\n5\r\nhelloXX");
        assert_eq!(step, Step::Error);
        assert_eq!(response.content(), b"hello");
        assert_eq!(parser.state(), ChunkDataNewLine1);
    }

    #[test]
    fn bad_chunk_size_byte() {
        let (step, _, _, parser) = run(true, b"Transfer-Encoding: chunked\r\n\r\n5-\r\n");
        assert_eq!(step, Step::Error);
        assert_eq!(parser.state(), ChunkSize);
    }

    #[test]
    fn incomplete_keeps_state() {
        let mut parser = MessageParser::new(true);
        let mut response = Response::new();

        assert_eq!(parser.advance(&mut response, b"Transfer-Encoding: chunked\r\n\r\n1"), (Step::Continue, 31));
        assert_eq!(parser.state(), ChunkSize);
        assert_eq!(parser.advance(&mut response, b"0\r\n0123456789"), (Step::Continue, 13));
        assert_eq!(parser.state(), ChunkData);
        assert_eq!(parser.advance(&mut response, b"abcdef\r\n0\r\n\r\n"), (Step::Completed, 13));
        assert_eq!(response.content(), b"0123456789abcdef");
    }
}
