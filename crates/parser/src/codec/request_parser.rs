//! Incremental parser for HTTP/1.x requests.
//!
//! The request line is read by the states of this module; headers and body
//! are delegated to the shared [`MessageParser`]. Input can be split at any
//! byte, the parser resumes exactly where the previous call stopped.
//!
//! # Example
//!
//! ```
//! use micro_http_parser::codec::RequestParser;
//! use micro_http_parser::protocol::{ParseResult, Request};
//!
//! let mut parser = RequestParser::new();
//! let mut request = Request::new();
//!
//! assert_eq!(parser.parse(&mut request, b"GET /index.html HTTP/1.1\r\nHo"), ParseResult::Incomplete);
//! assert_eq!(parser.parse(&mut request, b"st: localhost\r\n\r\n"), ParseResult::Completed);
//!
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.uri(), "/index.html");
//! assert_eq!(request.header("host"), Some("localhost"));
//! assert!(request.keep_alive());
//! ```

use tracing::trace;
use RequestState::*;

use crate::codec::chars::{is_control, is_digit, is_token};
use crate::codec::message::MessageParser;
use crate::codec::{push_digit, Step};
use crate::protocol::{ParseResult, Request};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestState {
    MethodStart,
    Method,
    UriStart,
    Uri,
    VersionH,
    VersionHt,
    VersionHtt,
    VersionHttp,
    VersionSlash,
    VersionMajorStart,
    VersionMajor,
    VersionMinorStart,
    VersionMinor,
    /// LF ending the request line
    NewLine,
    /// Headers and body, see [`MessageParser`]
    Message,
}

/// Incremental HTTP request parser.
///
/// One instance reads one message. After a terminal [`ParseResult`] it keeps
/// answering the same result without consuming anything until
/// [`RequestParser::reset`] is called.
#[derive(Debug, Clone)]
pub struct RequestParser {
    state: RequestState,
    message: MessageParser,
    outcome: Option<ParseResult>,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self { state: MethodStart, message: MessageParser::new(false), outcome: None }
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parser to its initial state, ready for a new message.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns true if no byte of the current message has been consumed yet.
    pub fn is_idle(&self) -> bool {
        self.state == MethodStart && self.outcome.is_none()
    }

    /// Feeds `buf` into `req`.
    ///
    /// See [`RequestParser::consume`] for a variant reporting how many bytes
    /// were used.
    pub fn parse(&mut self, req: &mut Request, buf: &[u8]) -> ParseResult {
        self.consume(req, buf).0
    }

    /// Feeds `buf` into `req` and returns the result with the number of bytes
    /// consumed.
    ///
    /// On [`ParseResult::Incomplete`] the count is always `buf.len()`. On
    /// [`ParseResult::Completed`] the bytes after the count belong to the
    /// next message.
    pub fn consume(&mut self, req: &mut Request, buf: &[u8]) -> (ParseResult, usize) {
        if let Some(outcome) = self.outcome {
            return (outcome, 0);
        }

        let mut pos = 0;
        while pos < buf.len() {
            let step = if self.state == Message {
                let (step, consumed) = self.message.advance(req, &buf[pos..]);
                pos += consumed;
                step
            } else {
                let b = buf[pos];
                pos += 1;
                self.step(req, b)
            };

            match step {
                Step::Continue => {}
                Step::Completed => {
                    trace!(
                        method = req.method(),
                        headers = req.headers().len(),
                        content = req.content().len(),
                        keep_alive = req.keep_alive(),
                        "parsed request"
                    );
                    return self.finish(ParseResult::Completed, pos);
                }
                Step::Error => {
                    trace!(state = ?self.state, message_state = ?self.message.state(), offset = pos - 1, "malformed request");
                    return self.finish(ParseResult::Error, pos);
                }
            }
        }

        (ParseResult::Incomplete, pos)
    }

    fn finish(&mut self, outcome: ParseResult, consumed: usize) -> (ParseResult, usize) {
        self.outcome = Some(outcome);
        (outcome, consumed)
    }

    fn step(&mut self, req: &mut Request, b: u8) -> Step {
        self.state = match (self.state, b) {
            (MethodStart, b) if is_token(b) => {
                req.method.push(char::from(b));
                Method
            }

            (Method, b' ') => UriStart,
            (Method, b) if is_token(b) => {
                req.method.push(char::from(b));
                Method
            }

            (UriStart, b) if !is_control(b) => {
                req.uri.push(char::from(b));
                Uri
            }

            (Uri, b' ') => VersionH,
            (Uri, b'\r') => {
                // no version: HTTP/0.9, which has neither headers nor body
                req.version_major = 0;
                req.version_minor = 9;
                return Step::Completed;
            }
            (Uri, b) if !is_control(b) => {
                req.uri.push(char::from(b));
                Uri
            }

            (VersionH, b'H') => VersionHt,
            (VersionHt, b'T') => VersionHtt,
            (VersionHtt, b'T') => VersionHttp,
            (VersionHttp, b'P') => VersionSlash,
            (VersionSlash, b'/') => {
                req.version_major = 0;
                req.version_minor = 0;
                VersionMajorStart
            }

            (VersionMajorStart, b) if is_digit(b) => {
                req.version_major = u16::from(b - b'0');
                VersionMajor
            }
            (VersionMajor, b'.') => VersionMinorStart,
            (VersionMajor, b) if is_digit(b) => match push_digit(req.version_major, b) {
                Some(major) => {
                    req.version_major = major;
                    VersionMajor
                }
                None => return Step::Error,
            },

            (VersionMinorStart, b) if is_digit(b) => {
                req.version_minor = u16::from(b - b'0');
                VersionMinor
            }
            (VersionMinor, b'\r') => NewLine,
            (VersionMinor, b) if is_digit(b) => match push_digit(req.version_minor, b) {
                Some(minor) => {
                    req.version_minor = minor;
                    VersionMinor
                }
                None => return Step::Error,
            },

            (NewLine, b'\n') => {
                // only these methods may carry a body
                let framing = req.method == "POST" || req.method == "PUT";
                self.message = MessageParser::new(framing);
                Message
            }

            _ => return Step::Error,
        };

        Step::Continue
    }
}
