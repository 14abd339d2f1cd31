//! Incremental parser for HTTP/1.x responses.
//!
//! The mirror of [`RequestParser`](crate::codec::RequestParser): a status
//! line instead of a request line, and body framing headers are always
//! honored.

use tracing::trace;
use ResponseState::*;

use crate::codec::chars::{is_char, is_digit};
use crate::codec::message::MessageParser;
use crate::codec::{push_digit, Step};
use crate::protocol::{ParseResult, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseState {
    /// The leading `H`
    StatusStart,
    VersionHt,
    VersionHtt,
    VersionHttp,
    VersionSlash,
    VersionMajorStart,
    VersionMajor,
    VersionMinorStart,
    /// Minor digits, ended by the space before the status code
    VersionMinor,
    StatusCodeStart,
    StatusCode,
    StatusTextStart,
    StatusText,
    /// LF ending the status line
    NewLine,
    /// Headers and body, see [`MessageParser`]
    Message,
}

/// Incremental HTTP response parser.
///
/// Follows the same lifecycle as [`RequestParser`](crate::codec::RequestParser).
#[derive(Debug, Clone)]
pub struct ResponseParser {
    state: ResponseState,
    message: MessageParser,
    outcome: Option<ParseResult>,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self { state: StatusStart, message: MessageParser::new(true), outcome: None }
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns true if no byte of the current message has been consumed yet.
    pub fn is_idle(&self) -> bool {
        self.state == StatusStart && self.outcome.is_none()
    }

    pub fn parse(&mut self, resp: &mut Response, buf: &[u8]) -> ParseResult {
        self.consume(resp, buf).0
    }

    /// Feeds `buf` into `resp` and returns the result with the number of
    /// bytes consumed.
    pub fn consume(&mut self, resp: &mut Response, buf: &[u8]) -> (ParseResult, usize) {
        if let Some(outcome) = self.outcome {
            return (outcome, 0);
        }

        let mut pos = 0;
        while pos < buf.len() {
            let step = if self.state == Message {
                let (step, consumed) = self.message.advance(resp, &buf[pos..]);
                pos += consumed;
                step
            } else {
                let b = buf[pos];
                pos += 1;
                self.step(resp, b)
            };

            match step {
                Step::Continue => {}
                Step::Completed => {
                    trace!(
                        status_code = resp.status_code(),
                        headers = resp.headers().len(),
                        content = resp.content().len(),
                        keep_alive = resp.keep_alive(),
                        "parsed response"
                    );
                    return self.finish(ParseResult::Completed, pos);
                }
                Step::Error => {
                    trace!(state = ?self.state, message_state = ?self.message.state(), offset = pos - 1, "malformed response");
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

    fn step(&mut self, resp: &mut Response, b: u8) -> Step {
        self.state = match (self.state, b) {
            (StatusStart, b'H') => VersionHt,
            (VersionHt, b'T') => VersionHtt,
            (VersionHtt, b'T') => VersionHttp,
            (VersionHttp, b'P') => VersionSlash,
            (VersionSlash, b'/') => {
                resp.version_major = 0;
                resp.version_minor = 0;
                VersionMajorStart
            }

            (VersionMajorStart, b) if is_digit(b) => {
                resp.version_major = u16::from(b - b'0');
                VersionMajor
            }
            (VersionMajor, b'.') => VersionMinorStart,
            (VersionMajor, b) if is_digit(b) => match push_digit(resp.version_major, b) {
                Some(major) => {
                    resp.version_major = major;
                    VersionMajor
                }
                None => return Step::Error,
            },

            (VersionMinorStart, b) if is_digit(b) => {
                resp.version_minor = u16::from(b - b'0');
                VersionMinor
            }
            (VersionMinor, b' ') => {
                resp.status_code = 0;
                StatusCodeStart
            }
            (VersionMinor, b) if is_digit(b) => match push_digit(resp.version_minor, b) {
                Some(minor) => {
                    resp.version_minor = minor;
                    VersionMinor
                }
                None => return Step::Error,
            },

            (StatusCodeStart, b) if is_digit(b) => {
                resp.status_code = u16::from(b - b'0');
                StatusCode
            }
            (StatusCode, b) if is_digit(b) => match push_digit(resp.status_code, b) {
                Some(code) if code <= 999 => {
                    resp.status_code = code;
                    StatusCode
                }
                _ => return Step::Error,
            },
            (StatusCode, b' ') if (100..=999).contains(&resp.status_code) => StatusTextStart,

            (StatusTextStart | StatusText, b'\r') => NewLine,
            (StatusTextStart | StatusText, b) if is_char(b) => {
                resp.status.push(char::from(b));
                StatusText
            }

            (NewLine, b'\n') => Message,

            _ => return Step::Error,
        };

        Step::Continue
    }
}
