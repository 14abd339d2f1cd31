use bytes::BytesMut;

use crate::protocol::HeaderItem;

/// Outcome of feeding bytes to a parser.
///
/// This is the whole protocol between a caller and a parser: keep feeding
/// bytes while the result is [`ParseResult::Incomplete`], stop on either
/// terminal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseResult {
    /// A full message has been read into the record
    Completed,
    /// Every byte was consumed and more are needed
    Incomplete,
    /// The input is malformed, the parser will not accept more bytes
    Error,
}

impl ParseResult {
    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, ParseResult::Completed)
    }

    #[inline]
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseResult::Incomplete)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, ParseResult::Error)
    }

    /// Returns true for [`ParseResult::Completed`] and [`ParseResult::Error`].
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !self.is_incomplete()
    }
}

/// The parts of a message record that the header and body grammar writes.
///
/// Implemented by [`Request`](crate::protocol::Request) and
/// [`Response`](crate::protocol::Response) so one state machine can serve
/// both parsers.
pub(crate) trait HttpMessage {
    fn headers(&self) -> &[HeaderItem];

    fn headers_mut(&mut self) -> &mut Vec<HeaderItem>;

    fn content_mut(&mut self) -> &mut BytesMut;

    fn version(&self) -> (u16, u16);

    fn set_keep_alive(&mut self, keep_alive: bool);
}
