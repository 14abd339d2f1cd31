//! Message records and result types shared by every parser.
//!
//! # Components
//!
//! - [`Request`] and [`Response`]: plain records the parsers fill in place
//! - [`HeaderItem`]: one `Name: value` field, in arrival order
//! - [`ParseResult`]: the tri-state answer of every `parse` call
//! - [`ParseError`]: errors of the framed decoders
//! - [`ConvertError`]: errors of the conversions into [`http`] types
//!
//! The records carry no invariants of their own beyond what the parsers
//! guarantee: a record is only meaningful after
//! [`ParseResult::Completed`], and must be thrown away after
//! [`ParseResult::Error`].

mod error;
pub use error::ConvertError;
pub use error::ParseError;

mod header;
pub use header::HeaderItem;

mod message;
pub use message::ParseResult;
pub(crate) use message::HttpMessage;

pub(crate) use header::keep_alive;

mod request;
pub use request::Request;

mod response;
pub use response::Response;
