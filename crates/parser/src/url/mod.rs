//! URL decomposition.
//!
//! Splits an absolute URL of the form
//! `scheme://[username[:password]@]hostname[:port][/path][?query][#fragment]`
//! into its components in one forward pass. Components are returned exactly
//! as written; percent escapes are not decoded and no normalization is done.
//!
//! [`Url`] is the one-shot form, [`UrlParser`] keeps the result of the last
//! parse for callers that reuse a parser object.

mod error;
mod parse;
mod url_parser;

pub use error::UrlError;
pub use parse::Url;
pub use url_parser::UrlParser;
