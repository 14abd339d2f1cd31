//! Header fields as they appear on the wire.
//!
//! Headers are kept in arrival order, duplicates included. Names are
//! compared with an ASCII-only case fold, never a Unicode one.

use std::fmt;

/// A single `Name: value` header field.
///
/// Octets above `0x7f` may only appear in the value. Each such octet is stored
/// as the `char` with the same scalar value (ISO-8859-1), so `value()` is
/// always valid UTF-8 and [`HeaderItem::value_bytes`] gives back the original
/// octets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HeaderItem {
    name: String,
    value: String,
}

impl HeaderItem {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    /// Starts a header whose name begins with `first`.
    pub(crate) fn starting_with(first: u8) -> Self {
        let mut name = String::with_capacity(16);
        name.push(char::from(first));
        Self { name, value: String::with_capacity(16) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if this header's name equals `name`, ignoring ASCII case.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// The value as the octets that were received.
    pub fn value_bytes(&self) -> Vec<u8> {
        latin1_octets(&self.value)
    }

    #[inline]
    pub(crate) fn push_name(&mut self, b: u8) {
        self.name.push(char::from(b));
    }

    #[inline]
    pub(crate) fn push_value(&mut self, b: u8) {
        self.value.push(char::from(b));
    }
}

impl fmt::Display for HeaderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Returns the first header named `name`, ignoring ASCII case.
pub(crate) fn find<'a>(headers: &'a [HeaderItem], name: &str) -> Option<&'a HeaderItem> {
    headers.iter().find(|item| item.is(name))
}

/// Decides whether the connection stays open after this message.
///
/// The first `Connection` header wins: `Keep-Alive` keeps it open, any other
/// value closes it. Without the header, HTTP/1.1 and later default to open.
pub(crate) fn keep_alive(headers: &[HeaderItem], version: (u16, u16)) -> bool {
    match find(headers, http::header::CONNECTION.as_str()) {
        Some(connection) => connection.value().eq_ignore_ascii_case("Keep-Alive"),
        None => version >= (1, 1),
    }
}

/// Maps every `char` back to the octet it was read from.
///
/// Only strings filled by the parsers are passed here, so every `char` is
/// below `U+0100`.
pub(crate) fn latin1_octets(s: &str) -> Vec<u8> {
    s.chars().map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?')).collect()
}
