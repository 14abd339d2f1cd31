use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("invalid character {ch:?} at offset {offset}")]
    InvalidCharacter { ch: char, offset: usize },

    #[error("url ends before its authority")]
    Incomplete,

    #[error("port {port} is out of range")]
    InvalidPort { port: String },

    #[error("ipv6 literal hostnames are not supported")]
    UnsupportedIpv6Host,

    #[error("no successfully parsed url")]
    InvalidState,
}

impl UrlError {
    pub fn invalid_character(ch: char, offset: usize) -> Self {
        Self::InvalidCharacter { ch, offset }
    }

    pub fn invalid_port<S: ToString>(port: S) -> Self {
        Self::InvalidPort { port: port.to_string() }
    }
}
