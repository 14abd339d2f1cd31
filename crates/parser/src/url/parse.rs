//! Single-pass URL decomposition.
//!
//! The scan never backtracks. Where a token could still be either of two
//! components (`user` or `host` before `:` or `@`, `port` or `password`
//! after `:`), it is held in a pending buffer and moved into its final field
//! by the delimiter that settles it.

use std::mem;
use std::str::FromStr;

use UrlState::*;

use crate::url::UrlError;
use crate::ensure;

const DEFAULT_HTTP_PORT: u16 = 80;
const DEFAULT_HTTPS_PORT: u16 = 443;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlState {
    Scheme,
    /// First byte after `scheme:`
    SlashAfterScheme1,
    SlashAfterScheme2,
    UsernameOrHostname,
    Password,
    Hostname,
    PortOrPassword,
    Port,
    Path,
    Query,
    Fragment,
}

/// The components of a URL, as written. Nothing is percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Url {
    scheme: String,
    username: String,
    password: String,
    hostname: String,
    port: String,
    integer_port: u16,
    path: String,
    query: String,
    fragment: String,
}

impl Url {
    /// Splits `input` into its components.
    ///
    /// # Errors
    ///
    /// - [`UrlError::InvalidCharacter`] for a character not allowed where it appears
    /// - [`UrlError::Incomplete`] if the input stops before the authority
    /// - [`UrlError::InvalidPort`] for a port above 65535
    /// - [`UrlError::UnsupportedIpv6Host`] for a `[` starting the hostname
    pub fn parse(input: &str) -> Result<Url, UrlError> {
        let mut url = Url { path: String::from("/"), ..Url::default() };
        let mut username_or_hostname = String::new();
        let mut port_or_password = String::new();
        let mut state = Scheme;

        for (offset, ch) in input.char_indices() {
            state = match (state, ch) {
                (Scheme, c) if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {
                    url.scheme.push(c);
                    Scheme
                }
                (Scheme, ':') if !url.scheme.is_empty() => SlashAfterScheme1,

                (SlashAfterScheme1, '/') => SlashAfterScheme2,
                (SlashAfterScheme1, c) if c.is_ascii_alphanumeric() => {
                    username_or_hostname.push(c);
                    UsernameOrHostname
                }

                (SlashAfterScheme2, '/') => UsernameOrHostname,

                (UsernameOrHostname, '[') if username_or_hostname.is_empty() => {
                    return Err(UrlError::UnsupportedIpv6Host);
                }
                (UsernameOrHostname, c) if is_unreserved(c) || c == '%' => {
                    username_or_hostname.push(c);
                    UsernameOrHostname
                }
                (UsernameOrHostname, ':') => PortOrPassword,
                (UsernameOrHostname, '@') => {
                    url.username = mem::take(&mut username_or_hostname);
                    Hostname
                }
                (UsernameOrHostname, '/') => {
                    url.hostname = mem::take(&mut username_or_hostname);
                    Path
                }

                (PortOrPassword, c) if c.is_ascii_digit() => {
                    port_or_password.push(c);
                    PortOrPassword
                }
                (PortOrPassword, '/') => {
                    url.hostname = mem::take(&mut username_or_hostname);
                    url.set_port(mem::take(&mut port_or_password))?;
                    Path
                }
                (PortOrPassword, c) if c.is_ascii_alphanumeric() || c == '%' => {
                    url.username = mem::take(&mut username_or_hostname);
                    url.password = mem::take(&mut port_or_password);
                    url.password.push(c);
                    Password
                }
                // an all-digit password
                (PortOrPassword, '@') => {
                    url.username = mem::take(&mut username_or_hostname);
                    url.password = mem::take(&mut port_or_password);
                    Hostname
                }

                (Password, c) if c.is_ascii_alphanumeric() || c == '%' => {
                    url.password.push(c);
                    Password
                }
                (Password, '@') => Hostname,

                (Hostname, '[') if url.hostname.is_empty() => return Err(UrlError::UnsupportedIpv6Host),
                (Hostname, c) if is_unreserved(c) || c == '%' => {
                    url.hostname.push(c);
                    Hostname
                }
                (Hostname, ':') => Port,
                (Hostname, '/') => Path,

                (Port, c) if c.is_ascii_digit() => {
                    port_or_password.push(c);
                    Port
                }
                (Port, '/') => {
                    url.set_port(mem::take(&mut port_or_password))?;
                    Path
                }

                (Path, '#') | (Query, '#') => Fragment,
                (Path, '?') => Query,
                (Path, c) => {
                    url.path.push(c);
                    Path
                }

                (Query, c) => {
                    url.query.push(c);
                    Query
                }

                (Fragment, c) => {
                    url.fragment.push(c);
                    Fragment
                }

                (_, c) => return Err(UrlError::invalid_character(c, offset)),
            };
        }

        ensure!(!matches!(state, Scheme | SlashAfterScheme1 | SlashAfterScheme2 | Password), UrlError::Incomplete);

        // settle whatever is still pending at the end of input
        match state {
            UsernameOrHostname => url.hostname = username_or_hostname,
            PortOrPassword => {
                url.hostname = username_or_hostname;
                url.set_port(port_or_password)?;
            }
            Port => url.set_port(port_or_password)?,
            _ => {}
        }

        Ok(url)
    }

    fn set_port(&mut self, port: String) -> Result<(), UrlError> {
        self.integer_port = if port.is_empty() {
            0
        } else {
            match port.parse::<u16>() {
                Ok(value) => value,
                Err(_) => return Err(UrlError::invalid_port(port)),
            }
        };
        self.port = port;
        Ok(())
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The port as written, empty if there was none.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// The decimal value of [`Url::port`], 0 if there was none.
    pub fn integer_port(&self) -> u16 {
        self.integer_port
    }

    /// Path, `/` if the URL has none.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The port to connect to: the explicit one if present, otherwise 443
    /// for `https` and 80 for anything else.
    pub fn http_port(&self) -> u16 {
        if !self.port.is_empty() {
            self.integer_port
        } else if self.scheme == "https" {
            DEFAULT_HTTPS_PORT
        } else {
            DEFAULT_HTTP_PORT
        }
    }
}

impl FromStr for Url {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

/// RFC 3986 `unreserved`.
#[inline]
fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}
