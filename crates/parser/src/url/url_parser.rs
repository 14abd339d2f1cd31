use crate::url::{Url, UrlError};

/// Reusable URL parser that keeps the outcome of its last run.
///
/// A thin stateful wrapper over [`Url::parse`]. After a failed parse every
/// accessor returns [`UrlError::InvalidState`]; nothing from an earlier
/// successful parse is visible.
///
/// ```
/// use micro_http_parser::url::UrlParser;
///
/// let mut parser = UrlParser::new();
/// assert!(parser.parse("https://example.com/index?lang=en"));
/// assert_eq!(parser.hostname(), Ok("example.com"));
/// assert_eq!(parser.http_port(), Ok(443));
///
/// assert!(!parser.parse("https://exa mple.com/"));
/// assert!(parser.hostname().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlParser {
    outcome: Option<Result<Url, UrlError>>,
}

impl UrlParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `input`, replacing everything from the previous run.
    /// Returns true on success.
    pub fn parse(&mut self, input: &str) -> bool {
        let outcome = Url::parse(input);
        let valid = outcome.is_ok();
        self.outcome = Some(outcome);
        valid
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Some(Ok(_)))
    }

    /// Why the last parse failed, if it did.
    pub fn error(&self) -> Option<&UrlError> {
        self.outcome.as_ref()?.as_ref().err()
    }

    pub fn url(&self) -> Result<&Url, UrlError> {
        match &self.outcome {
            Some(Ok(url)) => Ok(url),
            _ => Err(UrlError::InvalidState),
        }
    }

    pub fn scheme(&self) -> Result<&str, UrlError> {
        self.url().map(Url::scheme)
    }

    pub fn username(&self) -> Result<&str, UrlError> {
        self.url().map(Url::username)
    }

    pub fn password(&self) -> Result<&str, UrlError> {
        self.url().map(Url::password)
    }

    pub fn hostname(&self) -> Result<&str, UrlError> {
        self.url().map(Url::hostname)
    }

    pub fn port(&self) -> Result<&str, UrlError> {
        self.url().map(Url::port)
    }

    pub fn path(&self) -> Result<&str, UrlError> {
        self.url().map(Url::path)
    }

    pub fn query(&self) -> Result<&str, UrlError> {
        self.url().map(Url::query)
    }

    pub fn fragment(&self) -> Result<&str, UrlError> {
        self.url().map(Url::fragment)
    }

    pub fn http_port(&self) -> Result<u16, UrlError> {
        self.url().map(Url::http_port)
    }
}
