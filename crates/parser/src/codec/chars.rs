//! Byte classes shared by the request, response and chunked grammars.
//!
//! The classes follow [RFC 2616 Section 2.2](https://www.rfc-editor.org/rfc/rfc2616#section-2.2):
//! a `token` is any `CHAR` that is neither a control byte nor one of the
//! `separators`.

/// `CHAR`: any US-ASCII byte, `0..=127`.
#[inline]
pub(crate) const fn is_char(b: u8) -> bool {
    b <= 127
}

/// `CTL`: `0..=31` and `DEL`.
#[inline]
pub(crate) const fn is_control(b: u8) -> bool {
    b <= 31 || b == 127
}

/// `separators`.
#[inline]
pub(crate) const fn is_special(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')'
            | b'<'
            | b'>'
            | b'@'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'"'
            | b'/'
            | b'['
            | b']'
            | b'?'
            | b'='
            | b'{'
            | b'}'
            | b' '
            | b'\t'
    )
}

#[inline]
pub(crate) const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Bytes allowed in a method or a header name.
#[inline]
pub(crate) const fn is_token(b: u8) -> bool {
    is_char(b) && !is_control(b) && !is_special(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bytes() {
        assert!(is_control(0));
        assert!(is_control(b'\r'));
        assert!(is_control(b'\n'));
        assert!(is_control(31));
        assert!(is_control(127));
        assert!(!is_control(b' '));
        assert!(!is_control(b'a'));
        assert!(!is_control(0x80));
    }

    #[test]
    fn token_bytes() {
        for b in b"GETPOSTabc019!#$%&'*+-.^_`|~" {
            assert!(is_token(*b), "{} should be a token byte", *b as char);
        }

        for b in b"()<>@,;:\\\"/[]?={} \t" {
            assert!(!is_token(*b), "{} should not be a token byte", *b as char);
        }

        assert!(!is_token(0x80));
        assert!(!is_token(0xff));
        assert!(!is_token(b'\r'));
    }

    #[test]
    fn char_and_digit() {
        assert!(is_char(0));
        assert!(is_char(127));
        assert!(!is_char(128));

        assert!(is_digit(b'0'));
        assert!(is_digit(b'9'));
        assert!(!is_digit(b'a'));
        assert!(!is_digit(b'/'));
    }
}
