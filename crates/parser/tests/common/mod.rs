//! Shared fixtures for the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use micro_http_parser::codec::{RequestParser, ResponseParser};
use micro_http_parser::protocol::{ParseResult, Request, Response};

/// Complete requests, each ending exactly at its last byte.
pub const REQUESTS: &[&[u8]] = &[
    b"GET / HTTP/1.0\r\n\r\n",
    b"GET /x HTTP/1.1\r\nHost: a\r\n\r\n",
    b"POST /x HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
    b"PUT /upload?id=3&name=a%20b HTTP/1.1\r\nHost: example.com\r\nTransfer-Encoding: chunked\r\n\r\n4;ext=1\r\nWiki\r\n5\r\npedia\r\n0\r\nChecksum: abc\r\n\r\n",
    b"GET /folded HTTP/1.1\r\nX-Long: first\r\n  second\r\n\tthird\r\nConnection: Keep-Alive\r\n\r\n",
    b"OPTIONS * HTTP/1.1\r\nAccept: */*\r\nConnection: close\r\n\r\n",
    b"DELETE /items/42 HTTP/1.1\r\nContent-Length: 10\r\n\r\n",
    b"POST /big HTTP/1.1\r\ncontent-length: 26\r\n\r\nabcdefghijklmnopqrstuvwxyz",
    b"GET /caf\xc3\xa9 HTTP/1.1\r\nX-Latin: caf\xe9\r\n\r\n",
];

/// Complete responses, each ending exactly at its last byte.
pub const RESPONSES: &[&[u8]] = &[
    b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nhi",
    b"HTTP/1.0 404 Not Found\r\n\r\n",
    b"HTTP/1.1 204 \r\nServer: test\r\n\r\n",
    b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n1a\r\nabcdefghijklmnopqrstuvwxyz\r\n0\r\n\r\n",
    b"HTTP/1.1 301 Moved Permanently\r\nLocation: /new\r\nConnection: close\r\nContent-Length: 0\r\n\r\n",
    b"HTTP/1.1 500 Internal Server Error\r\nX-Trace: a\r\n b\r\nContent-Length: 4\r\n\r\noops",
];

/// Feeds `src` to a fresh request parser cut at each offset of `splits`.
///
/// Returns the result of the last call and the filled record.
pub fn parse_request_split(src: &[u8], splits: &[usize]) -> (ParseResult, Request) {
    let mut parser = RequestParser::new();
    let mut request = Request::new();
    let mut result = ParseResult::Incomplete;

    for piece in pieces(src, splits) {
        result = parser.parse(&mut request, piece);
        if result.is_terminal() {
            break;
        }
    }

    (result, request)
}

/// Like [`parse_request_split`], for responses.
pub fn parse_response_split(src: &[u8], splits: &[usize]) -> (ParseResult, Response) {
    let mut parser = ResponseParser::new();
    let mut response = Response::new();
    let mut result = ParseResult::Incomplete;

    for piece in pieces(src, splits) {
        result = parser.parse(&mut response, piece);
        if result.is_terminal() {
            break;
        }
    }

    (result, response)
}

/// Cuts `src` at the given offsets. Offsets are sorted, deduplicated and
/// clamped to the input.
pub fn pieces<'a>(src: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut cuts: Vec<usize> = splits.iter().map(|&at| at.min(src.len())).collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut pieces = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        pieces.push(&src[start..cut]);
        start = cut;
    }
    pieces.push(&src[start..]);
    pieces
}
