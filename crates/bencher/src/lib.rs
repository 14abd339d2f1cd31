//! Fixtures for the parser benchmarks.
//!
//! Resource files are stored with LF line endings and turned into wire form
//! (CRLF) once, outside the measured loop.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Request,
    Response,
}

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    kind: MessageKind,
    file: TestFile,
}

impl TestCase {
    pub fn request(name: &'static str, file: TestFile) -> Self {
        Self { name, kind: MessageKind::Request, file }
    }

    pub fn response(name: &'static str, file: TestFile) -> Self {
        Self { name, kind: MessageKind::Response, file }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn file_name(&self) -> &'static str {
        self.file().file_name
    }

    /// The message as it would arrive on the wire.
    pub fn wire(&self) -> Vec<u8> {
        self.file.content.replace('\n', "\r\n").into_bytes()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}
