//! Chat transport error types.

/// Kinds of transport failures. All of them end the dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TransportErrorKind {
    /// Could not open the connection
    #[display("Connection failed: {}", _0)]
    Connect(String),
    /// Reading a frame failed
    #[display("Read failed: {}", _0)]
    Read(String),
    /// Writing a frame failed
    #[display("Write failed: {}", _0)]
    Write(String),
    /// The peer closed the stream
    #[display("Connection closed by peer")]
    Closed,
}

/// Transport error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new transport error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
