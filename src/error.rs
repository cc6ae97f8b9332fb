use std::fmt;

/// Stable error classification carried by every [`StreamError`].
///
/// Mirrors the teacher's `SparkError` code scheme (a stable, matchable identifier plus a
/// free-form message) but closes the set into an enum since this crate does not span
/// independently versioned sub-crates that would need string-based extensibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A construction-time argument was invalid (e.g. `debounce_time(0)`, `merge_map(_, 0)`).
    Construction,
    /// The source stream produced an error.
    Source,
    /// A projector, predicate, or mapping function panicked or returned an error.
    Operator,
    /// An inner stream produced by a flattening operator's projector errored.
    Inner,
    /// `timeout()` observed a gap between values exceeding its bound.
    Timeout,
    /// A handler registered via `on(..)` panicked; never affects data flow, logged only.
    Handler,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Construction => "construction",
            ErrorKind::Source => "source",
            ErrorKind::Operator => "operator",
            ErrorKind::Inner => "inner",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Handler => "handler",
        };
        f.write_str(s)
    }
}

/// The error type carried on a stream's error channel.
///
/// Structurally this is the teacher's `SparkError` (kind + message + optional causal chain)
/// with the trace/peer/node metadata dropped, since those belong to the transport layer this
/// spec excludes.
#[derive(Debug, thiserror::Error)]
#[error("[{kind}] {message}")]
pub struct StreamError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl StreamError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(
        mut self,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The `timeout()` sentinel required by spec.md §7.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout, "timeout")
    }

    pub fn construction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Construction, message)
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }
}

pub type Result<T> = std::result::Result<T, StreamError>;
