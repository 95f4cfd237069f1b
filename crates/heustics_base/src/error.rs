use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- Span traces are captured where the error is created, not where it is reported
 */

/// Error variants that can occur in heustics operations.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An external command could not be run or exited unsuccessfully
    CommandError {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/* 📖 # Why separate ErrorKind and HeusticsError?

ErrorKind carries the structural variants callers can match on.
HeusticsError wraps it with the runtime information gathered while the error propagates:
context strings and the span trace at the point of creation.
*/

/// Error type wrapping an ErrorKind with context and span trace.
pub struct HeusticsError {
    kind: ErrorKind,
    context: Vec<String>,
    span_trace: SpanTrace,
}

impl HeusticsError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            span_trace: SpanTrace::capture(),
        }
    }

    /// Shorthand for an `ErrorKind::Message` error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Attaches context to an error.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    fn fmt_kind(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::CommandError {
                command,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "Command '{}' exited with status {}", command, code)?,
                    None => write!(f, "Command '{}' failed", command)?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_kind(f)?;
        writeln!(f)?;
        let last = self.context.len();
        for (i, ctx) in self.context.iter().enumerate() {
            let branch = if i + 1 == last { "└─" } else { "├─" };
            writeln!(f, "{} {}", branch, ctx)?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for HeusticsError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for HeusticsError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::CommandError { .. } | ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for HeusticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }
        self.fmt_kind(f)
    }
}

/* 📖 # Why a tree-shaped Debug output?

Errors end up in logs and on stderr of CI jobs. Rendering contexts as a tree
keeps the failing operation readable without scrolling through nested struct dumps.
*/
impl fmt::Debug for HeusticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f)?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/// Standard result type for heustics operations.
///
/// The error is boxed to keep the result small on the success path.
pub type HeusticsResult<T> = std::result::Result<T, Box<HeusticsError>>;

/// Extension trait for attaching context to Results during propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error, evaluated eagerly.
    fn context(self, context: impl Into<String>) -> HeusticsResult<T>;

    /// Attaches context using lazy evaluation.
    /// Prefer this to avoid string formatting on the success path.
    fn with_context<F>(self, f: F) -> HeusticsResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for HeusticsResult<T> {
    fn context(self, context: impl Into<String>) -> HeusticsResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> HeusticsResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Builds a boxed message error from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::HeusticsError::message(format!($($arg)*)))
    };
}

/// Returns early with a boxed message error.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}
