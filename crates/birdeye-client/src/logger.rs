//! Pluggable logging capability
//!
//! The client reports request-level events through a [`Logger`]. The default
//! is [`NoopLogger`], so call sites never branch on whether logging is
//! configured. [`TracingLogger`] forwards events to the `tracing` ecosystem.

use std::fmt;

/// Structured key/value pairs attached to a log event
pub type Fields<'a> = &'a [(&'a str, &'a dyn fmt::Display)];

/// Structured logger with four severities.
///
/// Implementations must not panic or block for long; logging is a side
/// channel and never affects the outcome of a request.
pub trait Logger: Send + Sync {
    /// Debug-level event
    fn debug(&self, msg: &str, fields: Fields<'_>);

    /// Info-level event
    fn info(&self, msg: &str, fields: Fields<'_>);

    /// Warning-level event
    fn warn(&self, msg: &str, fields: Fields<'_>);

    /// Error-level event
    fn error(&self, msg: &str, fields: Fields<'_>);
}

/// Logger that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _msg: &str, _fields: Fields<'_>) {}
    fn info(&self, _msg: &str, _fields: Fields<'_>) {}
    fn warn(&self, _msg: &str, _fields: Fields<'_>) {}
    fn error(&self, _msg: &str, _fields: Fields<'_>) {}
}

/// Logger that emits `tracing` events under the `birdeye_client` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, msg: &str, fields: Fields<'_>) {
        tracing::debug!(target: "birdeye_client", fields = %DisplayFields(fields), "{msg}");
    }

    fn info(&self, msg: &str, fields: Fields<'_>) {
        tracing::info!(target: "birdeye_client", fields = %DisplayFields(fields), "{msg}");
    }

    fn warn(&self, msg: &str, fields: Fields<'_>) {
        tracing::warn!(target: "birdeye_client", fields = %DisplayFields(fields), "{msg}");
    }

    fn error(&self, msg: &str, fields: Fields<'_>) {
        tracing::error!(target: "birdeye_client", fields = %DisplayFields(fields), "{msg}");
    }
}

/// Renders fields as `key=value key=value`
pub struct DisplayFields<'a>(pub Fields<'a>);

impl fmt::Display for DisplayFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
