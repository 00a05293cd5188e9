use std::fmt;

/// A single round-trip time observation for one probe.
///
/// The producing driver either measured a reply time or gave up waiting.
/// The unit of the measured value is whatever the caller uses
/// consistently across the session (typically fractional milliseconds
/// from a monotonic timer); the aggregator never interprets it beyond
/// ordering and summation.
///
/// # Example
///
/// ```
/// # use pingstats_core::RttSample;
/// let reply = RttSample::Reply(12.5);
/// assert_eq!(reply.value(), Some(12.5));
///
/// let timeout = RttSample::TimedOut;
/// assert!(timeout.is_timeout());
///
/// // plain floats convert for ergonomic call sites
/// assert_eq!(RttSample::from(12.5), reply);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RttSample {
    /// A reply arrived after the given round-trip time.
    Reply(f64),
    /// No reply arrived within the driver's deadline.
    TimedOut,
}

impl RttSample {
    /// `true` if this sample records a timeout rather than a measurement.
    pub const fn is_timeout(self) -> bool {
        matches!(self, Self::TimedOut)
    }

    /// The measured round-trip time, or `None` for a timeout.
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Reply(rtt) => Some(rtt),
            Self::TimedOut => None,
        }
    }
}

impl From<f64> for RttSample {
    fn from(rtt: f64) -> Self {
        Self::Reply(rtt)
    }
}

impl fmt::Display for RttSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reply(rtt) => rtt.fmt(f),
            Self::TimedOut => f.write_str("timeout"),
        }
    }
}
