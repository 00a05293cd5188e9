//! Point-in-time views of a running session.
//!
//! [`StatsSnapshot`] is the read side of the aggregator. Obtain one via
//! [`RunStats::snapshot`](crate::RunStats::snapshot).

use std::{
    fmt,
    time::{Duration, SystemTime},
};

/// Point-in-time snapshot of a probing session's statistics.
///
/// A snapshot is a plain value: capturing one copies every field of the
/// live aggregate at once, so the values it carries are mutually
/// consistent (a live display never sees the maximum updated but the
/// average not yet).
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    /// Wall-clock time the session started.
    pub start_time: SystemTime,
    /// Time spent in the session up to the moment of capture.
    pub elapsed: Duration,
    /// Probes transmitted.
    pub sent: u64,
    /// Probes answered.
    pub received: u64,
    /// Probes deemed lost.
    pub lost: u64,
    /// Round-trip time of the most recent reply, `0.0` after a timeout,
    /// or [`RunStats::NO_RTT`](crate::RunStats::NO_RTT) before any reply.
    pub current_rtt: f64,
    /// Smallest observed round-trip time.
    pub min_rtt: f64,
    /// Largest observed round-trip time.
    pub max_rtt: f64,
    /// Running mean of all observed round-trip times.
    pub avg_rtt: f64,
    /// Replies classified as success.
    pub good_replies: u64,
    /// Replies classified as one of the four protocol-error kinds.
    pub error_replies: u64,
    /// Replies of any other classification.
    pub other_replies: u64,
    /// `true` once any counter or accumulator has saturated; the
    /// aggregate figures are no longer exact and reporting should say so.
    pub overflowed: bool,
    /// `true` if the session was terminated before natural completion.
    pub canceled_early: bool,
}

impl StatsSnapshot {
    /// Fraction of transmitted probes that were lost, as a percentage.
    ///
    /// `0.0` when nothing has been sent yet.
    ///
    /// ```
    /// # use pingstats_core::RunStats;
    /// let mut stats = RunStats::new();
    /// stats.record_sent();
    /// stats.record_sent();
    /// stats.record_lost();
    ///
    /// assert_eq!(stats.snapshot().loss_percent(), 50.0);
    /// ```
    pub fn loss_percent(&self) -> f64 {
        if self.sent == 0 {
            0.0
        } else {
            (self.lost as f64 / self.sent as f64) * 100.0
        }
    }
}

impl fmt::Display for StatsSnapshot {
    /// Formats the canonical end-of-session summary line.
    ///
    /// ```
    /// # use pingstats_core::{ReplyKind, RunStats};
    /// let mut stats = RunStats::new();
    /// stats.record_sent();
    /// stats.record_received();
    /// stats.record_latency(12.5);
    /// stats.classify_reply(ReplyKind::Success);
    ///
    /// assert_eq!(
    ///     stats.snapshot().to_string(),
    ///     "1 transmitted, 1 received, 0 lost (0.00% loss), \
    ///      rtt min/avg/max = 12.500/12.500/12.500",
    /// );
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} transmitted, {} received, {} lost ({:.2}% loss)",
            self.sent,
            self.received,
            self.lost,
            self.loss_percent()
        )?;
        if self.received > 0 {
            write!(
                f,
                ", rtt min/avg/max = {:.3}/{:.3}/{:.3}",
                self.min_rtt, self.avg_rtt, self.max_rtt
            )?;
        }
        if self.overflowed {
            write!(f, " [counters overflowed, figures inexact]")?;
        }
        Ok(())
    }
}
