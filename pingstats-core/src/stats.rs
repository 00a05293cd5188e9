//! Running statistics for one probing session.
//!
//! [`RunStats`] ingests one event per observed probe outcome and keeps
//! the derived aggregate figures (counts, min/max/average round-trip
//! time, elapsed session time) queryable at any point mid-stream.

use std::time::{Duration, Instant, SystemTime};

use crate::{counter::Counter, reply::ReplyKind, sample::RttSample, snapshot::StatsSnapshot};

/// Aggregate statistics for one probing session.
///
/// One instance per session: construction starts the elapsed-time clock,
/// the driving loop feeds one update call per observed network event,
/// and the reporting layer reads the accessors (or takes a
/// [`snapshot`](Self::snapshot)) whenever it wants, including while the
/// session is still running.
///
/// All state is private; mutation happens only through the update
/// surface below. Update operations never fail the caller: the one
/// error condition, counter or accumulator saturation, is recorded in
/// the sticky [`overflowed`](Self::overflowed) flag instead (reporting
/// must disclose it, the figures are no longer exact once it is set).
///
/// # Expected call pattern
///
/// For each probe: [`record_sent`](Self::record_sent), then either
/// [`record_lost`](Self::record_lost) or the reply sequence
/// [`record_received`](Self::record_received) →
/// [`record_latency`](Self::record_latency) →
/// [`classify_reply`](Self::classify_reply). The received increment
/// must precede the latency record because the average divides by the
/// already-recorded received count.
///
/// # Single writer
///
/// Exactly one logical thread of control issues updates, strictly
/// sequentially. The update surface takes `&mut self`, so the borrow
/// rules already guarantee that a reader can never observe a half-applied
/// update; a live display clones a [`StatsSnapshot`] between updates and
/// renders from that.
///
/// # Example
///
/// ```
/// # use pingstats_core::{ReplyKind, RunStats};
/// let mut stats = RunStats::new();
///
/// stats.record_sent();
/// stats.record_received();
/// stats.record_latency(23.4);
/// stats.classify_reply(ReplyKind::Success);
///
/// assert_eq!(stats.sent(), 1);
/// assert_eq!(stats.received(), 1);
/// assert_eq!(stats.avg_rtt(), 23.4);
/// assert_eq!(stats.good_replies(), 1);
/// assert!(!stats.overflowed());
/// ```
#[derive(Debug)]
pub struct RunStats {
    start_time: SystemTime,
    started_at: Instant,
    sent: Counter,
    received: Counter,
    lost: Counter,
    current_rtt: f64,
    min_rtt: f64,
    max_rtt: f64,
    avg_rtt: f64,
    rtt_sum: f64,
    good_replies: Counter,
    error_replies: Counter,
    other_replies: Counter,
    overflowed: bool,
    canceled_early: bool,
}

impl RunStats {
    /// Sentinel value of [`current_rtt`](Self::current_rtt) before any
    /// latency has been recorded.
    pub const NO_RTT: f64 = -1.0;

    /// Start a new session.
    ///
    /// Captures the wall-clock start time and starts the elapsed-time
    /// clock; every counter begins at zero.
    pub fn new() -> Self {
        Self {
            start_time: SystemTime::now(),
            started_at: Instant::now(),
            sent: Counter::ZERO,
            received: Counter::ZERO,
            lost: Counter::ZERO,
            current_rtt: Self::NO_RTT,
            min_rtt: 0.0,
            max_rtt: 0.0,
            avg_rtt: 0.0,
            rtt_sum: 0.0,
            good_replies: Counter::ZERO,
            error_replies: Counter::ZERO,
            other_replies: Counter::ZERO,
            overflowed: false,
            canceled_early: false,
        }
    }

    /// Record one transmitted probe.
    pub fn record_sent(&mut self) {
        self.overflowed |= self.sent.increment();
    }

    /// Record one answered probe.
    ///
    /// Call once per reply, before [`record_latency`](Self::record_latency)
    /// for that same reply.
    pub fn record_received(&mut self) {
        self.overflowed |= self.received.increment();
    }

    /// Record one lost probe.
    ///
    /// A probe outcome is either received-and-classified or lost, never
    /// both.
    pub fn record_lost(&mut self) {
        self.overflowed |= self.lost.increment();
    }

    /// Record the round-trip time of one completed probe.
    ///
    /// A [`RttSample::TimedOut`] sets the current round-trip time to
    /// `0.0` and touches nothing else — timeouts do not enter the
    /// min/max/average figures.
    ///
    /// A measured reply updates the maximum, the minimum, the running
    /// sum and average, and the current value. Note the minimum's
    /// bootstrap rule: a minimum still at its initial `0.0` is treated
    /// as "not yet set", so a zero-valued sample only survives as the
    /// minimum until the next reply arrives. A genuine zero-latency
    /// reading and "no data" are indistinguishable here; kept as-is
    /// because downstream reporting depends on it.
    ///
    /// If the running sum leaves the finite range the sticky
    /// [`overflowed`](Self::overflowed) flag is set and the sum and
    /// average retain their last finite values.
    ///
    /// ```
    /// # use pingstats_core::{RttSample, RunStats};
    /// let mut stats = RunStats::new();
    /// stats.record_received();
    /// stats.record_latency(10.0);
    /// stats.record_received();
    /// stats.record_latency(20.0);
    ///
    /// assert_eq!(stats.min_rtt(), 10.0);
    /// assert_eq!(stats.max_rtt(), 20.0);
    /// assert_eq!(stats.avg_rtt(), 15.0);
    ///
    /// stats.record_latency(RttSample::TimedOut);
    /// assert_eq!(stats.current_rtt(), 0.0);
    /// assert_eq!(stats.avg_rtt(), 15.0);
    /// ```
    pub fn record_latency(&mut self, sample: impl Into<RttSample>) {
        let rtt = match sample.into() {
            RttSample::TimedOut => {
                self.current_rtt = 0.0;
                return;
            }
            RttSample::Reply(rtt) => rtt,
        };

        if rtt > self.max_rtt {
            self.max_rtt = rtt;
        }

        // minimum bootstrap: 0.0 doubles as "not yet set"
        if rtt < self.min_rtt || self.min_rtt == 0.0 {
            self.min_rtt = rtt;
        }

        let sum = self.rtt_sum + rtt;
        if sum.is_finite() {
            self.rtt_sum = sum;
            // the average divides by the count recorded before this
            // call; with no received packet on record yet it is left
            // untouched rather than dividing by zero
            let received = self.received.get();
            if received > 0 {
                self.avg_rtt = sum / received as f64;
            }
        } else {
            self.overflowed = true;
        }

        self.current_rtt = rtt;
    }

    /// Count one classified reply.
    ///
    /// Success feeds the good counter, the four protocol-error kinds
    /// feed the error counter, everything else feeds the other counter.
    pub fn classify_reply(&mut self, kind: ReplyKind) {
        let counter = match kind {
            ReplyKind::Success => &mut self.good_replies,
            kind if kind.is_error() => &mut self.error_replies,
            _ => &mut self.other_replies,
        };
        self.overflowed |= counter.increment();
    }

    /// Mark the session as terminated before natural completion.
    ///
    /// One-way: the flag is never cleared for the rest of the session.
    pub fn cancel(&mut self) {
        self.canceled_early = true;
    }

    /// Wall-clock time the session started.
    pub fn start_time(&self) -> SystemTime {
        self.start_time
    }

    /// Time spent in the session so far, computed live on each call.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Probes transmitted.
    pub fn sent(&self) -> u64 {
        self.sent.get()
    }

    /// Probes answered.
    pub fn received(&self) -> u64 {
        self.received.get()
    }

    /// Probes deemed lost.
    pub fn lost(&self) -> u64 {
        self.lost.get()
    }

    /// Round-trip time of the most recent reply, `0.0` after a timeout,
    /// or [`NO_RTT`](Self::NO_RTT) before any reply.
    pub fn current_rtt(&self) -> f64 {
        self.current_rtt
    }

    /// Smallest observed round-trip time (see
    /// [`record_latency`](Self::record_latency) for the zero-bootstrap
    /// caveat).
    pub fn min_rtt(&self) -> f64 {
        self.min_rtt
    }

    /// Largest observed round-trip time.
    pub fn max_rtt(&self) -> f64 {
        self.max_rtt
    }

    /// Running mean of all observed round-trip times.
    pub fn avg_rtt(&self) -> f64 {
        self.avg_rtt
    }

    /// Replies classified as success.
    pub fn good_replies(&self) -> u64 {
        self.good_replies.get()
    }

    /// Replies classified as one of the four protocol-error kinds.
    pub fn error_replies(&self) -> u64 {
        self.error_replies.get()
    }

    /// Replies of any other classification.
    pub fn other_replies(&self) -> u64 {
        self.other_replies.get()
    }

    /// `true` once any counter or accumulator has saturated. Sticky for
    /// the rest of the session.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// `true` if [`cancel`](Self::cancel) has been called.
    pub fn canceled_early(&self) -> bool {
        self.canceled_early
    }

    /// Capture a consistent point-in-time view of every figure.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            start_time: self.start_time,
            elapsed: self.elapsed(),
            sent: self.sent.get(),
            received: self.received.get(),
            lost: self.lost.get(),
            current_rtt: self.current_rtt,
            min_rtt: self.min_rtt,
            max_rtt: self.max_rtt,
            avg_rtt: self.avg_rtt,
            good_replies: self.good_replies.get(),
            error_replies: self.error_replies.get(),
            other_replies: self.other_replies.get(),
            overflowed: self.overflowed,
            canceled_early: self.canceled_early,
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(stats: &mut RunStats, rtt: f64) {
        stats.record_received();
        stats.record_latency(rtt);
    }

    #[test]
    fn fresh_session_is_all_zero() {
        let stats = RunStats::new();

        assert_eq!(stats.sent(), 0);
        assert_eq!(stats.received(), 0);
        assert_eq!(stats.lost(), 0);
        assert_eq!(stats.min_rtt(), 0.0);
        assert_eq!(stats.max_rtt(), 0.0);
        assert_eq!(stats.avg_rtt(), 0.0);
        assert_eq!(stats.current_rtt(), RunStats::NO_RTT);
        assert_eq!(stats.good_replies(), 0);
        assert_eq!(stats.error_replies(), 0);
        assert_eq!(stats.other_replies(), 0);
        assert!(!stats.overflowed());
        assert!(!stats.canceled_early());
    }

    #[test]
    fn sent_counts_every_call() {
        let mut stats = RunStats::new();
        for expected in 1..=100 {
            stats.record_sent();
            assert_eq!(stats.sent(), expected);
        }
    }

    #[test]
    fn min_max_track_extremes() {
        let mut stats = RunStats::new();
        for rtt in [12.0, 7.5, 42.0, 9.0] {
            reply(&mut stats, rtt);
        }

        assert_eq!(stats.min_rtt(), 7.5);
        assert_eq!(stats.max_rtt(), 42.0);
    }

    /// A zero-valued sample never survives as the minimum past the next
    /// reply: the bootstrap rule treats `min == 0.0` as "not yet set".
    /// Inherited behavior, kept on purpose.
    #[test]
    fn zero_minimum_is_wiped_by_the_next_sample() {
        let mut stats = RunStats::new();

        reply(&mut stats, 5.0);
        assert_eq!(stats.min_rtt(), 5.0);

        reply(&mut stats, 0.0);
        assert_eq!(stats.min_rtt(), 0.0);

        // 3.0 replaces the zero even though 0.0 < 3.0
        reply(&mut stats, 3.0);
        assert_eq!(stats.min_rtt(), 3.0);
    }

    #[test]
    fn zero_as_first_sample_is_the_minimum_until_replaced() {
        let mut stats = RunStats::new();

        reply(&mut stats, 0.0);
        assert_eq!(stats.min_rtt(), 0.0);

        reply(&mut stats, 8.0);
        assert_eq!(stats.min_rtt(), 8.0);
    }

    #[test]
    fn average_is_sum_over_count() {
        let mut stats = RunStats::new();
        let samples = [10.0, 20.0, 30.0, 40.0];
        for rtt in samples {
            reply(&mut stats, rtt);
        }

        let expected = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((stats.avg_rtt() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn timeout_only_touches_current_rtt() {
        let mut stats = RunStats::new();
        reply(&mut stats, 10.0);
        reply(&mut stats, 20.0);

        stats.record_latency(RttSample::TimedOut);

        assert_eq!(stats.current_rtt(), 0.0);
        assert_eq!(stats.min_rtt(), 10.0);
        assert_eq!(stats.max_rtt(), 20.0);
        assert_eq!(stats.avg_rtt(), 15.0);
        assert!(!stats.overflowed());
    }

    #[test]
    fn latency_before_any_received_leaves_average_alone() {
        let mut stats = RunStats::new();

        stats.record_latency(9.0);

        assert_eq!(stats.avg_rtt(), 0.0);
        assert_eq!(stats.current_rtt(), 9.0);
        assert_eq!(stats.min_rtt(), 9.0);
        assert_eq!(stats.max_rtt(), 9.0);
        assert!(!stats.overflowed());
    }

    #[test]
    fn current_rtt_follows_the_latest_reply() {
        let mut stats = RunStats::new();

        reply(&mut stats, 10.0);
        assert_eq!(stats.current_rtt(), 10.0);

        reply(&mut stats, 4.0);
        assert_eq!(stats.current_rtt(), 4.0);
    }

    #[test]
    fn classification_feeds_exactly_one_counter() {
        let mut stats = RunStats::new();

        stats.classify_reply(ReplyKind::Success);
        assert_eq!(stats.good_replies(), 1);
        assert_eq!(stats.error_replies(), 0);
        assert_eq!(stats.other_replies(), 0);

        for kind in [
            ReplyKind::DestinationUnreachable,
            ReplyKind::SourceQuench,
            ReplyKind::Redirect,
            ReplyKind::TimeExceeded,
        ] {
            stats.classify_reply(kind);
        }
        assert_eq!(stats.good_replies(), 1);
        assert_eq!(stats.error_replies(), 4);
        assert_eq!(stats.other_replies(), 0);

        stats.classify_reply(ReplyKind::Other);
        assert_eq!(stats.good_replies(), 1);
        assert_eq!(stats.error_replies(), 4);
        assert_eq!(stats.other_replies(), 1);
    }

    #[test]
    fn counter_saturation_sets_the_sticky_flag() {
        let mut stats = RunStats::new();
        stats.sent = Counter::new(u64::MAX);

        stats.record_sent();

        assert_eq!(stats.sent(), u64::MAX);
        assert!(stats.overflowed());

        // stays set even though nothing overflows afterwards
        stats.record_received();
        stats.record_lost();
        assert!(stats.overflowed());
    }

    #[test]
    fn sum_overflow_sets_the_flag_and_keeps_last_finite_figures() {
        let mut stats = RunStats::new();
        reply(&mut stats, 10.0);
        stats.rtt_sum = f64::MAX;

        reply(&mut stats, f64::MAX);

        assert!(stats.overflowed());
        assert_eq!(stats.rtt_sum, f64::MAX);
        assert_eq!(stats.avg_rtt(), 10.0);
        // current and max still follow the sample
        assert_eq!(stats.current_rtt(), f64::MAX);
        assert_eq!(stats.max_rtt(), f64::MAX);
    }

    #[test]
    fn elapsed_is_non_decreasing() {
        let stats = RunStats::new();

        let first = stats.elapsed();
        std::thread::sleep(Duration::from_millis(5));
        let second = stats.elapsed();

        assert!(second >= first);
        assert!(second >= Duration::from_millis(5));
    }

    #[test]
    fn cancel_is_one_way() {
        let mut stats = RunStats::new();
        assert!(!stats.canceled_early());

        stats.cancel();
        assert!(stats.canceled_early());

        // further traffic does not clear it
        stats.record_sent();
        assert!(stats.canceled_early());
    }

    #[test]
    fn full_session_scenario() {
        let mut stats = RunStats::new();

        for _ in 0..3 {
            stats.record_sent();
        }
        stats.record_received();
        stats.record_latency(10.0);
        stats.classify_reply(ReplyKind::Success);
        stats.record_received();
        stats.record_latency(20.0);
        stats.classify_reply(ReplyKind::Success);
        stats.record_lost();

        assert_eq!(stats.sent(), 3);
        assert_eq!(stats.received(), 2);
        assert_eq!(stats.lost(), 1);
        assert_eq!(stats.min_rtt(), 10.0);
        assert_eq!(stats.max_rtt(), 20.0);
        assert_eq!(stats.avg_rtt(), 15.0);
        assert_eq!(stats.good_replies(), 2);
        assert_eq!(stats.error_replies(), 0);
        assert!(!stats.overflowed());
    }

    #[test]
    fn snapshot_mirrors_the_live_figures() {
        let mut stats = RunStats::new();
        stats.record_sent();
        stats.record_received();
        stats.record_latency(12.5);
        stats.classify_reply(ReplyKind::Success);
        stats.cancel();

        let snapshot = stats.snapshot();

        assert_eq!(snapshot.start_time, stats.start_time());
        assert_eq!(snapshot.sent, 1);
        assert_eq!(snapshot.received, 1);
        assert_eq!(snapshot.lost, 0);
        assert_eq!(snapshot.current_rtt, 12.5);
        assert_eq!(snapshot.min_rtt, 12.5);
        assert_eq!(snapshot.max_rtt, 12.5);
        assert_eq!(snapshot.avg_rtt, 12.5);
        assert_eq!(snapshot.good_replies, 1);
        assert!(!snapshot.overflowed);
        assert!(snapshot.canceled_early);
        assert!(snapshot.elapsed <= stats.elapsed());
    }
}
