//! Running-statistics aggregation for ping-style probe sessions.
//!
//! The probing driver feeds one event per observed outcome — packet
//! sent, reply received with a round-trip time, reply classified, packet
//! lost — into a [`RunStats`], and the reporting layer reads the derived
//! figures (counts by outcome, min/max/average round-trip time, elapsed
//! session time) at any point: mid-stream for a live display, or once at
//! the end for the summary line.
//!
//! This crate performs no network I/O and parses no packets; producers
//! hand it already-classified outcomes and already-measured timings.
//! Counters saturate instead of wrapping, and any saturation is recorded
//! in a sticky overflow flag so a report over a very long session can
//! disclose that its figures are no longer exact.
//!
//! # Example
//!
//! ```
//! use pingstats_core::{ReplyKind, RttSample, RunStats};
//!
//! let mut stats = RunStats::new();
//!
//! // first probe: answered in 23.4ms
//! stats.record_sent();
//! stats.record_received();
//! stats.record_latency(23.4);
//! stats.classify_reply(ReplyKind::Success);
//!
//! // second probe: no reply
//! stats.record_sent();
//! stats.record_latency(RttSample::TimedOut);
//! stats.record_lost();
//!
//! let summary = stats.snapshot();
//! assert_eq!(summary.sent, 2);
//! assert_eq!(summary.received, 1);
//! assert_eq!(summary.lost, 1);
//! assert_eq!(summary.avg_rtt, 23.4);
//! assert_eq!(summary.loss_percent(), 50.0);
//! ```

mod counter;
mod reply;
mod sample;
mod snapshot;
mod stats;

pub use self::{
    counter::Counter,
    reply::{ReplyKind, ReplyKindParseError},
    sample::RttSample,
    snapshot::StatsSnapshot,
    stats::RunStats,
};
