use std::{fmt, str::FromStr};

/// Classification of a probe reply.
///
/// Replies fall into three families: a successful echo reply, one of a
/// closed set of four protocol-level error conditions, or anything else.
/// The aggregator only distinguishes the families when counting, but the
/// individual error kinds are kept so the reporting layer can name them.
///
/// # Example
///
/// ```
/// # use pingstats_core::ReplyKind;
/// assert!(!ReplyKind::Success.is_error());
/// assert!(ReplyKind::TimeExceeded.is_error());
/// assert!(!ReplyKind::Other.is_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    /// An echo reply. The probe reached the destination and was answered.
    Success,
    /// The destination (host, network, port or protocol) is unreachable.
    DestinationUnreachable,
    /// A gateway asked the sender to slow down.
    SourceQuench,
    /// A gateway redirected the probe to another route.
    Redirect,
    /// The probe's time-to-live ran out in transit.
    TimeExceeded,
    /// Any other message kind.
    Other,
}

impl ReplyKind {
    /// `true` for the four protocol-error kinds; `false` for
    /// [`Success`](ReplyKind::Success) and [`Other`](ReplyKind::Other).
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Self::DestinationUnreachable | Self::SourceQuench | Self::Redirect | Self::TimeExceeded
        )
    }

    /// Classify a raw ICMP message type.
    ///
    /// Type `0` (echo reply) is a success; types `3`, `4`, `5` and `11`
    /// are the error kinds; every other type is
    /// [`Other`](ReplyKind::Other). This is the classification producers
    /// apply before feeding the aggregator, which itself never sees wire
    /// data.
    ///
    /// ```
    /// # use pingstats_core::ReplyKind;
    /// assert_eq!(ReplyKind::from_icmp_type(0), ReplyKind::Success);
    /// assert_eq!(ReplyKind::from_icmp_type(11), ReplyKind::TimeExceeded);
    /// assert_eq!(ReplyKind::from_icmp_type(8), ReplyKind::Other);
    /// ```
    pub const fn from_icmp_type(ty: u8) -> Self {
        match ty {
            0 => Self::Success,
            3 => Self::DestinationUnreachable,
            4 => Self::SourceQuench,
            5 => Self::Redirect,
            11 => Self::TimeExceeded,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::DestinationUnreachable => "destination unreachable",
            Self::SourceQuench => "source quench",
            Self::Redirect => "redirect",
            Self::TimeExceeded => "time exceeded",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for ReplyKind {
    type Err = ReplyKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "success" => Ok(Self::Success),
            "destination unreachable" => Ok(Self::DestinationUnreachable),
            "source quench" => Ok(Self::SourceQuench),
            "redirect" => Ok(Self::Redirect),
            "time exceeded" => Ok(Self::TimeExceeded),
            "other" => Ok(Self::Other),
            unknown => Err(ReplyKindParseError(unknown.to_owned())),
        }
    }
}

/// Error returned when parsing a [`ReplyKind`] from an unknown string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown reply kind: {0}")]
pub struct ReplyKindParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    const ERROR_KINDS: [ReplyKind; 4] = [
        ReplyKind::DestinationUnreachable,
        ReplyKind::SourceQuench,
        ReplyKind::Redirect,
        ReplyKind::TimeExceeded,
    ];

    #[test]
    fn exactly_four_error_kinds() {
        for kind in ERROR_KINDS {
            assert!(kind.is_error(), "{kind} should be an error kind");
        }
        assert!(!ReplyKind::Success.is_error());
        assert!(!ReplyKind::Other.is_error());
    }

    #[test]
    fn icmp_type_classification() {
        assert_eq!(ReplyKind::from_icmp_type(0), ReplyKind::Success);
        assert_eq!(
            ReplyKind::from_icmp_type(3),
            ReplyKind::DestinationUnreachable
        );
        assert_eq!(ReplyKind::from_icmp_type(4), ReplyKind::SourceQuench);
        assert_eq!(ReplyKind::from_icmp_type(5), ReplyKind::Redirect);
        assert_eq!(ReplyKind::from_icmp_type(11), ReplyKind::TimeExceeded);
    }

    #[test]
    fn unlisted_icmp_types_are_other() {
        for ty in [1u8, 2, 6, 8, 12, 13, 255] {
            assert_eq!(ReplyKind::from_icmp_type(ty), ReplyKind::Other);
        }
    }

    #[test]
    fn display_round_trip() {
        let all = [
            ReplyKind::Success,
            ReplyKind::DestinationUnreachable,
            ReplyKind::SourceQuench,
            ReplyKind::Redirect,
            ReplyKind::TimeExceeded,
            ReplyKind::Other,
        ];
        for kind in all {
            let parsed: ReplyKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn parse_unknown_string() {
        let err = "banana".parse::<ReplyKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown reply kind: banana");
    }
}
