use std::fmt;

/// A saturating event counter.
///
/// A probing session may run indefinitely, so every counter in the
/// aggregate must survive an unbounded stream of increments. Instead of
/// wrapping back to zero (and silently corrupting the report), a
/// [`Counter`] that reaches [`u64::MAX`] stays pinned there and reports
/// the dropped increment to the caller.
///
/// # Example
///
/// ```
/// # use pingstats_core::Counter;
/// let mut counter = Counter::default();
///
/// assert!(!counter.increment());
/// assert!(!counter.increment());
/// assert_eq!(counter.get(), 2);
/// ```
///
/// Once pinned, the counter never moves again:
///
/// ```
/// # use pingstats_core::Counter;
/// let mut counter = Counter::new(u64::MAX);
///
/// assert!(counter.increment());
/// assert_eq!(counter.get(), u64::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Counter(u64);

impl Counter {
    /// The zero counter. Every counter of a fresh session starts here.
    pub const ZERO: Self = Self(0);

    /// create a [`Counter`] with the given starting value.
    #[inline(always)]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// get the current count.
    #[inline(always)]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// `true` once the counter is pinned at [`u64::MAX`].
    #[inline(always)]
    pub const fn is_saturated(self) -> bool {
        self.0 == u64::MAX
    }

    /// Add one to the counter.
    ///
    /// The bounds check happens before the addition: at [`u64::MAX`] the
    /// increment is dropped and the function returns `true` so the caller
    /// can record that the count is no longer exact.
    #[inline]
    pub fn increment(&mut self) -> bool {
        if self.0 == u64::MAX {
            true
        } else {
            self.0 += 1;
            false
        }
    }
}

impl From<Counter> for u64 {
    fn from(value: Counter) -> Self {
        value.get()
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
