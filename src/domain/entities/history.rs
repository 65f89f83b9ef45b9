//! The bounded, oldest-first range of messages to process.

use super::ChannelId;

/// Defines the exact message range a run processes: origin channel plus
/// optional exclusive snowflake cursors, always iterated oldest first.
///
/// Absent cursors mean "entire history", bounded upstream by the channel's
/// last known message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    origin: ChannelId,
    after: Option<u64>,
    before: Option<u64>,
}

impl HistoryWindow {
    /// Creates a window over the whole channel history.
    #[must_use]
    pub fn new(origin: impl Into<ChannelId>) -> Self {
        Self {
            origin: origin.into(),
            after: None,
            before: None,
        }
    }

    /// Restricts the window to messages with ids strictly greater than the
    /// cursor.
    #[must_use]
    pub const fn with_after(mut self, cursor: u64) -> Self {
        self.after = Some(cursor);
        self
    }

    /// Restricts the window to messages with ids strictly smaller than the
    /// cursor.
    #[must_use]
    pub const fn with_before(mut self, cursor: u64) -> Self {
        self.before = Some(cursor);
        self
    }

    /// The origin channel.
    #[must_use]
    pub const fn origin(&self) -> ChannelId {
        self.origin
    }

    /// Exclusive lower cursor, if any.
    #[must_use]
    pub const fn after(&self) -> Option<u64> {
        self.after
    }

    /// Exclusive upper cursor, if any.
    #[must_use]
    pub const fn before(&self) -> Option<u64> {
        self.before
    }

    /// True when both cursors are present but out of order, which would
    /// describe an empty or inverted range.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!((self.after, self.before), (Some(a), Some(b)) if a >= b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_history_window() {
        let window = HistoryWindow::new(100_u64);
        assert_eq!(window.origin().as_u64(), 100);
        assert!(window.after().is_none());
        assert!(window.before().is_none());
        assert!(!window.is_inverted());
    }

    #[test]
    fn test_inverted_window_detected() {
        let window = HistoryWindow::new(100_u64).with_after(500).with_before(400);
        assert!(window.is_inverted());

        let ordered = HistoryWindow::new(100_u64).with_after(400).with_before(500);
        assert!(!ordered.is_inverted());
    }
}
