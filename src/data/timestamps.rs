//! Validated timestamp channels and coincidence windows.

use std::fmt;
use thiserror::Error;

/// Which side of the coincidence a channel feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// The start (reference) channel.
    Start,
    /// The stop channel.
    Stop,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Start => write!(f, "start"),
            Channel::Stop => write!(f, "stop"),
        }
    }
}

/// Errors raised when coincidence inputs are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A channel is not sorted in non-decreasing order.
    #[error("{channel} timestamps are not sorted: value at index {index} is smaller than its predecessor")]
    Unsorted { channel: Channel, index: usize },
    /// The coincidence window is negative.
    #[error("coincidence window must be non-negative, got {0}")]
    NegativeWindow(i64),
}

/// A channel of event timestamps, sorted non-decreasing.
///
/// Units are whatever the digitizer emits (picoseconds for CoMPASS data).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timestamps {
    values: Vec<i64>,
}

impl Timestamps {
    /// Validate and wrap a channel.
    pub fn new(channel: Channel, values: Vec<i64>) -> Result<Self, InputError> {
        check_sorted(channel, &values)?;
        Ok(Self { values })
    }

    /// Number of events in the channel.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the channel has no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the raw stamps.
    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Take the raw stamps back.
    pub fn into_inner(self) -> Vec<i64> {
        self.values
    }
}

/// Verify a slice is sorted non-decreasing.
pub fn check_sorted(channel: Channel, values: &[i64]) -> Result<(), InputError> {
    match values.windows(2).position(|w| w[1] < w[0]) {
        Some(pos) => Err(InputError::Unsorted {
            channel,
            index: pos + 1,
        }),
        None => Ok(()),
    }
}

/// Maximum allowed separation between a start and a stop stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Window(i64);

impl Window {
    pub fn new(width: i64) -> Result<Self, InputError> {
        if width < 0 {
            return Err(InputError::NegativeWindow(width));
        }
        Ok(Self(width))
    }

    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }

    /// Check whether two stamps fall within the window of each other.
    #[inline]
    pub fn contains(self, start: i64, stop: i64) -> bool {
        // i128 keeps extreme stamps from overflowing the subtraction.
        (stop as i128 - start as i128).abs() <= self.0 as i128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_channel_accepted() {
        let ts = Timestamps::new(Channel::Start, vec![1, 1, 5, 9]).unwrap();
        assert_eq!(ts.len(), 4);
        assert_eq!(ts.as_slice(), &[1, 1, 5, 9]);
    }

    #[test]
    fn test_unsorted_channel_reports_index() {
        let err = Timestamps::new(Channel::Stop, vec![1, 4, 3, 8]).unwrap_err();
        assert_eq!(
            err,
            InputError::Unsorted {
                channel: Channel::Stop,
                index: 2
            }
        );
        assert!(err.to_string().starts_with("stop timestamps"));
    }

    #[test]
    fn test_empty_channel() {
        let ts = Timestamps::new(Channel::Start, Vec::new()).unwrap();
        assert!(ts.is_empty());
    }

    #[test]
    fn test_window_validation() {
        assert_eq!(Window::new(-1), Err(InputError::NegativeWindow(-1)));
        let w = Window::new(10).unwrap();
        assert!(w.contains(100, 110));
        assert!(w.contains(110, 100));
        assert!(!w.contains(100, 111));
    }

    #[test]
    fn test_window_extreme_stamps() {
        let w = Window::new(0).unwrap();
        assert!(!w.contains(i64::MIN, i64::MAX));
        assert!(w.contains(i64::MAX, i64::MAX));
    }
}
