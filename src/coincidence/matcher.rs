//! Two-channel coincidence matching.

use crate::data::{Timestamps, Window};

/// Matched start/stop stamps, index-aligned and in time order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoincidencePairs {
    /// Start-channel stamp of each pair.
    pub start: Vec<i64>,
    /// Stop-channel stamp of each pair.
    pub stop: Vec<i64>,
}

impl CoincidencePairs {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            start: Vec::with_capacity(capacity),
            stop: Vec::with_capacity(capacity),
        }
    }

    /// Number of matched pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.start.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
    }

    #[inline]
    pub fn push(&mut self, start: i64, stop: i64) {
        self.start.push(start);
        self.stop.push(stop);
    }

    /// Append another set of pairs after this one.
    pub fn extend(&mut self, other: CoincidencePairs) {
        self.start.extend(other.start);
        self.stop.extend(other.stop);
    }

    /// Iterate over `(start, stop)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.start.iter().copied().zip(self.stop.iter().copied())
    }
}

/// Pair up start and stop stamps that lie within `window` of each other.
///
/// Both slices must be sorted non-decreasing. The walk is greedy in time
/// order: a coincident pair consumes both events, otherwise the earlier
/// event is dropped. Every event takes part in at most one pair.
pub fn match_pairs(start: &[i64], stop: &[i64], window: Window) -> CoincidencePairs {
    let mut pairs = CoincidencePairs::with_capacity(start.len().min(stop.len()));
    let (mut i, mut j) = (0, 0);

    while i < start.len() && j < stop.len() {
        let (a, b) = (start[i], stop[j]);
        if window.contains(a, b) {
            pairs.push(a, b);
            i += 1;
            j += 1;
        } else if a < b {
            i += 1;
        } else {
            j += 1;
        }
    }

    pairs
}

/// Match two validated channels.
pub fn tof(start: &Timestamps, stop: &Timestamps, window: Window) -> CoincidencePairs {
    match_pairs(start.as_slice(), stop.as_slice(), window)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(width: i64) -> Window {
        Window::new(width).unwrap()
    }

    #[test]
    fn test_exact_coincidences() {
        let pairs = match_pairs(&[100, 200, 300], &[100, 200, 300], w(0));
        assert_eq!(pairs.start, vec![100, 200, 300]);
        assert_eq!(pairs.stop, vec![100, 200, 300]);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let pairs = match_pairs(&[100, 200], &[110, 189], w(10));
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs.iter().collect::<Vec<_>>(), vec![(100, 110)]);
    }

    #[test]
    fn test_stop_before_start_is_matched() {
        let pairs = match_pairs(&[1000], &[995], w(10));
        assert_eq!(pairs.iter().collect::<Vec<_>>(), vec![(1000, 995)]);
    }

    #[test]
    fn test_unmatched_events_are_skipped() {
        let start = vec![0, 50, 100, 400];
        let stop = vec![3, 220, 402, 900];
        let pairs = match_pairs(&start, &stop, w(5));
        assert_eq!(pairs.start, vec![0, 400]);
        assert_eq!(pairs.stop, vec![3, 402]);
    }

    #[test]
    fn test_each_event_used_once() {
        // Two stops near one start: only the first is paired.
        let pairs = match_pairs(&[100], &[98, 101], w(5));
        assert_eq!(pairs.iter().collect::<Vec<_>>(), vec![(100, 98)]);
    }

    #[test]
    fn test_empty_channels() {
        assert!(match_pairs(&[], &[1, 2, 3], w(10)).is_empty());
        assert!(match_pairs(&[1, 2, 3], &[], w(10)).is_empty());
    }

    #[test]
    fn test_validated_channels() {
        use crate::data::Channel;

        let start = Timestamps::new(Channel::Start, vec![10, 20]).unwrap();
        let stop = Timestamps::new(Channel::Stop, vec![12, 29]).unwrap();
        let pairs = tof(&start, &stop, w(2));
        assert_eq!(pairs.iter().collect::<Vec<_>>(), vec![(10, 12)]);
    }
}
