//! Digitizer event lists and the selections applied before coincidence.

use super::timestamps::{Channel, InputError, Timestamps};
use thiserror::Error;

/// Flag value carried by unfiltered CoMPASS events.
pub const UNFILTERED_FLAG: u32 = 0x4000;

/// Errors that can occur when building event lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// Column lengths don't match.
    #[error("Column length mismatch: timestamp={timestamp_len}, energy={energy_len}, flags={flags_len}")]
    LengthMismatch {
        timestamp_len: usize,
        energy_len: usize,
        flags_len: usize,
    },
}

/// Columnar list of events from one digitizer channel.
///
/// The columns are expected to have equal lengths, which [`EventList::new`]
/// checks. Selections only look at the first `len()` rows present in
/// every column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventList {
    /// Trigger time of each event.
    pub timestamp: Vec<i64>,

    /// Long-gate energy in ADC channels.
    pub energy: Vec<u16>,

    /// Acquisition flags.
    pub flags: Vec<u32>,
}

impl EventList {
    /// Create an event list from matching columns.
    pub fn new(timestamp: Vec<i64>, energy: Vec<u16>, flags: Vec<u32>) -> Result<Self, EventError> {
        let len = timestamp.len();
        if energy.len() != len || flags.len() != len {
            return Err(EventError::LengthMismatch {
                timestamp_len: len,
                energy_len: energy.len(),
                flags_len: flags.len(),
            });
        }

        Ok(Self {
            timestamp,
            energy,
            flags,
        })
    }

    /// Get the number of complete events.
    #[inline]
    pub fn len(&self) -> usize {
        self.timestamp.len().min(self.energy.len()).min(self.flags.len())
    }

    /// Check if the list has no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only events matching a predicate on their index.
    fn retain_indices(&self, keep: impl Fn(usize) -> bool) -> Self {
        let mut out = Self::default();
        for i in (0..self.len()).filter(|&i| keep(i)) {
            out.timestamp.push(self.timestamp[i]);
            out.energy.push(self.energy[i]);
            out.flags.push(self.flags[i]);
        }
        out
    }

    /// Events whose flags mark them as unfiltered raw hits.
    pub fn unfiltered(&self) -> Self {
        self.retain_indices(|i| self.flags[i] == UNFILTERED_FLAG)
    }

    /// Events with `low <= energy <= high`.
    pub fn energy_cut(&self, low: u16, high: u16) -> Self {
        self.retain_indices(|i| (low..=high).contains(&self.energy[i]))
    }

    /// Timestamps of the list as a validated channel.
    pub fn timestamps(&self, channel: Channel) -> Result<Timestamps, InputError> {
        Timestamps::new(channel, self.timestamp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_events() -> EventList {
        EventList::new(
            vec![10, 20, 30, 40, 50],
            vec![100, 900, 450, 500, 2000],
            vec![UNFILTERED_FLAG, UNFILTERED_FLAG, 0x8000, UNFILTERED_FLAG, UNFILTERED_FLAG],
        )
        .unwrap()
    }

    #[test]
    fn test_length_mismatch() {
        let result = EventList::new(vec![1, 2], vec![1], vec![0, 0]);
        assert!(matches!(result, Err(EventError::LengthMismatch { .. })));
    }

    #[test]
    fn test_unfiltered_selection() {
        let events = make_events().unfiltered();
        assert_eq!(events.timestamp, vec![10, 20, 40, 50]);
        assert_eq!(events.energy, vec![100, 900, 500, 2000]);
    }

    #[test]
    fn test_energy_cut_is_inclusive() {
        let events = make_events().energy_cut(450, 900);
        assert_eq!(events.timestamp, vec![20, 30, 40]);
    }

    #[test]
    fn test_ragged_columns_select_complete_rows() {
        let events = EventList {
            timestamp: vec![10, 20, 30],
            energy: vec![100, 200, 300],
            flags: vec![UNFILTERED_FLAG, UNFILTERED_FLAG],
        };
        assert_eq!(events.len(), 2);

        let kept = events.unfiltered();
        assert_eq!(kept.timestamp, vec![10, 20]);
        assert_eq!(events.energy_cut(0, 1000).energy, vec![100, 200]);
    }

    #[test]
    fn test_timestamps_rejects_unsorted() {
        let events = EventList::new(vec![5, 3], vec![1, 1], vec![0, 0]).unwrap();
        assert!(events.timestamps(Channel::Start).is_err());
    }
}
