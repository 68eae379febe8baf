//! Data structures for coincidence processing.

pub mod event;
pub mod timestamps;

pub use event::{EventError, EventList, UNFILTERED_FLAG};
pub use timestamps::{check_sorted, Channel, InputError, Timestamps, Window};
