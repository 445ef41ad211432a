//! Interning of baseline arrays.
//!
//! Many trips of a pattern run the same zero-based timings (a bus every ten
//! minutes), so their baselines can share one allocation.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use super::{BookingInfo, PickDrop};

/// Interns identical arrays so equal baselines share one `Arc`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use transit_router::timetable::Deduplicator;
///
/// let mut dedup = Deduplicator::new();
/// let a = dedup.times(vec![0, 300, 600]);
/// let b = dedup.times(vec![0, 300, 600]);
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Default)]
pub struct Deduplicator {
    times: HashMap<Vec<i32>, Arc<[i32]>>,
    sequences: HashMap<Vec<u32>, Arc<[u32]>>,
    flags: HashMap<Vec<bool>, Arc<[bool]>>,
    pick_drops: HashMap<Vec<PickDrop>, Arc<[PickDrop]>>,
    headsigns: HashMap<Vec<Option<String>>, Arc<[Option<String>]>>,
    booking_infos: HashMap<Vec<Option<BookingInfo>>, Arc<[Option<BookingInfo>]>>,
    hits: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times(&mut self, values: Vec<i32>) -> Arc<[i32]> {
        intern(&mut self.times, &mut self.hits, values)
    }

    pub fn sequences(&mut self, values: Vec<u32>) -> Arc<[u32]> {
        intern(&mut self.sequences, &mut self.hits, values)
    }

    pub fn flags(&mut self, values: Vec<bool>) -> Arc<[bool]> {
        intern(&mut self.flags, &mut self.hits, values)
    }

    pub fn pick_drops(&mut self, values: Vec<PickDrop>) -> Arc<[PickDrop]> {
        intern(&mut self.pick_drops, &mut self.hits, values)
    }

    pub fn headsigns(&mut self, values: Vec<Option<String>>) -> Arc<[Option<String>]> {
        intern(&mut self.headsigns, &mut self.hits, values)
    }

    pub fn booking_infos(
        &mut self,
        values: Vec<Option<BookingInfo>>,
    ) -> Arc<[Option<BookingInfo>]> {
        intern(&mut self.booking_infos, &mut self.hits, values)
    }

    /// Number of distinct arrays held.
    pub fn len(&self) -> usize {
        self.times.len()
            + self.sequences.len()
            + self.flags.len()
            + self.pick_drops.len()
            + self.headsigns.len()
            + self.booking_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of requests answered with an already interned array.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

fn intern<T: Hash + Eq + Clone>(
    map: &mut HashMap<Vec<T>, Arc<[T]>>,
    hits: &mut usize,
    values: Vec<T>,
) -> Arc<[T]> {
    if let Some(shared) = map.get(&values) {
        *hits += 1;
        return Arc::clone(shared);
    }
    let shared: Arc<[T]> = Arc::from(values.as_slice());
    map.insert(values, Arc::clone(&shared));
    shared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_arrays_share_allocation() {
        let mut dedup = Deduplicator::new();
        let a = dedup.times(vec![0, 60]);
        let b = dedup.times(vec![0, 60]);
        let c = dedup.times(vec![0, 90]);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(dedup.hits(), 1);
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn kinds_are_kept_apart() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.is_empty());

        dedup.flags(vec![true, false]);
        dedup.pick_drops(vec![PickDrop::Scheduled]);
        dedup.headsigns(vec![Some("North".to_string()), None]);
        dedup.booking_infos(vec![None]);
        dedup.sequences(vec![1, 2]);

        assert_eq!(dedup.len(), 5);
        assert_eq!(dedup.hits(), 0);

        let again = dedup.headsigns(vec![Some("North".to_string()), None]);
        assert_eq!(again[0].as_deref(), Some("North"));
        assert_eq!(dedup.hits(), 1);
    }
}
