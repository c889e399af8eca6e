//! Owner of all per-track state for a run.

use std::collections::HashMap;

use nalgebra::Point2;
use tracing::debug;

use crate::counter::track_record::TrackRecord;

/// Map from track id to [`TrackRecord`].
///
/// Memory grows with the number of distinct track ids. With `max_idle_frames`
/// set, [`TrackStore::evict_idle`] drops records that have not been observed
/// for longer than that many frames. An evicted id that comes back starts over
/// with no credits and can be counted again, so the window must outlast the
/// tracker's own id retention.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    records: HashMap<u64, TrackRecord>,
    max_idle_frames: Option<u64>,
}

impl TrackStore {
    pub fn new(max_idle_frames: Option<u64>) -> Self {
        Self {
            records: HashMap::new(),
            max_idle_frames,
        }
    }

    pub fn get_or_create(&mut self, track_id: u64) -> &mut TrackRecord {
        self.records.entry(track_id).or_insert_with(|| {
            debug!("New track {}", track_id);
            TrackRecord::new(track_id)
        })
    }

    pub fn get(&self, track_id: u64) -> Option<&TrackRecord> {
        self.records.get(&track_id)
    }

    /// Store the latest position of a track, creating it if needed.
    /// Returns the position it replaced.
    pub fn update_position(
        &mut self,
        track_id: u64,
        position: Point2<f32>,
        frame_number: u64,
    ) -> Option<Point2<f32>> {
        self.get_or_create(track_id).observe(position, frame_number)
    }

    /// Credit `lane_index` to the track. Returns false if it was already credited.
    pub fn credit(&mut self, track_id: u64, lane_index: usize) -> bool {
        self.get_or_create(track_id).credit(lane_index)
    }

    /// Drop records idle for more than `max_idle_frames` as of `current_frame`.
    /// Returns the number of records removed.
    pub fn evict_idle(&mut self, current_frame: u64) -> usize {
        let Some(max_idle) = self.max_idle_frames else {
            return 0;
        };

        let before = self.records.len();
        self.records.retain(|track_id, record| {
            let keep = current_frame.saturating_sub(record.last_seen_frame()) <= max_idle;
            if !keep {
                debug!(
                    "Evicting track {} (last seen frame {}, {} credit(s))",
                    track_id,
                    record.last_seen_frame(),
                    record.credited_lanes().len()
                );
            }
            keep
        });
        before - self.records.len()
    }

    pub fn max_idle_frames(&self) -> Option<u64> {
        self.max_idle_frames
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forget every track. Needed whenever the lane registry is rebuilt.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_is_idempotent() {
        let mut store = TrackStore::new(None);
        assert!(store.credit(3, 1));
        assert!(!store.credit(3, 1));
        assert!(store.credit(3, 0));
        assert_eq!(store.get(3).unwrap().credited_lanes().len(), 2);
    }

    #[test]
    fn test_update_position() {
        let mut store = TrackStore::new(None);
        assert_eq!(store.update_position(9, Point2::new(1.0, 1.0), 1), None);
        assert_eq!(
            store.update_position(9, Point2::new(2.0, 2.0), 2),
            Some(Point2::new(1.0, 1.0))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_need_not_be_contiguous() {
        let mut store = TrackStore::new(None);
        for id in [u64::MAX, 0, 42, 7] {
            store.update_position(id, Point2::new(0.0, 0.0), 1);
        }
        assert_eq!(store.len(), 4);
        assert!(store.get(u64::MAX).is_some());
    }

    #[test]
    fn test_evict_idle() {
        let mut store = TrackStore::new(Some(10));
        store.update_position(1, Point2::new(0.0, 0.0), 1);
        store.update_position(2, Point2::new(0.0, 0.0), 5);

        assert_eq!(store.evict_idle(11), 0);
        assert_eq!(store.evict_idle(12), 1);
        assert!(store.get(1).is_none());
        assert!(store.get(2).is_some());
    }

    #[test]
    fn test_no_eviction_without_window() {
        let mut store = TrackStore::new(None);
        store.update_position(1, Point2::new(0.0, 0.0), 1);
        assert_eq!(store.evict_idle(1_000_000), 0);
        assert_eq!(store.len(), 1);
    }
}
