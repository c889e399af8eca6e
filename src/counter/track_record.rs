//! Per-track counting memory.

use std::collections::BTreeSet;

use nalgebra::Point2;

/// Everything the counter remembers about one track id.
///
/// `credited_lanes` only ever grows: the only mutation is [`TrackRecord::credit`],
/// which inserts. There is no way to remove a credit short of dropping the
/// whole record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    track_id: u64,
    last_position: Option<Point2<f32>>,
    credited_lanes: BTreeSet<usize>,
    first_seen_frame: u64,
    last_seen_frame: u64,
    observations: u32,
}

impl TrackRecord {
    pub fn new(track_id: u64) -> Self {
        Self {
            track_id,
            last_position: None,
            credited_lanes: BTreeSet::new(),
            first_seen_frame: 0,
            last_seen_frame: 0,
            observations: 0,
        }
    }

    pub fn track_id(&self) -> u64 {
        self.track_id
    }

    /// Centroid from the most recent observation, in original space.
    /// `None` until the track has been observed once.
    pub fn last_position(&self) -> Option<Point2<f32>> {
        self.last_position
    }

    pub fn credited_lanes(&self) -> &BTreeSet<usize> {
        &self.credited_lanes
    }

    pub fn first_seen_frame(&self) -> u64 {
        self.first_seen_frame
    }

    pub fn last_seen_frame(&self) -> u64 {
        self.last_seen_frame
    }

    /// Number of positions recorded for this track.
    pub fn observations(&self) -> u32 {
        self.observations
    }

    /// Record a new position and return the previous one.
    pub(crate) fn observe(&mut self, position: Point2<f32>, frame_number: u64) -> Option<Point2<f32>> {
        if self.observations == 0 {
            self.first_seen_frame = frame_number;
        }
        self.observations = self.observations.saturating_add(1);
        self.last_seen_frame = frame_number;
        self.last_position.replace(position)
    }

    /// Returns true only the first time a lane is credited.
    pub(crate) fn credit(&mut self, lane_index: usize) -> bool {
        self.credited_lanes.insert(lane_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_returns_previous_position() {
        let mut record = TrackRecord::new(7);
        assert_eq!(record.observe(Point2::new(1.0, 2.0), 10), None);
        assert_eq!(
            record.observe(Point2::new(3.0, 4.0), 11),
            Some(Point2::new(1.0, 2.0))
        );
        assert_eq!(record.last_position(), Some(Point2::new(3.0, 4.0)));
        assert_eq!(record.first_seen_frame(), 10);
        assert_eq!(record.last_seen_frame(), 11);
        assert_eq!(record.observations(), 2);
    }

    #[test]
    fn test_credit_only_grows() {
        let mut record = TrackRecord::new(1);
        assert!(record.credit(2));
        assert!(record.credit(0));
        assert!(!record.credit(2));
        assert_eq!(record.credited_lanes().iter().copied().collect::<Vec<_>>(), vec![0, 2]);
    }
}
