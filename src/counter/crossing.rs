//! Decides which lanes a track crossed between two observations.

use nalgebra::Point2;

use crate::counter::lane::{Lane, LaneRegistry};
use crate::counter::segment::Segment;
use crate::counter::track_store::TrackStore;

/// Lanes whose boundary the motion segment crosses, in lane-index order.
pub fn crossed_lanes<'a>(lanes: &'a [Lane], motion: &'a Segment) -> impl Iterator<Item = &'a Lane> {
    lanes
        .iter()
        .filter(move |lane| motion.intersects(&lane.boundary))
}

/// Crossing test against a fixed lane registry.
///
/// Stateless apart from the borrowed registry; all per-track memory lives in
/// the [`TrackStore`] passed to [`CrossingDetector::evaluate`].
#[derive(Debug, Clone, Copy)]
pub struct CrossingDetector<'a> {
    lanes: &'a LaneRegistry,
}

impl<'a> CrossingDetector<'a> {
    pub fn new(lanes: &'a LaneRegistry) -> Self {
        Self { lanes }
    }

    /// Observe `track_id` at `position` (original space) and return the lanes
    /// newly credited to it, in lane-index order.
    ///
    /// The first sighting of a track only records its position. Afterwards the
    /// segment from the last known position to `position` is tested against
    /// every lane, and each crossed lane is credited at most once per track.
    /// Gaps in sightings are not special: motion is always taken from the last
    /// known position.
    pub fn evaluate(
        &self,
        store: &mut TrackStore,
        track_id: u64,
        position: Point2<f32>,
        frame_number: u64,
    ) -> Vec<usize> {
        let Some(previous) = store.update_position(track_id, position, frame_number) else {
            return Vec::new();
        };

        let motion = Segment::new(previous, position);
        if motion.is_degenerate() {
            return Vec::new();
        }

        let mut credited = Vec::new();
        for lane in crossed_lanes(self.lanes.lanes(), &motion) {
            if store.credit(track_id, lane.index) {
                credited.push(lane.index);
            }
        }
        credited
    }
}
