//! Per-frame counting loop.

use tracing::{debug, info, warn};

use crate::counter::config::{CounterConfig, LaneConfig};
use crate::counter::coordinate_mapper::CoordinateMapper;
use crate::counter::counts::LaneCounts;
use crate::counter::crossing::CrossingDetector;
use crate::counter::detection::Detection;
use crate::counter::event::{CrossingEvent, EventEmitter};
use crate::counter::lane::LaneRegistry;
use crate::counter::rect::Rect;
use crate::counter::track_store::TrackStore;
use crate::error::Result;

/// A counted-eligible detection, mapped to original space for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedBox {
    pub track_id: u64,
    pub bbox: Rect,
    pub class_label: String,
}

/// What one call to [`LaneCounter::update`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_number: u64,
    /// Crossings confirmed in this frame, in detection then lane order
    pub events: Vec<CrossingEvent>,
    /// Detections that passed the class and confidence filters
    pub tracked: Vec<TrackedBox>,
    /// Totals after this frame
    pub counts: LaneCounts,
}

/// Counts tracked vehicles crossing a fixed set of lanes.
///
/// Frames must be fed in order: each crossing test uses the position written
/// by the previous observation of the same track.
pub struct LaneCounter {
    lanes: LaneRegistry,
    tracks: TrackStore,
    emitter: EventEmitter,
    mapper: CoordinateMapper,
    config: CounterConfig,
    last_frame: Option<u64>,
}

impl LaneCounter {
    pub fn new(lanes: LaneRegistry, mapper: CoordinateMapper, config: CounterConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "Lane counter ready: {} lane(s), scale {:?}, {:.2} fps, idle window {:?}",
            lanes.lane_count(),
            mapper.scale(),
            config.frame_rate,
            config.max_idle_frames
        );
        Ok(Self {
            tracks: TrackStore::new(config.max_idle_frames),
            emitter: EventEmitter::new(lanes.lane_count()),
            lanes,
            mapper,
            config,
            last_frame: None,
        })
    }

    /// Build from a lane file and the original video size (width, height).
    pub fn from_lane_config(
        lane_config: &LaneConfig,
        source_size: (f32, f32),
        config: CounterConfig,
    ) -> Result<Self> {
        let mapper = CoordinateMapper::new(source_size, lane_config.target_size())?;
        Self::new(lane_config.registry()?, mapper, config)
    }

    /// Process one frame of tracked detections (detection space) and return
    /// the crossings it confirmed.
    ///
    /// Detections are handled in the given order. A track id appearing twice
    /// in the same frame is simply observed twice.
    pub fn update(&mut self, frame_number: u64, detections: &[Detection]) -> FrameReport {
        if let Some(last) = self.last_frame {
            if frame_number < last {
                warn!(
                    "Frame {} arrived after frame {}; crossings may be misattributed",
                    frame_number, last
                );
            }
        }
        self.last_frame = Some(frame_number);

        let mut events = Vec::new();
        let mut tracked = Vec::with_capacity(detections.len());

        if detections.is_empty() {
            return FrameReport {
                frame_number,
                events,
                tracked,
                counts: self.emitter.counts().clone(),
            };
        }

        let detector = CrossingDetector::new(&self.lanes);
        let mut filtered = 0usize;

        for det in detections {
            if !self.config.accepts(&det.class_label, det.confidence) {
                filtered += 1;
                continue;
            }

            let bbox = self.mapper.rect_to_original_space(&det.bbox);
            let credited = detector.evaluate(&mut self.tracks, det.track_id, bbox.center(), frame_number);
            for lane_index in credited {
                let event = CrossingEvent::new(det.track_id, lane_index, frame_number, self.config.frame_rate);
                self.emitter.emit(event.clone());
                events.push(event);
            }

            tracked.push(TrackedBox {
                track_id: det.track_id,
                bbox,
                class_label: det.class_label.clone(),
            });
        }

        if filtered > 0 {
            debug!(
                "Frame {}: {} of {} detection(s) filtered out",
                frame_number,
                filtered,
                detections.len()
            );
        }

        let evicted = self.tracks.evict_idle(frame_number);
        if evicted > 0 {
            debug!("Frame {}: evicted {} idle track(s)", frame_number, evicted);
        }

        FrameReport {
            frame_number,
            events,
            tracked,
            counts: self.emitter.counts().clone(),
        }
    }

    /// Swap in a new lane set. Track state and counts start over, since lane
    /// indices from the old registry no longer mean the same thing.
    pub fn reload_lanes(&mut self, lanes: LaneRegistry) {
        info!(
            "Reloading lanes ({} -> {}); resetting track state",
            self.lanes.lane_count(),
            lanes.lane_count()
        );
        self.tracks = TrackStore::new(self.config.max_idle_frames);
        self.emitter = EventEmitter::new(lanes.lane_count());
        self.lanes = lanes;
        self.last_frame = None;
    }

    pub fn lanes(&self) -> &LaneRegistry {
        &self.lanes
    }

    pub fn tracks(&self) -> &TrackStore {
        &self.tracks
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Every event so far, in emission order.
    pub fn events(&self) -> &[CrossingEvent] {
        self.emitter.events()
    }

    pub fn counts(&self) -> &LaneCounts {
        self.emitter.counts()
    }

    /// Last frame number passed to [`LaneCounter::update`].
    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(config: CounterConfig) -> LaneCounter {
        let lanes = LaneRegistry::from_coords(&[[[0.0, 100.0], [1000.0, 100.0]]]).unwrap();
        LaneCounter::new(lanes, CoordinateMapper::identity(), config).unwrap()
    }

    fn car(track_id: u64, cx: f32, cy: f32) -> Detection {
        Detection::new(track_id, cx - 10.0, cy - 10.0, cx + 10.0, cy + 10.0, "car", 0.9)
    }

    #[test]
    fn test_empty_frame_changes_nothing() {
        let mut counter = counter(CounterConfig::default());
        counter.update(1, &[car(1, 50.0, 50.0)]);

        let report = counter.update(2, &[]);
        assert!(report.events.is_empty());
        assert!(report.tracked.is_empty());
        assert_eq!(counter.tracks().get(1).unwrap().last_seen_frame(), 1);
    }

    #[test]
    fn test_filtered_detections_do_not_touch_state() {
        let mut counter = counter(CounterConfig::default());
        let person = Detection::new(1, 40.0, 40.0, 60.0, 60.0, "person", 0.9);
        let weak = Detection::new(2, 40.0, 40.0, 60.0, 60.0, "car", 0.1);

        let report = counter.update(1, &[person, weak]);
        assert!(report.tracked.is_empty());
        assert!(counter.tracks().is_empty());
    }

    #[test]
    fn test_duplicate_ids_in_one_frame() {
        let mut counter = counter(CounterConfig::default());
        counter.update(1, &[car(3, 50.0, 50.0)]);

        let report = counter.update(2, &[car(3, 50.0, 150.0), car(3, 50.0, 50.0)]);
        assert_eq!(report.events.len(), 1);
        assert_eq!(counter.counts().total(), 1);
        assert_eq!(counter.tracks().get(3).unwrap().observations(), 3);
    }

    #[test]
    fn test_eviction_allows_recount() {
        let config = CounterConfig {
            max_idle_frames: Some(5),
            ..CounterConfig::default()
        };
        let mut counter = counter(config);

        counter.update(1, &[car(1, 50.0, 50.0)]);
        assert_eq!(counter.update(2, &[car(1, 50.0, 150.0)]).events.len(), 1);

        // Another track keeps frames flowing until track 1 is evicted.
        counter.update(20, &[car(2, 500.0, 500.0)]);
        assert!(counter.tracks().get(1).is_none());

        counter.update(21, &[car(1, 50.0, 50.0)]);
        assert_eq!(counter.update(22, &[car(1, 50.0, 150.0)]).events.len(), 1);
        assert_eq!(counter.counts().get(0), 2);
    }

    #[test]
    fn test_reload_lanes_resets_state() {
        let mut counter = counter(CounterConfig::default());
        counter.update(1, &[car(1, 50.0, 50.0)]);
        counter.update(2, &[car(1, 50.0, 150.0)]);
        assert_eq!(counter.counts().total(), 1);

        let lanes = LaneRegistry::from_coords(&[
            [[0.0, 100.0], [1000.0, 100.0]],
            [[0.0, 300.0], [1000.0, 300.0]],
        ])
        .unwrap();
        counter.reload_lanes(lanes);

        assert!(counter.tracks().is_empty());
        assert!(counter.events().is_empty());
        assert_eq!(counter.counts().lane_count(), 2);
        assert_eq!(counter.last_frame(), None);
    }

    #[test]
    fn test_invalid_frame_rate_rejected() {
        let lanes = LaneRegistry::default();
        let config = CounterConfig {
            frame_rate: 0.0,
            ..CounterConfig::default()
        };
        assert!(LaneCounter::new(lanes, CoordinateMapper::identity(), config).is_err());
    }
}
