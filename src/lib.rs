//! # laneflow-rs
//!
//! Counts vehicles crossing fixed lane boundaries in a video, given per-frame
//! detections that already carry persistent track ids.
//!
//! Each track is credited at most once per lane. Detection boxes arrive in the
//! resized detection frame and are mapped back to the original video resolution,
//! which is where lane geometry lives.
//!
//! ## Example
//!
//! ```rust,ignore
//! use laneflow_rs::{CounterConfig, Detection, LaneConfig, LaneCounter};
//!
//! let lanes = LaneConfig::load("lane_config.json")?;
//! let mut counter = LaneCounter::from_lane_config(&lanes, (1280.0, 720.0), CounterConfig::default())?;
//!
//! let detections = vec![Detection::new(7, 200.0, 420.0, 250.0, 480.0, "car", 0.9)];
//! let events = counter.update(1, &detections);
//! ```

pub mod counter;
pub mod integration;

mod error;

pub use counter::{
    CoordinateMapper, CounterConfig, CrossingEvent, Detection, FrameReport, Lane, LaneConfig,
    LaneCounter, LaneCounts, LaneRegistry, Rect, Segment, TrackRecord, TrackStore,
};
pub use error::{Error, Result};
pub use integration::{
    CountingPipeline, CsvEventSink, DetectionBuilder, DetectionSource, EventSink,
    IntoDetections, JsonLinesEventSink, PipelineError,
};
