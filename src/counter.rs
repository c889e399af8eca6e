mod config;
mod coordinate_mapper;
mod counts;
mod crossing;
mod detection;
mod event;
mod lane;
mod lane_counter;
mod rect;
mod segment;
mod track_record;
mod track_store;

pub use config::{CounterConfig, LaneConfig};
pub use coordinate_mapper::CoordinateMapper;
pub use counts::LaneCounts;
pub use crossing::{CrossingDetector, crossed_lanes};
pub use detection::Detection;
pub use event::{CrossingEvent, EventEmitter, EventRecord, format_timestamp};
pub use lane::{Lane, LaneRegistry};
pub use lane_counter::{FrameReport, LaneCounter, TrackedBox};
pub use rect::Rect;
pub use segment::{Orientation, Segment, orientation};
pub use track_record::TrackRecord;
pub use track_store::TrackStore;
