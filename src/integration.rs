//! Integration module for connecting a detector and tracker to the lane counter.
//!
//! This module provides the trait an external detection + tracking stage
//! implements, a pipeline that drives it frame by frame, and sinks for the
//! resulting event log.

mod builder;
mod detector;
mod pipeline;
mod sink;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::{CountingPipeline, PipelineError};
pub use sink::{CsvEventSink, EventSink, JsonLinesEventSink};
