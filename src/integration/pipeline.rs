//! CountingPipeline for combining detection and tracking with lane counting.

use tracing::info;

use crate::counter::{FrameReport, LaneCounter};
use crate::error::Error;

use super::{DetectionSource, EventSink, IntoDetections};

/// Error type for pipeline failures.
#[derive(Debug)]
pub enum PipelineError<E> {
    /// The detector or tracker failed on a frame.
    Source(E),
    /// Counting or event output failed.
    Counter(Error),
}

impl<E: std::fmt::Display> std::fmt::Display for PipelineError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "Detection source error: {}", err),
            Self::Counter(err) => write!(f, "Counter error: {}", err),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for PipelineError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Counter(err) => Some(err),
        }
    }
}

impl<E> From<Error> for PipelineError<E> {
    fn from(err: Error) -> Self {
        Self::Counter(err)
    }
}

/// Runs a `DetectionSource` frame by frame, counts lane crossings and writes
/// new events to an `EventSink`.
///
/// Frame numbers start at 1 and advance by one per processed frame.
pub struct CountingPipeline<D: DetectionSource, S: EventSink> {
    source: D,
    counter: LaneCounter,
    sink: S,
    frame_number: u64,
}

impl<D: DetectionSource, S: EventSink> CountingPipeline<D, S> {
    pub fn new(source: D, counter: LaneCounter, sink: S) -> Self {
        Self {
            source,
            counter,
            sink,
            frame_number: 0,
        }
    }

    /// Process a single frame at original resolution.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    ///
    /// # Returns
    /// The frame's report, after its events have been written to the sink.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameReport, PipelineError<D::Error>> {
        let output = self
            .source
            .detect(input, width, height)
            .map_err(PipelineError::Source)?;
        Ok(self.process_detections(output)?)
    }

    /// Count one frame of already tracked detections, bypassing the source.
    ///
    /// Advances the frame number exactly like [`CountingPipeline::process_frame`].
    pub fn process_detections(&mut self, detections: impl IntoDetections) -> Result<FrameReport, Error> {
        self.frame_number += 1;
        let detections = detections.into_detections();

        let report = self.counter.update(self.frame_number, &detections);
        for event in &report.events {
            self.sink.write_event(event)?;
        }
        Ok(report)
    }

    /// Flush the sink and hand back the counter and sink.
    pub fn finish(mut self) -> Result<(LaneCounter, S), Error> {
        self.sink.flush()?;
        let counts = self.counter.counts();
        info!(
            "Processed {} frame(s): {} (total {})",
            self.frame_number,
            counts,
            counts.total()
        );
        Ok((self.counter, self.sink))
    }

    /// Number of frames processed so far.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    pub fn counter(&self) -> &LaneCounter {
        &self.counter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
