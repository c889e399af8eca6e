//! Trait for the external detector + tracker stage.

use crate::counter::Detection;

/// Source of tracked detections for a raw frame.
///
/// Implement this to connect a detector and tracker to the counter. Returned
/// boxes are in detection space (the resized frame the detector ran on), each
/// carrying the tracker's id for that object. The output can be the tracker's
/// own type as long as it converts with [`IntoDetections`].
///
/// # Example
///
/// ```ignore
/// use laneflow_rs::{Detection, DetectionSource};
///
/// struct MyTracker {
///     // Your detector and tracker here
/// }
///
/// impl DetectionSource for MyTracker {
///     type Output = Vec<Detection>;
///     type Error = std::io::Error;
///
///     fn detect(&mut self, input: &[u8], width: u32, height: u32) -> Result<Self::Output, Self::Error> {
///         // Resize, run inference, update the tracker
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Tracker output for one frame.
    type Output: IntoDetections;

    /// Error type for detection failures.
    type Error;

    /// Run detection and tracking on one frame at original resolution.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Self::Output, Self::Error>;
}

/// Conversion from tracker-specific outputs to `Detection`s.
pub trait IntoDetections {
    fn into_detections(self) -> Vec<Detection>;
}

impl IntoDetections for Vec<Detection> {
    fn into_detections(self) -> Vec<Detection> {
        self
    }
}
