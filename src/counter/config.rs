//! Lane file format and counter settings.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::counter::lane::LaneRegistry;
use crate::error::{Error, Result};

fn default_target_frame_size() -> [f32; 2] {
    [960.0, 540.0]
}

fn default_description() -> String {
    "Lane coordinates for traffic flow analysis".to_string()
}

/// On-disk lane configuration (`lane_config.json`).
///
/// ```json
/// {
///   "lanes": [[[100, 720], [500, 400]], [[550, 720], [900, 400]]],
///   "target_frame_size": [960, 540],
///   "description": "Lane coordinates for traffic flow analysis"
/// }
/// ```
///
/// Lane points are in original-frame coordinates. `target_frame_size` is the
/// (width, height) frames are resized to before detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub lanes: Vec<[[f32; 2]; 2]>,
    #[serde(default = "default_target_frame_size")]
    pub target_frame_size: [f32; 2],
    #[serde(default = "default_description")]
    pub description: String,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            lanes: vec![
                [[100.0, 720.0], [500.0, 400.0]],
                [[550.0, 720.0], [900.0, 400.0]],
                [[950.0, 720.0], [1300.0, 400.0]],
            ],
            target_frame_size: default_target_frame_size(),
            description: default_description(),
        }
    }
}

impl LaneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!(
            "Lane configuration loaded from {} ({} lane(s))",
            path.display(),
            config.lanes.len()
        );
        Ok(config)
    }

    /// Load `path`, or write and return the default layout if it does not exist.
    ///
    /// Only a missing file falls back. Unreadable or malformed files are errors.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                info!("No lane configuration at {}, using defaults", path.display());
                let config = Self::default();
                config.save(path)?;
                Ok(config)
            }
            other => other,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)?;
        info!("Lane configuration saved to {}", path.display());
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the lanes into a registry.
    pub fn registry(&self) -> Result<LaneRegistry> {
        LaneRegistry::from_coords(&self.lanes)
    }

    /// Detection frame size as (width, height).
    pub fn target_size(&self) -> (f32, f32) {
        (self.target_frame_size[0], self.target_frame_size[1])
    }
}

/// Settings for [`LaneCounter`](crate::counter::LaneCounter).
#[derive(Debug, Clone, PartialEq)]
pub struct CounterConfig {
    /// Source video frame rate, used for event timestamps
    pub frame_rate: f64,
    /// Detections below this confidence are ignored
    pub min_confidence: f32,
    /// Class labels that are counted. Empty means every class.
    pub vehicle_classes: Vec<String>,
    /// Evict tracks unseen for more than this many frames. `None` keeps every
    /// track for the whole run.
    pub max_idle_frames: Option<u64>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            min_confidence: 0.4,
            vehicle_classes: ["car", "truck", "bus", "motorbike", "motorcycle"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_idle_frames: Some(900),
        }
    }
}

impl CounterConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if self.min_confidence.is_nan() {
            return Err(Error::InvalidConfig("min_confidence is NaN".to_string()));
        }
        Ok(())
    }

    /// Whether a detection with this class and confidence takes part in counting.
    pub fn accepts(&self, class_label: &str, confidence: f32) -> bool {
        confidence >= self.min_confidence
            && (self.vehicle_classes.is_empty()
                || self.vehicle_classes.iter().any(|c| c == class_label))
    }
}
