//! Lane boundaries and the registry that holds them for a run.

use tracing::info;

use crate::counter::segment::Segment;
use crate::error::{Error, Result};

/// A counting boundary in original-frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    /// 0-based position in the registry. User-facing output adds one.
    pub index: usize,
    pub boundary: Segment,
}

impl Lane {
    /// Lane number as shown to users (1-based).
    #[inline]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Ordered, immutable set of lanes.
///
/// There is no mutation API. Changing lanes means building a new registry, and
/// any track state built against the old one must be discarded with it since
/// lane indices may now mean something else.
#[derive(Debug, Clone, Default)]
pub struct LaneRegistry {
    lanes: Vec<Lane>,
}

impl LaneRegistry {
    /// Validate and index the given boundaries in order.
    ///
    /// Fails on the first degenerate or non-finite boundary; nothing is loaded
    /// in that case.
    pub fn new<I>(boundaries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut lanes = Vec::new();
        for (index, boundary) in boundaries.into_iter().enumerate() {
            if boundary.is_degenerate() || !boundary.is_finite() {
                return Err(Error::InvalidLaneGeometry { lane: index });
            }
            lanes.push(Lane { index, boundary });
        }

        info!("Loaded {} lane(s)", lanes.len());
        Ok(Self { lanes })
    }

    /// Build from raw `[[x1, y1], [x2, y2]]` pairs.
    pub fn from_coords(coords: &[[[f32; 2]; 2]]) -> Result<Self> {
        Self::new(coords.iter().copied().map(Segment::from_coords))
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn get(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_keep_order() {
        let registry = LaneRegistry::from_coords(&[
            [[100.0, 720.0], [500.0, 400.0]],
            [[550.0, 720.0], [900.0, 400.0]],
        ])
        .unwrap();

        assert_eq!(registry.lane_count(), 2);
        assert_eq!(registry.lanes()[0].index, 0);
        assert_eq!(registry.lanes()[1].number(), 2);
        assert_eq!(
            registry.get(1).unwrap().boundary.to_coords(),
            [[550.0, 720.0], [900.0, 400.0]]
        );
        assert!(registry.get(2).is_none());
    }

    #[test]
    fn test_degenerate_lane_rejected() {
        let result = LaneRegistry::from_coords(&[
            [[100.0, 720.0], [500.0, 400.0]],
            [[300.0, 300.0], [300.0, 300.0]],
        ]);

        match result {
            Err(Error::InvalidLaneGeometry { lane }) => assert_eq!(lane, 1),
            other => panic!("expected InvalidLaneGeometry, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_lane_rejected() {
        for coords in [
            [[f32::NAN, 0.0], [f32::NAN, 0.0]],
            [[0.0, 0.0], [f32::INFINITY, 10.0]],
            [[0.0, f32::NEG_INFINITY], [10.0, 10.0]],
        ] {
            let result = LaneRegistry::from_coords(&[[[100.0, 720.0], [500.0, 400.0]], coords]);
            assert!(matches!(result, Err(Error::InvalidLaneGeometry { lane: 1 })));
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = LaneRegistry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.lane_count(), 0);
    }
}
