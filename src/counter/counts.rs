use std::fmt;

/// Running per-lane totals, the projection an overlay renderer draws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneCounts {
    per_lane: Vec<u64>,
}

impl LaneCounts {
    pub fn new(lane_count: usize) -> Self {
        Self {
            per_lane: vec![0; lane_count],
        }
    }

    pub(crate) fn increment(&mut self, lane_index: usize) {
        if lane_index >= self.per_lane.len() {
            self.per_lane.resize(lane_index + 1, 0);
        }
        self.per_lane[lane_index] += 1;
    }

    /// Count for a 0-based lane index.
    pub fn get(&self, lane_index: usize) -> u64 {
        self.per_lane.get(lane_index).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.per_lane.iter().sum()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.per_lane
    }

    pub fn lane_count(&self) -> usize {
        self.per_lane.len()
    }
}

/// Formats as `L1: 3 | L2: 0 | L3: 5`.
impl fmt::Display for LaneCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, count) in self.per_lane.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "L{}: {}", i + 1, count)?;
        }
        Ok(())
    }
}
