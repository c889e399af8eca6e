//! Counting events and the append-only log they go into.

use chrono::NaiveTime;
use serde::Serialize;
use tracing::info;

use crate::counter::counts::LaneCounts;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Format `frame_number / frame_rate` seconds as `HH:MM:SS`, truncating the
/// fractional second and wrapping at 24 hours.
pub fn format_timestamp(frame_number: u64, frame_rate: f64) -> String {
    let seconds = (frame_number as f64 / frame_rate).floor();
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64 % SECONDS_PER_DAY
    } else {
        0
    };
    NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, 0)
        .unwrap_or_default()
        .format("%H:%M:%S")
        .to_string()
}

/// One confirmed lane crossing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossingEvent {
    pub track_id: u64,
    /// 0-based lane index
    pub lane_index: usize,
    pub frame_number: u64,
    /// `HH:MM:SS` derived from the frame number and source frame rate
    pub timestamp: String,
}

/// Output row for an event, with the 1-based lane number users see.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord<'a> {
    #[serde(rename = "VehicleID")]
    pub vehicle_id: u64,
    #[serde(rename = "Lane")]
    pub lane: usize,
    #[serde(rename = "Frame")]
    pub frame: u64,
    #[serde(rename = "Timestamp")]
    pub timestamp: &'a str,
}

impl CrossingEvent {
    pub fn new(track_id: u64, lane_index: usize, frame_number: u64, frame_rate: f64) -> Self {
        Self {
            track_id,
            lane_index,
            frame_number,
            timestamp: format_timestamp(frame_number, frame_rate),
        }
    }

    pub fn lane_number(&self) -> usize {
        self.lane_index + 1
    }

    pub fn record(&self) -> EventRecord<'_> {
        EventRecord {
            vehicle_id: self.track_id,
            lane: self.lane_number(),
            frame: self.frame_number,
            timestamp: &self.timestamp,
        }
    }
}

/// Append-only event log with incrementally maintained lane counts.
///
/// Events keep arrival order. Durable output is left to an
/// [`EventSink`](crate::integration::EventSink).
#[derive(Debug, Clone, Default)]
pub struct EventEmitter {
    log: Vec<CrossingEvent>,
    counts: LaneCounts,
}

impl EventEmitter {
    pub fn new(lane_count: usize) -> Self {
        Self {
            log: Vec::new(),
            counts: LaneCounts::new(lane_count),
        }
    }

    pub fn emit(&mut self, event: CrossingEvent) {
        info!(
            "Vehicle {} crossed lane {} at frame {} ({})",
            event.track_id,
            event.lane_number(),
            event.frame_number,
            event.timestamp
        );
        self.counts.increment(event.lane_index);
        self.log.push(event);
    }

    pub fn events(&self) -> &[CrossingEvent] {
        &self.log
    }

    pub fn counts(&self) -> &LaneCounts {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0, 30.0), "00:00:00");
        assert_eq!(format_timestamp(29, 30.0), "00:00:00");
        assert_eq!(format_timestamp(30, 30.0), "00:00:01");
        assert_eq!(format_timestamp(30 * 3725, 30.0), "01:02:05");
        assert_eq!(format_timestamp(25 * 86_401, 25.0), "00:00:01");
        assert_eq!(format_timestamp(60, 29.97), "00:00:02");
    }

    #[test]
    fn test_emit_keeps_order_and_counts() {
        let mut emitter = EventEmitter::new(2);
        emitter.emit(CrossingEvent::new(7, 1, 11, 30.0));
        emitter.emit(CrossingEvent::new(3, 1, 12, 30.0));
        emitter.emit(CrossingEvent::new(3, 0, 12, 30.0));

        let ids: Vec<u64> = emitter.events().iter().map(|e| e.track_id).collect();
        assert_eq!(ids, vec![7, 3, 3]);
        assert_eq!(emitter.counts().get(1), 2);
        assert_eq!(emitter.counts().total(), 3);
        assert_eq!(emitter.len(), 3);
    }

    #[test]
    fn test_record_uses_one_based_lane() {
        let event = CrossingEvent::new(7, 0, 11, 30.0);
        let record = event.record();
        assert_eq!(record.lane, 1);
        assert_eq!(record.vehicle_id, 7);
        assert_eq!(record.timestamp, "00:00:00");
    }
}
