//! Destinations for confirmed crossing events.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::counter::CrossingEvent;
use crate::error::Result;

/// Durable output for crossing events, written in emission order.
pub trait EventSink {
    fn write_event(&mut self, event: &CrossingEvent) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps events in memory.
impl EventSink for Vec<CrossingEvent> {
    fn write_event(&mut self, event: &CrossingEvent) -> Result<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// `VehicleID,Lane,Frame,Timestamp` rows with 1-based lane numbers.
pub struct CsvEventSink<W: Write> {
    writer: W,
    rows: usize,
}

impl<W: Write> CsvEventSink<W> {
    pub const HEADER: &'static str = "VehicleID,Lane,Frame,Timestamp";

    /// Wrap a writer and emit the header line.
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", Self::HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Number of rows written, excluding the header.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvEventSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> EventSink for CsvEventSink<W> {
    fn write_event(&mut self, event: &CrossingEvent) -> Result<()> {
        let record = event.record();
        writeln!(
            self.writer,
            "{},{},{},{}",
            record.vehicle_id, record.lane, record.frame, record.timestamp
        )?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One JSON object per line, same fields as the CSV output.
pub struct JsonLinesEventSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesEventSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesEventSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> EventSink for JsonLinesEventSink<W> {
    fn write_event(&mut self, event: &CrossingEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &event.record())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<CrossingEvent> {
        vec![
            CrossingEvent::new(7, 0, 11, 30.0),
            CrossingEvent::new(12, 2, 95, 30.0),
        ]
    }

    #[test]
    fn test_csv_sink() {
        let mut sink = CsvEventSink::new(Vec::new()).unwrap();
        for event in &events() {
            sink.write_event(event).unwrap();
        }
        sink.flush().unwrap();
        assert_eq!(sink.rows(), 2);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "VehicleID,Lane,Frame,Timestamp\n7,1,11,00:00:00\n12,3,95,00:00:03\n"
        );
    }

    #[test]
    fn test_csv_sink_header_only() {
        let sink = CsvEventSink::new(Vec::new()).unwrap();
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "VehicleID,Lane,Frame,Timestamp\n"
        );
    }

    #[test]
    fn test_json_lines_sink() {
        let mut sink = JsonLinesEventSink::new(Vec::new());
        for event in &events() {
            sink.write_event(event).unwrap();
        }

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["VehicleID"], 7);
        assert_eq!(first["Lane"], 1);
        assert_eq!(first["Frame"], 11);
        assert_eq!(first["Timestamp"], "00:00:00");
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<CrossingEvent> = Vec::new();
        sink.write_event(&events()[1]).unwrap();
        assert_eq!(sink, vec![events()[1].clone()]);
    }
}
