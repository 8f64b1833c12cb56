//! CSV run log of per-tick frame statistics.

use crate::error::{SimError, SimResult};
use crate::stats::FrameStats;
use chrono::Utc;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct RunRecord<'a> {
    date: &'a str,
    seed: u64,
    tick: u64,
    bodies: usize,
    emitted: usize,
    composited: usize,
    out_of_frame: usize,
    escaped: usize,
    evicted: usize,
    active: usize,
    lit_pixels: usize,
    total_energy: f64,
}

pub struct RunRecorder<W: Write> {
    wtr: csv::Writer<W>,
    date: String,
    seed: u64,
}

impl RunRecorder<File> {
    pub fn create<P: AsRef<Path>>(path: P, seed: u64) -> SimResult<Self> {
        Ok(Self::from_writer(File::create(path)?, seed))
    }
}

impl<W: Write> RunRecorder<W> {
    pub fn from_writer(writer: W, seed: u64) -> Self {
        Self {
            wtr: csv::WriterBuilder::new().has_headers(true).from_writer(writer),
            date: Utc::now().to_rfc3339(),
            seed,
        }
    }

    pub fn record(&mut self, stats: &FrameStats) -> SimResult<()> {
        self.wtr.serialize(RunRecord {
            date: &self.date,
            seed: self.seed,
            tick: stats.tick,
            bodies: stats.bodies,
            emitted: stats.emitted,
            composited: stats.composited,
            out_of_frame: stats.out_of_frame,
            escaped: stats.escaped,
            evicted: stats.evicted,
            active: stats.active,
            lit_pixels: stats.lit_pixels,
            total_energy: stats.total_energy,
        })?;
        Ok(())
    }

    pub fn finish(mut self) -> SimResult<W> {
        self.wtr.flush()?;
        self.wtr
            .into_inner()
            .map_err(|e| SimError::Io(e.into_error()))
    }
}
