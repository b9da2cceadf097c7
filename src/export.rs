// src/export.rs
//! JSON persistence for recordings
//!
//! Time series are written as a list of numbers, `null` or lists (one per
//! tick); frames as a list of pixel lists. Absent values become `null`.

use crate::error::{LedError, LedResult};
use crate::models::Frame;
use crate::simulation::{Recording, Sample};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

fn write_json<T: serde::Serialize + ?Sized>(value: &T, path: &Path) -> LedResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value).map_err(|e| LedError::Io(e.into()))?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> LedResult<T> {
    if !path.is_file() {
        return Err(LedError::NotFound(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| LedError::Parse {
        source_name: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Write the recorded time series
pub fn save_time_series<P: AsRef<Path>>(recording: &Recording, path: P) -> LedResult<()> {
    let path = path.as_ref();
    write_json(recording.time_series(), path)?;
    debug!(path = %path.display(), entries = recording.len(), "time series saved");
    Ok(())
}

/// Write the recorded frame sequence
pub fn save_frames<P: AsRef<Path>>(recording: &Recording, path: P) -> LedResult<()> {
    let path = path.as_ref();
    write_json(recording.frames(), path)?;
    debug!(path = %path.display(), entries = recording.len(), "frames saved");
    Ok(())
}

/// Write both parts of a recording
pub fn save_recording<P: AsRef<Path>, Q: AsRef<Path>>(
    recording: &Recording,
    time_series_path: P,
    frames_path: Q,
) -> LedResult<()> {
    save_time_series(recording, time_series_path)?;
    save_frames(recording, frames_path)
}

/// Read a time series written by [`save_time_series`]
pub fn load_time_series<P: AsRef<Path>>(path: P) -> LedResult<Vec<Sample>> {
    read_json(path.as_ref())
}

/// Read frames written by [`save_frames`]
pub fn load_frames<P: AsRef<Path>>(path: P) -> LedResult<Vec<Frame>> {
    read_json(path.as_ref())
}

/// Read a recording saved with [`save_recording`]
pub fn load_recording<P: AsRef<Path>, Q: AsRef<Path>>(time_series_path: P, frames_path: Q) -> LedResult<Recording> {
    Recording::from_parts(load_time_series(time_series_path)?, load_frames(frames_path)?)
}
