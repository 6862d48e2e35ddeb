// CSV report of all workouts

use crate::models::WorkoutRecord;
use chrono::NaiveDate;
use eyre::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const HEADER: [&str; 8] = [
    "Date",
    "Exercise",
    "Muscle",
    "Sets",
    "Reps",
    "Weight (kg)",
    "Volume",
    "Progressive",
];

/// Write one row per record, in the order given
pub fn write_csv(writer: impl Write, records: &[WorkoutRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for w in records {
        wtr.write_record([
            w.date.format("%Y-%m-%d").to_string(),
            w.exercise.clone(),
            w.muscle_group.to_string(),
            w.sets.to_string(),
            w.reps.to_string(),
            w.weight.to_string(),
            w.volume.to_string(),
            if w.is_progressive { "Yes" } else { "No" }.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[WorkoutRecord]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).context("CSV output was not UTF-8")
}

/// Export file name for a report produced on `today`
pub fn default_file_name(today: NaiveDate) -> String {
    format!("gym-workouts-{}.csv", today.format("%Y-%m-%d"))
}

pub fn save_csv(path: &Path, records: &[WorkoutRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(file, records)?;
    info!(file = ?path, count = records.len(), "Exported workouts");
    Ok(())
}
