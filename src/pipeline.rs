use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// BMP image to hex text
    Encode,
    /// Hex text to BMP image
    Decode,
}

/// Timing information for a single pipeline stage
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Summary of a completed conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub direction: Direction,
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Bytes written (encode) or consumed (decode)
    pub bytes: usize,
    pub total_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// Runs named stages in order and records how long each took
pub struct Pipeline {
    direction: Direction,
    start: Instant,
    steps: Vec<StepTiming>,
}

impl Pipeline {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            start: Instant::now(),
            steps: Vec::new(),
        }
    }

    pub fn run_step<T, F>(&mut self, name: &str, step_fn: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let step_start = Instant::now();
        let result = step_fn()?;
        let time_ms = step_start.elapsed().as_millis() as u64;
        tracing::debug!("Stage {} finished in {}ms", name, time_ms);
        self.steps.push(StepTiming {
            name: name.to_string(),
            time_ms,
        });
        Ok(result)
    }

    pub fn finish(
        self,
        input: &Path,
        output: &Path,
        (width, height): (u32, u32),
        bytes: usize,
    ) -> ConversionReport {
        ConversionReport {
            direction: self.direction,
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width,
            height,
            bytes,
            total_time_ms: self.start.elapsed().as_millis() as u64,
            steps: self.steps,
        }
    }
}
