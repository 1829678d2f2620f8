//! End-to-end run: decode, grayscale, median, Laplacian.
//!
//! Each stage writes its result before the next one starts. A failure stops
//! the run but leaves files from completed stages on disk.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local, TimeZone};
use tracing::info;

use crate::codec::{decode, encode};
use crate::config::RunConfig;
use crate::error::Result;
use crate::filters::Filter;
use crate::grid::PixelGrid;
use crate::naming::timestamped_name_at;

const OUTPUT_EXTENSION: &str = "bmp";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Grayscale,
    Median,
    Laplacian,
}

impl Stage {
    pub fn base_name(&self) -> &'static str {
        match self {
            Stage::Grayscale => "grayscale",
            Stage::Median => "median",
            Stage::Laplacian => "laplacian",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageOutput {
    pub stage: Stage,
    pub filter: Option<Filter>,
    pub path: PathBuf,
}

pub struct Pipeline {
    config: RunConfig,
}

impl Pipeline {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Run every stage, stamping output names with the local time.
    pub fn run(&self, on_stage: impl FnMut(&StageOutput)) -> Result<Vec<StageOutput>> {
        self.run_at(&Local::now(), on_stage)
    }

    /// Run every stage with output names stamped at `at`.
    ///
    /// `on_stage` is called after each stage's file has been written.
    pub fn run_at<Tz>(
        &self,
        at: &DateTime<Tz>,
        mut on_stage: impl FnMut(&StageOutput),
    ) -> Result<Vec<StageOutput>>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let executor = self.config.executor()?;
        let median = Filter::median(self.config.mask_size);
        let laplacian = Filter::laplacian();
        median.validate()?;

        info!(path = %self.config.image_path.display(), "loading image");
        let gray = decode(&self.config.image_path)?;
        info!(width = gray.width(), height = gray.height(), "converted to grayscale");

        let mut outputs = Vec::with_capacity(3);
        let mut emit = |stage: Stage, filter: Option<Filter>, grid: &PixelGrid| -> Result<()> {
            let name = timestamped_name_at(stage.base_name(), OUTPUT_EXTENSION, at);
            let path = self.config.output_dir.join(name);
            encode(&path, grid)?;
            info!(%stage, path = %path.display(), "stage written");
            let output = StageOutput { stage, filter, path };
            on_stage(&output);
            outputs.push(output);
            Ok(())
        };

        emit(Stage::Grayscale, None, &gray)?;

        let smoothed = executor.apply(&gray, median)?;
        drop(gray);
        emit(Stage::Median, Some(median), &smoothed)?;

        let edges = executor.apply(&smoothed, laplacian)?;
        emit(Stage::Laplacian, Some(laplacian), &edges)?;

        Ok(outputs)
    }
}
