//! Sequential batch conversion with per-file notifications

use crate::app::image_processing::{self, ConversionRequest};
use crate::utils::get_memory_usage;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionUpdate {
    FileStarted(String, String), // (display name, status)
    Progress(u8),                // percent complete, 0..=100
    Completed(BatchOutcome),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
    pub all_succeeded: bool,
    pub errors: Vec<String>,
}

impl Default for BatchOutcome {
    fn default() -> Self {
        Self {
            all_succeeded: true,
            errors: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BatchJob {
    pub files: Vec<PathBuf>,
    pub output_format: String,
    pub output_directory: PathBuf,
    /// Exact file name to write, honored only when the job holds a single file.
    pub output_file_name: Option<String>,
}

impl BatchJob {
    pub fn new(files: Vec<PathBuf>, output_format: impl Into<String>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            files,
            output_format: output_format.into(),
            output_directory: output_directory.into(),
            output_file_name: None,
        }
    }

    /// A one-file job that writes to exactly `output_path`.
    pub fn single(input: PathBuf, output_format: impl Into<String>, output_path: &Path) -> Self {
        let output_directory = output_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut job = Self::new(vec![input], output_format, output_directory);
        job.output_file_name = output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        job
    }

    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        match &self.output_file_name {
            Some(name) if self.files.len() == 1 => self.output_directory.join(name),
            _ => self.output_directory.join(output_file_name(input, &self.output_format)),
        }
    }
}

/// `<input stem>.<lower-cased format>`.
pub fn output_file_name(input: &Path, output_format: &str) -> String {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    format!("{}.{}", stem, output_format.trim().to_lowercase())
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Rounded half up; `completed == total` always gives 100.
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (completed.min(total) * 100 + total / 2) / total;
    percent as u8
}

/// Converts every file of `job` in order, reporting on `sender`.
///
/// A failed file never stops the batch. An empty job returns at once without sending
/// anything. Send errors are ignored so the batch still finishes if the receiver is gone.
pub fn run_batch(job: &BatchJob, sender: &Sender<ConversionUpdate>) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    let total_files = job.files.len();
    if total_files == 0 {
        log::info!("No input files selected");
        return outcome;
    }

    log::info!(
        "Converting {} file(s) to {} into {}",
        total_files,
        job.output_format,
        job.output_directory.display()
    );
    log::debug!("{}", get_memory_usage());
    let start_time = Instant::now();

    for (index, input_path) in job.files.iter().enumerate() {
        let name = display_name(input_path);
        let status = format!("Converting {}/{}...", index + 1, total_files);
        let _ = sender.send(ConversionUpdate::FileStarted(name.clone(), status));

        let request = ConversionRequest::new(
            input_path.clone(),
            job.output_format.clone(),
            job.output_path_for(input_path),
        );
        let result = image_processing::convert(&request);
        if result.succeeded {
            log::info!("{}", result.message);
        } else {
            log::warn!("Failed to convert {}: {}", name, result.message);
            outcome.all_succeeded = false;
            outcome
                .errors
                .push(format!("Failed to convert {}: {}", name, result.message));
        }

        let _ = sender.send(ConversionUpdate::Progress(progress_percent(index + 1, total_files)));
    }

    log::info!(
        "Conversion finished in {:?}: {} of {} succeeded",
        start_time.elapsed(),
        total_files - outcome.errors.len(),
        total_files
    );
    log::debug!("{}", get_memory_usage());
    outcome
}

/// Runs `job` on a background thread. The receiver yields the file and progress
/// updates in input order, then a single `Completed`.
pub fn spawn_batch(job: BatchJob) -> io::Result<(Receiver<ConversionUpdate>, JoinHandle<()>)> {
    let (sender, receiver) = channel();
    let handle = thread::Builder::new()
        .name("conversion-worker".to_string())
        .spawn(move || {
            let outcome = run_batch(&job, &sender);
            let _ = sender.send(ConversionUpdate::Completed(outcome));
        })?;
    Ok((receiver, handle))
}
