//! Command line surface. Without input files the GUI starts; with files the batch runs
//! headless and reports on the terminal.

use crate::app::batch::{self, BatchJob, BatchOutcome, ConversionUpdate};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::{Path, PathBuf};

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONVERSION_FAILED: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

#[derive(Parser, Debug, Clone)]
#[command(name = "image_morph", version, about = "Convert images between formats")]
pub struct Cli {
    /// Images to convert. Launches the GUI when omitted.
    pub files: Vec<PathBuf>,

    /// Target format (png, jpg, webp, bmp, gif, or any other format the encoder knows)
    #[arg(short, long, default_value = "png")]
    pub format: String,

    /// Output directory [default: directory of the first input]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exact output path; only valid with a single input file
    #[arg(long, conflicts_with = "output")]
    pub output_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Turns parsed arguments into a job, or explains why they are invalid.
pub fn build_job(cli: &Cli) -> Result<BatchJob, String> {
    if cli.format.trim().is_empty() {
        return Err("output format must not be empty".to_string());
    }

    if let Some(output_file) = &cli.output_file {
        return match cli.files.as_slice() {
            [single] => Ok(BatchJob::single(single.clone(), cli.format.clone(), output_file)),
            _ => Err("--output-file requires exactly one input file".to_string()),
        };
    }

    let output_directory = match &cli.output {
        Some(dir) => dir.clone(),
        None => default_output_directory(&cli.files),
    };
    Ok(BatchJob::new(cli.files.clone(), cli.format.clone(), output_directory))
}

fn default_output_directory(files: &[PathBuf]) -> PathBuf {
    files
        .first()
        .and_then(|path| path.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Runs the batch on a worker thread and draws its progress. Returns the exit code.
pub fn run_headless(cli: &Cli) -> i32 {
    let job = match build_job(cli) {
        Ok(job) => job,
        Err(message) => {
            eprintln!("Error: {}", message);
            return EXIT_USAGE;
        }
    };

    let (receiver, handle) = match batch::spawn_batch(job) {
        Ok(spawned) => spawned,
        Err(e) => {
            eprintln!("Error: could not start conversion: {}", e);
            return EXIT_CONVERSION_FAILED;
        }
    };

    let pb = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("[{bar:40.green/white}] {pos:>3}% {msg}") {
        pb.set_style(style.progress_chars("##-"));
    }

    let mut outcome = None;
    for update in receiver {
        match update {
            ConversionUpdate::FileStarted(name, status) => pb.set_message(format!("{} {}", status, name)),
            ConversionUpdate::Progress(value) => pb.set_position(u64::from(value)),
            ConversionUpdate::Completed(result) => outcome = Some(result),
        }
    }
    pb.finish_and_clear();
    let _ = handle.join();

    match outcome {
        Some(outcome) => report(&outcome, cli.files.len()),
        None => {
            eprintln!("Error: conversion worker stopped unexpectedly");
            EXIT_CONVERSION_FAILED
        }
    }
}

fn report(outcome: &BatchOutcome, total: usize) -> i32 {
    if outcome.all_succeeded {
        println!("All {} image(s) converted successfully.", total);
        EXIT_OK
    } else {
        for error in &outcome.errors {
            eprintln!("{}", error);
        }
        eprintln!(
            "Conversion completed with errors: {} of {} failed.",
            outcome.errors.len(),
            total
        );
        EXIT_CONVERSION_FAILED
    }
}
