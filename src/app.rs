//! GUI application state and the frame loop that follows the conversion worker

pub mod batch;
pub mod file_dialogs;
pub mod formats;
pub mod gui;
pub mod image_processing;

use crate::utils::Logger;
use eframe::egui;
use eframe::App as EframeApp;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

pub use batch::{BatchJob, BatchOutcome, ConversionUpdate};

pub const APP_NAME: &str = "ImageMorph Pro";

pub struct App {
    // Application state
    pub input_files: Vec<PathBuf>,
    pub output_format: String,
    pub status: String,
    pub progress: Option<u8>,
    pub single_output_path: Option<PathBuf>,
    pub dialog: Option<Dialog>,
    pub show_about: bool,
    pub log_messages: Arc<Mutex<Vec<String>>>,
    pub logger: Logger,
    pub conversion_receiver: Option<Receiver<ConversionUpdate>>,
}

/// A modal message box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

impl Default for App {
    fn default() -> Self {
        let log_messages = Arc::new(Mutex::new(Vec::new()));
        Self {
            input_files: Vec::new(),
            output_format: formats::UI_FORMATS[0].to_string(),
            status: "Ready".to_string(),
            progress: None,
            single_output_path: None,
            dialog: None,
            show_about: false,
            logger: Logger::new(log_messages.clone()),
            log_messages,
            conversion_receiver: None,
        }
    }
}

impl App {
    pub fn is_busy(&self) -> bool {
        self.conversion_receiver.is_some()
    }

    /// Text for the read-only selection field.
    pub fn selection_label(&self) -> String {
        match self.input_files.as_slice() {
            [] => "No files selected...".to_string(),
            [single] => single.display().to_string(),
            files => format!("{} files selected", files.len()),
        }
    }

    pub fn set_selection(&mut self, files: Vec<PathBuf>) {
        self.input_files = files;
        self.status = match self.input_files.as_slice() {
            [] => "Ready".to_string(),
            [single] => format!("Selected: {}", batch::display_name(single)),
            files => format!("{} files selected for conversion.", files.len()),
        };
        if !self.input_files.is_empty() {
            self.logger.log(self.status.clone());
        }
    }

    /// Applies one worker message. Returns true once the batch has completed.
    pub fn apply_update(&mut self, update: ConversionUpdate) -> bool {
        match update {
            ConversionUpdate::FileStarted(name, status) => {
                self.status = format!("{} {}", status, name);
                self.logger.log(self.status.clone());
                false
            }
            ConversionUpdate::Progress(value) => {
                self.progress = Some(value);
                false
            }
            ConversionUpdate::Completed(outcome) => {
                self.conversion_complete(outcome);
                true
            }
        }
    }

    /// Drains pending worker messages. Returns true once the batch is over, either
    /// because it completed or because the worker went away without finishing.
    pub fn poll_worker(&mut self) -> bool {
        let Some(receiver) = self.conversion_receiver.take() else {
            return false;
        };
        loop {
            match receiver.try_recv() {
                Ok(update) => {
                    if self.apply_update(update) {
                        return true;
                    }
                }
                Err(TryRecvError::Empty) => {
                    self.conversion_receiver = Some(receiver);
                    return false;
                }
                Err(TryRecvError::Disconnected) => {
                    self.worker_lost();
                    return true;
                }
            }
        }
    }

    fn worker_lost(&mut self) {
        self.progress = None;
        self.single_output_path = None;
        self.status = "Conversion stopped unexpectedly.".to_string();
        self.logger.log("Error: conversion worker stopped before finishing".to_string());
        self.dialog = Some(Dialog {
            title: "Conversion Errors".to_string(),
            message: "The conversion stopped before every file was processed.".to_string(),
            is_error: true,
        });
    }

    fn conversion_complete(&mut self, outcome: BatchOutcome) {
        self.progress = None;
        let single_output_path = self.single_output_path.take();

        if outcome.all_succeeded {
            let message = match single_output_path {
                Some(path) => format!("Successfully converted.\nSaved to: {}", path.display()),
                None => "All selected images converted successfully!".to_string(),
            };
            self.logger.log("Conversion complete!".to_string());
            self.status = "Ready".to_string();
            self.dialog = Some(Dialog {
                title: "Success".to_string(),
                message,
                is_error: false,
            });
        } else {
            for error in &outcome.errors {
                self.logger.log(error.clone());
            }
            self.status = "Conversion completed with errors.".to_string();
            self.dialog = Some(Dialog {
                title: "Conversion Errors".to_string(),
                message: outcome.errors.join("\n"),
                is_error: true,
            });
        }
    }
}

impl EframeApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let completed = self.poll_worker();

        // Render the GUI
        gui::render(self, ctx);

        // Keep polling the worker while a batch is running
        if self.is_busy() || completed {
            ctx.request_repaint();
        }
    }
}
