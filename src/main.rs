//! Entry point: GUI without arguments, headless batch with input files

use clap::Parser;
use eframe::NativeOptions;
use image_morph::app::{App, APP_NAME};
use image_morph::cli::{self, Cli};
use image_morph::utils;

fn main() {
    let args = Cli::parse();
    utils::setup_logging(&args.log_level);

    if args.files.is_empty() {
        launch_gui();
    } else {
        std::process::exit(cli::run_headless(&args));
    }
}

fn launch_gui() {
    let native_options = NativeOptions {
        initial_window_size: Some(egui::Vec2::new(600.0, 480.0)),
        resizable: true,
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|_cc| Box::new(App::default())),
    );
}
