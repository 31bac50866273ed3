//! egui view of the converter window

use crate::app::batch::{self, BatchJob};
use crate::app::file_dialogs;
use crate::app::formats::UI_FORMATS;
use crate::app::{App, APP_NAME};
use egui::{Color32, Frame, ProgressBar, Rounding, Stroke, RichText};

const ACCENT: Color32 = Color32::from_rgb(76, 175, 80);

pub fn render(app: &mut App, ctx: &egui::Context) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    app.show_about = true;
                    ui.close_menu();
                }
            });
        });
    });

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.label(app.status.as_str());
    });

    let frame = Frame {
        fill: Color32::from_rgb(43, 43, 43),
        rounding: Rounding::same(10.0),
        stroke: Stroke::new(1.0, Color32::from_rgb(85, 85, 85)),
        inner_margin: egui::style::Margin::same(20.0),
        ..Default::default()
    };

    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(APP_NAME).size(24.0).strong().color(Color32::from_rgb(240, 240, 240)));
        });
        ui.add_space(15.0);

        let idle = !app.is_busy();

        // File selection
        ui.horizontal(|ui| {
            ui.group(|ui| {
                ui.set_width(ui.available_width() - 110.0);
                ui.label(app.selection_label());
            });
            if ui.add_enabled(idle, egui::Button::new("Browse...")).clicked() {
                match file_dialogs::select_images() {
                    Some(files) => app.set_selection(files),
                    None => app.set_selection(Vec::new()),
                }
            }
        });
        ui.add_space(15.0);

        // Format selection and conversion
        ui.horizontal(|ui| {
            ui.add_enabled_ui(idle, |ui| {
                egui::ComboBox::from_id_source("output_format")
                    .width(150.0)
                    .selected_text(app.output_format.as_str())
                    .show_ui(ui, |ui| {
                        for format in UI_FORMATS {
                            ui.selectable_value(&mut app.output_format, format.to_string(), format);
                        }
                    });
            });
            let convert = egui::Button::new(RichText::new("Convert").color(Color32::WHITE)).fill(ACCENT);
            if ui.add_enabled(idle, convert).clicked() {
                start_conversion(app);
            }
        });
        ui.add_space(15.0);

        if let Some(value) = app.progress {
            ui.add(ProgressBar::new(f32::from(value) / 100.0).text(format!("{}%", value)));
            ui.add_space(10.0);
        }

        // Conversion Log
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new("Conversion Log").size(16.0).color(ACCENT));
            egui::ScrollArea::vertical()
                .max_height(200.0)
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                let logs = app.log_messages.lock();
                for log in logs.iter() {
                    if log.contains("Failed") || log.contains("Error") {
                        ui.label(RichText::new(log.as_str()).color(Color32::RED));
                    } else {
                        ui.label(log.as_str());
                    }
                }
            });
        });
    });

    render_dialogs(app, ctx);
}

fn render_dialogs(app: &mut App, ctx: &egui::Context) {
    let mut close = false;
    if let Some(dialog) = &app.dialog {
        egui::Window::new(dialog.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let color = if dialog.is_error { Color32::RED } else { Color32::from_rgb(240, 240, 240) };
                ui.label(RichText::new(dialog.message.as_str()).color(color));
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
    }
    if close {
        app.dialog = None;
    }

    let mut show_about = app.show_about;
    egui::Window::new(format!("About {}", APP_NAME))
        .open(&mut show_about)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("{}\nVersion {}", APP_NAME, env!("CARGO_PKG_VERSION")));
        });
    app.show_about = show_about;
}

fn start_conversion(app: &mut App) {
    let Some(first) = app.input_files.first().cloned() else {
        app.status = "Error: Please select at least one input file first.".to_string();
        return;
    };
    let output_format = app.output_format.clone();

    let job = if app.input_files.len() == 1 {
        let suggested = batch::output_file_name(&first, &output_format);
        match file_dialogs::select_save_path(&suggested, &output_format) {
            Some(output_path) => {
                app.single_output_path = Some(output_path.clone());
                BatchJob::single(first, output_format, &output_path)
            }
            None => {
                app.status = "Conversion cancelled.".to_string();
                return;
            }
        }
    } else {
        match file_dialogs::select_output_directory() {
            Some(folder) => BatchJob::new(app.input_files.clone(), output_format, folder),
            None => {
                app.status = "Conversion cancelled.".to_string();
                return;
            }
        }
    };

    app.status = if job.files.len() == 1 {
        "Converting...".to_string()
    } else {
        format!("Converting {} images...", job.files.len())
    };
    app.logger.log(format!("Starting conversion to {}...", job.output_format));

    match batch::spawn_batch(job) {
        Ok((receiver, _handle)) => {
            app.progress = Some(0);
            app.conversion_receiver = Some(receiver);
        }
        Err(e) => {
            app.single_output_path = None;
            app.status = format!("Error: Could not start conversion: {}", e);
            app.logger.log(app.status.clone());
        }
    }
}
