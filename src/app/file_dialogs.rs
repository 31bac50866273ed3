//! Native file dialogs

use rfd::FileDialog;
use std::path::PathBuf;

pub fn select_images() -> Option<Vec<PathBuf>> {
    FileDialog::new()
        .set_title("Select Image(s)")
        .add_filter("Image Files", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
        .pick_files()
}

pub fn select_output_directory() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select Destination Folder")
        .pick_folder()
}

/// Save-as dialog prefilled with `suggested_name`, filtered to `output_format`.
pub fn select_save_path(suggested_name: &str, output_format: &str) -> Option<PathBuf> {
    let extension = output_format.to_lowercase();
    let filter_name = format!("{} Files", output_format);
    FileDialog::new()
        .set_title("Save As")
        .set_file_name(suggested_name)
        .add_filter(&filter_name, &[extension.as_str()])
        .save_file()
}
