//! Converting a single image to another encoded format

use crate::app::formats;
use crate::error::ConversionError;
use crate::utils::measure_time;
use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageFormat};
use std::any::Any;
use std::fs::{self, File};
use std::io::{self, Cursor, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// Quality used for lossy WebP output.
const WEBP_QUALITY: f32 = 80.0;

/// One file to convert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionRequest {
    pub input_path: PathBuf,
    pub output_format: String,
    pub output_path: PathBuf,
}

/// Outcome of a single conversion, as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionResult {
    pub succeeded: bool,
    pub message: String,
}

impl ConversionResult {
    pub fn success(message: String) -> Self {
        Self { succeeded: true, message }
    }

    pub fn failure(message: String) -> Self {
        Self { succeeded: false, message }
    }
}

impl ConversionRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_format: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_format: output_format.into(),
            output_path: output_path.into(),
        }
    }

    /// Converts the file and returns the written path, or the reason it failed.
    pub fn execute(&self) -> Result<PathBuf, ConversionError> {
        ensure_parent_dir(&self.output_path)?;

        let (img, load_duration) = measure_time(|| load_image(&self.input_path));
        let img = img?;
        log::debug!("Loading {} took {:?}", self.input_path.display(), load_duration);

        let format = formats::resolve(&self.output_format)
            .ok_or_else(|| ConversionError::unsupported_format(&self.output_format))?;
        let img = formats::normalize_for(format, img);

        let (encoded, encode_duration) = measure_time(|| self.encode(&img, format));
        let encoded = encoded?;
        log::debug!("Encoding to {:?} took {:?}", format, encode_duration);

        save_encoded(&encoded, &self.output_path)?;
        Ok(self.output_path.clone())
    }

    fn encode(&self, img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ConversionError> {
        if format == ImageFormat::WebP {
            return encode_to_webp(img, WEBP_QUALITY);
        }
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format).map_err(|e| {
            ConversionError::from_encode(&self.output_format, &self.output_path, e)
        })?;
        Ok(buffer.into_inner())
    }

    fn success_message(&self) -> String {
        format!(
            "Successfully converted '{}' to '{}'",
            base_name(&self.input_path),
            base_name(&self.output_path)
        )
    }
}

/// Converts `input_path` to `output_format` at `output_path`.
///
/// Never fails: every error, including a panic inside a codec, comes back as an
/// unsuccessful [`ConversionResult`].
pub fn convert_image(input_path: &Path, output_format: &str, output_path: &Path) -> ConversionResult {
    let request = ConversionRequest::new(input_path, output_format, output_path);
    convert(&request)
}

pub fn convert(request: &ConversionRequest) -> ConversionResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| request.execute()))
        .unwrap_or_else(|payload| Err(ConversionError::unclassified(panic_detail(payload))));

    match outcome {
        Ok(_) => ConversionResult::success(request.success_message()),
        Err(e) => ConversionResult::failure(e.to_string()),
    }
}

fn ensure_parent_dir(output_path: &Path) -> Result<(), ConversionError> {
    match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir).map_err(|e| ConversionError::write_failure(dir, e))
        }
        _ => Ok(()),
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, ConversionError> {
    if !path.is_file() {
        return Err(ConversionError::missing_input(
            path,
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        ));
    }
    let reader = ImageReader::open(path).map_err(|e| ConversionError::missing_input(path, e))?;
    // Sniff the container from content; the extension may lie.
    let reader = reader
        .with_guessed_format()
        .map_err(|e| ConversionError::unreadable_input(path, e.into()))?;
    reader
        .decode()
        .map_err(|e| ConversionError::unreadable_input(path, e))
}

fn encode_to_webp(img: &DynamicImage, quality: f32) -> Result<Vec<u8>, ConversionError> {
    let encoder = webp::Encoder::from_image(img).map_err(ConversionError::unclassified)?;
    let webp = encoder.encode(quality);
    Ok(webp.to_vec())
}

fn save_encoded(data: &[u8], output_path: &Path) -> Result<(), ConversionError> {
    let write = || -> io::Result<()> {
        let mut file = File::create(output_path)?;
        file.write_all(data)?;
        file.flush()
    };
    write().map_err(|e| ConversionError::write_failure(output_path, e))
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn panic_detail(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "codec panicked".to_string()
    }
}
