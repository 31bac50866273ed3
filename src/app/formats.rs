//! Output format names and the color modes each encoder accepts

use image::{ColorType, DynamicImage, ImageFormat};

/// Formats offered in the format picker.
pub const UI_FORMATS: [&str; 5] = ["PNG", "JPG", "WEBP", "BMP", "GIF"];

/// Identifiers that name the same encoder under another spelling.
const FORMAT_ALIASES: &[(&str, &str)] = &[("jpg", "jpeg"), ("tif", "tiff")];

/// Lower-cases an identifier and maps it through the alias table.
pub fn canonical_name(identifier: &str) -> String {
    let lower = identifier.trim().to_ascii_lowercase();
    FORMAT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(lower)
}

/// Resolves a user-supplied identifier to the backend format, if the backend knows it.
pub fn resolve(identifier: &str) -> Option<ImageFormat> {
    let canonical = canonical_name(identifier);
    if canonical.is_empty() {
        return None;
    }
    ImageFormat::from_extension(canonical)
}

/// Encoders that cannot store an alpha channel.
pub fn flattens_alpha(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Jpeg | ImageFormat::Bmp)
}

fn is_eight_bit(color: ColorType) -> bool {
    color.bytes_per_pixel() == color.channel_count()
}

fn into_rgb_or_rgba8(img: DynamicImage) -> DynamicImage {
    if img.color().has_alpha() {
        DynamicImage::ImageRgba8(img.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    }
}

/// Brings the decoded image into a color mode the target encoder accepts.
///
/// Alpha is dropped without compositing for JPEG and BMP. Palette sources are already
/// expanded to RGB(A) by the decoder, so they are covered by the same rule.
pub fn normalize_for(format: ImageFormat, img: DynamicImage) -> DynamicImage {
    let color = img.color();
    match format {
        ImageFormat::Jpeg | ImageFormat::Bmp => {
            if (flattens_alpha(format) && color.has_alpha()) || !is_eight_bit(color) {
                DynamicImage::ImageRgb8(img.to_rgb8())
            } else {
                img
            }
        }
        ImageFormat::Gif | ImageFormat::WebP | ImageFormat::Qoi => match color {
            ColorType::Rgb8 | ColorType::Rgba8 => img,
            _ => into_rgb_or_rgba8(img),
        },
        // No gray+alpha or float layouts in the TIFF encoder
        ImageFormat::Tiff => match color {
            ColorType::L8
            | ColorType::L16
            | ColorType::Rgb8
            | ColorType::Rgb16
            | ColorType::Rgba8
            | ColorType::Rgba16 => img,
            _ => into_rgb_or_rgba8(img),
        },
        ImageFormat::Farbfeld => match color {
            ColorType::Rgba16 => img,
            _ => DynamicImage::ImageRgba16(img.to_rgba16()),
        },
        ImageFormat::OpenExr => match color {
            ColorType::Rgb32F | ColorType::Rgba32F => img,
            _ if color.has_alpha() => DynamicImage::ImageRgba32F(img.to_rgba32f()),
            _ => DynamicImage::ImageRgb32F(img.to_rgb32f()),
        },
        _ => img,
    }
}
