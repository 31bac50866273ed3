//! ImageMorph: convert images between encoded formats, one file or a whole batch.
//!
//! The conversion core lives in [`app::image_processing`] and [`app::batch`]; the egui
//! front end in [`app`] and the headless command line in [`cli`] both drive it.

pub mod app;
pub mod cli;
pub mod error;
pub mod utils;

pub use app::batch::{run_batch, spawn_batch, BatchJob, BatchOutcome, ConversionUpdate};
pub use app::image_processing::{convert_image, ConversionRequest, ConversionResult};
pub use error::ConversionError;
