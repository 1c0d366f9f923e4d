//! Placegen turns a CSV table of image sizes into placeholder raster images.
//!
//! Each data row of the input table names a target width, height, and output
//! format. For every valid row the pipeline produces an image of exactly that
//! size, labeled with its own filename and colored with a randomized,
//! mutually-contrasting foreground/background pair.
//!
//! # Pipeline overview
//!
//! 1. **Read**: CSV table -> ordered untyped rows (header discarded)
//! 2. **Validate**: untyped fields -> [`ValidatedRow`] or a list of defects
//! 3. **Color**: random foreground + background reflected through its max/min midpoint
//! 4. **Label**: SVG text rasterized into a premultiplied RGBA8 layer
//! 5. **Compose**: solid background canvas + alpha-over label, encoded and written
//!
//! Rows run as independent worker tasks joined at the end of the batch; a
//! defect or rendering failure in one row never affects another. See
//! [`run_batch`] for the batch-level contract.
#![forbid(unsafe_code)]

mod canvas;
mod color;
mod foundation;
mod label;
mod table;

pub mod batch;

pub use batch::{BatchConfig, BatchOutcome, RowOutcome, run_batch};
pub use canvas::composite::{PremulRgba8, over, over_canvas};
pub use canvas::encode::{GeneratedImage, compose, write_image};
pub use color::{ColorPair, Rgb, contrast_pair};
pub use foundation::error::{PlacegenError, PlacegenResult};
pub use label::{LabelLayer, render_label, system_fontdb};
pub use table::csv::read_rows;
pub use table::row::{ImageFormat, RawRow, ValidatedRow, validate_row};
