//! Batch transformations applied between parsing and writing.
//!
//! - [`RecordNormalizer`]: rewrites numbering-map text columns to JSON-style quoting
//! - [`MetadataStamper`]: broadcasts per-file metadata as constant columns

mod error;
mod normalize;
mod stamp;

pub use error::{Result, TransformError};
pub use normalize::{RecordNormalizer, normalize_json_text};
pub use stamp::MetadataStamper;
