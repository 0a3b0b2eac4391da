//! Staged-object formats, key scheme and the object sink seam.

mod staging_encoder;
mod staging_model;
mod staging_traits;

pub use staging_encoder::{encode_csv, fundamentals_object_key, stock_object_key};
pub use staging_model::{DailyBar, FundamentalsRecord};
pub use staging_traits::ObjectSink;
