//! Data models for rowlabel.

mod label;
mod record;

pub use label::{Label, LabelSet, LabelingOptions};
pub use record::Record;
