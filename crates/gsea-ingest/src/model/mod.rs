//! In-memory objects produced by the parsers and consumed by collapsing

pub mod chip;
pub mod dataset;
pub mod gene_set;
pub mod matrix;
pub mod ranked_list;
pub mod report;
pub mod string_dataframe;

pub use chip::{symbolize, Chip, NullSymbolMode, Probe, ProbeAnnotation};
pub use dataset::Dataset;
pub use gene_set::{GeneSet, GeneSetMatrix};
pub use matrix::Matrix;
pub use ranked_list::RankedList;
pub use report::Report;
pub use string_dataframe::StringDataframe;
