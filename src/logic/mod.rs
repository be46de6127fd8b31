//! Logic Module - analysis engines
//!
//! ## Pipeline
//! - `dataset/` - CSV in/out, typed records
//! - `preprocess/` - cleaning, encoders, scaler
//! - `labeler` - attack/benign labels from the run log
//! - `patterns/` - attack-only signature sequences
//! - `windows` - per-attack aggregates
//! - `impact/` - signature removal impact
//! - `analyzer/` - severity band analyses

pub mod config;

pub mod dataset;
pub mod preprocess;
pub mod labeler;
pub mod patterns;
pub mod windows;
pub mod impact;
pub mod analyzer;
