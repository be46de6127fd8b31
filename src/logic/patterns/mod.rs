//! Patterns Module - signature sequences seen only during attacks
//!
//! - `runs` - label run segmentation and k-gram windows
//! - `table` - insertion-ordered frequency table
//! - `miner` - distinctive pattern selection

pub mod runs;
pub mod table;
pub mod miner;


pub use miner::mine;
