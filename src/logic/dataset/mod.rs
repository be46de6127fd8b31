//! Dataset Module - CSV exports in, typed records out
//!
//! Alert exports and attack run logs are read into a [`table::RawTable`], cleaned by
//! the preprocessing step and turned into typed [`Event`] / [`AttackInterval`]
//! records. Results go back out as CSV or JSONL.

pub mod record;
pub mod table;
pub mod timestamp;
pub mod reader;
pub mod writer;
pub mod export;

#[cfg(test)]
mod tests;

pub use record::{AttackInterval, Event, WindowAggregate};
