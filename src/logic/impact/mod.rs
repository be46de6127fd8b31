//! Impact Module - what each signature contributes to attack detection
//!
//! - `calculator` - per-signature removal simulation
//! - `summary` - correlation and spread of the resulting metrics

pub mod calculator;
pub mod summary;


pub use calculator::{attack_signatures, signature_impact, signature_stats, SignatureImpact};
