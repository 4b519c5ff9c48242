//! Adjustment parameters and the edits that produce new snapshots.

pub mod edit;
pub mod params;
