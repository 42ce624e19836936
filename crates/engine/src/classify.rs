//! Derived classification fields: crew role group and over-limit status.

use crate::model::{Cell, HourStatus, RankGroup};

/// COCKPIT for pilot-type ranks, CABIN for everything else. Matching is
/// case- and whitespace-insensitive on both sides.
pub fn rank_group(raw: &Cell, cockpit_ranks: &[String]) -> RankGroup {
    let rank = raw.canonical().trim().to_uppercase();
    if cockpit_ranks
        .iter()
        .any(|r| r.trim().to_uppercase() == rank)
    {
        RankGroup::Cockpit
    } else {
        RankGroup::Cabin
    }
}

/// OVER strictly above the threshold; exactly at the threshold is OTHER.
pub fn hour_status(hours: f64, threshold: f64) -> HourStatus {
    if hours > threshold {
        HourStatus::Over
    } else {
        HourStatus::Other
    }
}
