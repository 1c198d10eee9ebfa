// src/analysis/ranking.rs
use serde::{Serialize, Deserialize};

use crate::error::StatsError;

/// Where a finisher sits by placing alone, independent of the time
/// distribution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankingPosition {
    pub rank: u32,
    pub total: u32,
    pub percentile: f64,
    pub top_percentile: f64,
    pub ahead: u32,
    pub behind: u32,
}

pub fn evaluate_ranking(rank: u32, total: u32) -> Result<RankingPosition, StatsError> {
    if total == 0 || rank == 0 || rank > total {
        return Err(StatsError::InvalidRank { rank, total });
    }

    let percentile = rank as f64 / total as f64 * 100.0;
    Ok(RankingPosition {
        rank,
        total,
        percentile,
        top_percentile: 100.0 - percentile,
        ahead: rank - 1,
        behind: total - rank,
    })
}
