// src/analysis/mod.rs
pub mod stats;
pub mod aggregate;
pub mod individual;
pub mod ranking;
pub mod roster;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use stats::Moments;
pub use aggregate::{
    completion_rate,
    group_by_class,
    group_by_gender,
    histogram,
    mean_and_std_dev,
    BucketSpec,
    ClassAggregate,
    GenderAggregate,
    HistogramBucket,
};
pub use individual::{
    evaluate_individual,
    Assessment,
    CurvePoint,
    IndividualEvaluation,
    PerformanceSummary,
    PerformanceTier,
    TimeComparison,
};
pub use ranking::{evaluate_ranking, RankingPosition};
pub use roster::{ClassFilter, GenderCounts, CategoryLeaders};
