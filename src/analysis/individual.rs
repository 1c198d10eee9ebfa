// src/analysis/individual.rs
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::config::{ClassSlot, ParticipantRecord};
use crate::error::StatsError;
use crate::utils::find_participant;
use super::aggregate::{completed_times_minutes, mean_and_std_dev};
use super::ranking::{evaluate_ranking, RankingPosition};
use super::stats::{normal_pdf, z_score, z_score_to_percentile, Moments};

const CURVE_PADDING: f64 = 0.2;
const NARROW_SPAN_MINUTES: f64 = 30.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PerformanceTier {
    Exceptional,
    VeryGood,
    AboveAverage,
    BelowAverage,
    NeedsImprovement,
}

impl PerformanceTier {
    /// Lower z is faster. Each band includes its upper bound.
    pub fn from_z_score(z: f64) -> Self {
        if z <= -2.0 {
            PerformanceTier::Exceptional
        } else if z <= -1.0 {
            PerformanceTier::VeryGood
        } else if z <= 0.0 {
            PerformanceTier::AboveAverage
        } else if z <= 1.0 {
            PerformanceTier::BelowAverage
        } else {
            PerformanceTier::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::Exceptional => "Exceptional",
            PerformanceTier::VeryGood => "Very good",
            PerformanceTier::AboveAverage => "Above average",
            PerformanceTier::BelowAverage => "Below average",
            PerformanceTier::NeedsImprovement => "Needs improvement",
        }
    }

    pub fn insight(&self) -> &'static str {
        match self {
            PerformanceTier::Exceptional => "Among the top 2.3% of all participants. Exceptional performance!",
            PerformanceTier::VeryGood => "Among the top 16% of all participants. Very good performance!",
            PerformanceTier::AboveAverage => "In the upper half of all participants. Good work.",
            PerformanceTier::BelowAverage => "In the lower half of all participants. There is room to improve.",
            PerformanceTier::NeedsImprovement => "Among the bottom 16% of all participants. Focus on improving.",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSummary {
    pub z_score: f64,
    /// Share of the fitted population this time beats, 0..=100.
    pub percentile: f64,
    pub tier: PerformanceTier,
    /// Set when the population has zero spread and the neutral convention
    /// (z = 0, percentile 50) was applied.
    pub degenerate_variance: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Assessment {
    Completed(PerformanceSummary),
    NotCompleted { last_workout_reached: Option<String> },
}

impl Assessment {
    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Completed(summary) => summary.tier.label(),
            Assessment::NotCompleted { .. } => "Not completed",
        }
    }

    pub fn summary(&self) -> Option<&PerformanceSummary> {
        match self {
            Assessment::Completed(summary) => Some(summary),
            Assessment::NotCompleted { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
    pub is_highlighted: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeComparison {
    pub participant_minutes: f64,
    pub mean_minutes: f64,
    pub best_minutes: f64,
    pub gap_to_leader_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndividualEvaluation {
    pub name: String,
    pub class_slot: ClassSlot,
    pub time_minutes: Option<f64>,
    /// Moments of all finishers; None when nobody finished.
    pub population: Option<Moments>,
    pub assessment: Assessment,
    pub ranking: Option<RankingPosition>,
    pub comparison: Option<TimeComparison>,
    pub curve: Vec<CurvePoint>,
}

pub fn evaluate_individual(records: &[ParticipantRecord], name: &str) -> Result<IndividualEvaluation, StatsError> {
    let record = find_participant(records, name)
        .ok_or_else(|| {
            debug!(participant = name, "participant lookup failed");
            StatsError::NotFound(name.to_string())
        })?;

    let times = completed_times_minutes(records);
    let population = mean_and_std_dev(&times).ok();
    let time_minutes = record.finish_time_minutes();

    let assessment = match (time_minutes, &population) {
        (Some(time), Some(moments)) => Assessment::Completed(summarize(time, moments)),
        _ => Assessment::NotCompleted {
            last_workout_reached: record.last_workout_reached().map(str::to_string),
        },
    };

    let ranking = record.overall_rank()
        .and_then(|rank| match evaluate_ranking(rank, times.len() as u32) {
            Ok(position) => Some(position),
            Err(e) => {
                warn!(participant = name, "ranking skipped: {}", e);
                None
            }
        });

    let comparison = match (time_minutes, &population) {
        (Some(time), Some(moments)) => {
            let best = times.iter().copied().fold(f64::INFINITY, f64::min);
            Some(TimeComparison {
                participant_minutes: time,
                mean_minutes: moments.mean,
                best_minutes: best,
                gap_to_leader_minutes: time - best,
            })
        }
        _ => None,
    };

    let curve = population
        .map(|moments| generate_curve(&times, &moments, time_minutes))
        .unwrap_or_default();

    Ok(IndividualEvaluation {
        name: record.name.clone(),
        class_slot: record.class_slot,
        time_minutes,
        population,
        assessment,
        ranking,
        comparison,
        curve,
    })
}

/// Z-score, percentile and tier for one finish time. Faster than average
/// gives a negative z and a percentile above 50.
pub fn summarize(time_minutes: f64, moments: &Moments) -> PerformanceSummary {
    match z_score(time_minutes, moments) {
        Ok(z) => PerformanceSummary {
            z_score: z,
            percentile: z_score_to_percentile(-z),
            tier: PerformanceTier::from_z_score(z),
            degenerate_variance: false,
        },
        Err(_) => {
            warn!(std_dev = moments.std_dev, "finish times have no spread, using neutral z-score");
            PerformanceSummary {
                z_score: 0.0,
                percentile: 50.0,
                tier: PerformanceTier::from_z_score(0.0),
                degenerate_variance: true,
            }
        }
    }
}

/// Samples the fitted normal curve over the observed times padded by 20% of
/// their range on each side. The point closest to `highlight` is flagged.
pub fn generate_curve(times: &[f64], moments: &Moments, highlight: Option<f64>) -> Vec<CurvePoint> {
    if times.is_empty() || moments.is_degenerate() {
        return Vec::new();
    }

    let min = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    let start = (min - CURVE_PADDING * range).max(0.0);
    let end = max + CURVE_PADDING * range;
    let step = if end - start <= NARROW_SPAN_MINUTES { 0.5 } else { 1.0 };
    let steps = ((end - start) / step + 1e-9).floor() as usize;

    let mut points: Vec<CurvePoint> = (0..=steps)
        .map(|i| {
            let x = start + i as f64 * step;
            CurvePoint {
                x,
                y: normal_pdf(x, moments.mean, moments.std_dev),
                is_highlighted: false,
            }
        })
        .collect();

    if let Some(target) = highlight {
        let closest = points.iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.x - target).abs()
                    .partial_cmp(&(b.x - target).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i);
        if let Some(i) = closest {
            points[i].is_highlighted = true;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{finisher, dnf};
    use crate::config::Gender;

    fn pair() -> Vec<ParticipantRecord> {
        vec![
            finisher("Fast", Gender::Female, ClassSlot::Am6, 1800.0, 1),
            finisher("Slow", Gender::Male, ClassSlot::Pm7, 2400.0, 2),
            dnf("Quit", Gender::Male, ClassSlot::Pm7),
        ]
    }

    #[test]
    fn faster_than_average_maps_above_fifty() {
        let eval = evaluate_individual(&pair(), "Fast").unwrap();

        let population = eval.population.unwrap();
        assert!((population.mean - 35.0).abs() < 1e-12);
        assert!((population.std_dev - 5.0).abs() < 1e-12);

        let summary = eval.assessment.summary().unwrap();
        assert!((summary.z_score + 1.0).abs() < 1e-12);
        assert!((summary.percentile - 84.13).abs() < 0.01);
        assert_eq!(summary.tier, PerformanceTier::VeryGood);
        assert!(!summary.degenerate_variance);
        assert_eq!(eval.assessment.label(), "Very good");
    }

    #[test]
    fn slower_than_average_maps_below_fifty() {
        let eval = evaluate_individual(&pair(), "Slow").unwrap();
        let summary = eval.assessment.summary().unwrap();
        assert!((summary.z_score - 1.0).abs() < 1e-12);
        assert!((summary.percentile - 15.87).abs() < 0.01);
        assert_eq!(summary.tier, PerformanceTier::BelowAverage);
    }

    #[test]
    fn unknown_name_is_not_found() {
        assert_eq!(
            evaluate_individual(&pair(), "Nobody"),
            Err(StatsError::NotFound("Nobody".to_string()))
        );
    }

    #[test]
    fn non_finisher_gets_no_score_but_still_sees_the_curve() {
        let eval = evaluate_individual(&pair(), "Quit").unwrap();

        assert_eq!(eval.time_minutes, None);
        assert_eq!(
            eval.assessment,
            Assessment::NotCompleted { last_workout_reached: Some("Sled push".to_string()) }
        );
        assert_eq!(eval.assessment.label(), "Not completed");
        assert_eq!(eval.ranking, None);
        assert_eq!(eval.comparison, None);
        assert!(!eval.curve.is_empty());
        assert!(eval.curve.iter().all(|p| !p.is_highlighted));
    }

    #[test]
    fn tier_bands_close_on_the_upper_bound() {
        assert_eq!(PerformanceTier::from_z_score(-2.5), PerformanceTier::Exceptional);
        assert_eq!(PerformanceTier::from_z_score(-2.0), PerformanceTier::Exceptional);
        assert_eq!(PerformanceTier::from_z_score(-1.5), PerformanceTier::VeryGood);
        assert_eq!(PerformanceTier::from_z_score(-1.0), PerformanceTier::VeryGood);
        assert_eq!(PerformanceTier::from_z_score(-0.2), PerformanceTier::AboveAverage);
        assert_eq!(PerformanceTier::from_z_score(0.0), PerformanceTier::AboveAverage);
        assert_eq!(PerformanceTier::from_z_score(0.7), PerformanceTier::BelowAverage);
        assert_eq!(PerformanceTier::from_z_score(1.0), PerformanceTier::BelowAverage);
        assert_eq!(PerformanceTier::from_z_score(1.01), PerformanceTier::NeedsImprovement);
    }

    #[test]
    fn single_finisher_uses_neutral_convention() {
        let records = vec![
            finisher("Solo", Gender::Male, ClassSlot::Am5, 2100.0, 1),
            dnf("Other", Gender::Female, ClassSlot::Am5),
        ];
        let eval = evaluate_individual(&records, "Solo").unwrap();
        let summary = eval.assessment.summary().unwrap();

        assert!(summary.degenerate_variance);
        assert_eq!(summary.z_score, 0.0);
        assert_eq!(summary.percentile, 50.0);
        assert_eq!(summary.tier, PerformanceTier::AboveAverage);
        assert!(summary.z_score.is_finite());
        assert!(eval.curve.is_empty());
    }

    #[test]
    fn nobody_finished_means_no_population() {
        let records = vec![dnf("A", Gender::Male, ClassSlot::Am5)];
        let eval = evaluate_individual(&records, "A").unwrap();
        assert_eq!(eval.population, None);
        assert!(eval.curve.is_empty());
    }

    #[test]
    fn curve_spans_padded_range_with_half_minute_steps() {
        let times = [30.0, 40.0];
        let moments = Moments { mean: 35.0, std_dev: 5.0 };
        let curve = generate_curve(&times, &moments, Some(30.0));

        assert_eq!(curve.len(), 29);
        assert!((curve[0].x - 28.0).abs() < 1e-9);
        assert!((curve[28].x - 42.0).abs() < 1e-9);
        assert!((curve[1].x - curve[0].x - 0.5).abs() < 1e-12);

        let highlighted: Vec<&CurvePoint> = curve.iter().filter(|p| p.is_highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert!((highlighted[0].x - 30.0).abs() < 1e-9);

        let peak = curve.iter().max_by(|a, b| a.y.partial_cmp(&b.y).unwrap()).unwrap();
        assert!((peak.x - 35.0).abs() < 1e-9);
    }

    #[test]
    fn wide_spread_uses_whole_minute_steps() {
        let times = [20.0, 60.0];
        let moments = mean_and_std_dev(&times).unwrap();
        let curve = generate_curve(&times, &moments, None);

        // 12..=68 in steps of 1
        assert_eq!(curve.len(), 57);
        assert!((curve[1].x - curve[0].x - 1.0).abs() < 1e-12);
        assert!(curve.iter().all(|p| !p.is_highlighted));
    }

    #[test]
    fn curve_never_starts_below_zero() {
        let times = [1.0, 11.0];
        let moments = mean_and_std_dev(&times).unwrap();
        let curve = generate_curve(&times, &moments, None);
        assert_eq!(curve[0].x, 0.0);
    }

    #[test]
    fn finisher_gets_ranking_and_comparison() {
        let eval = evaluate_individual(&pair(), "Slow").unwrap();

        let ranking = eval.ranking.unwrap();
        assert_eq!((ranking.rank, ranking.total), (2, 2));
        assert_eq!(ranking.top_percentile, 0.0);

        let comparison = eval.comparison.unwrap();
        assert_eq!(comparison.participant_minutes, 40.0);
        assert_eq!(comparison.best_minutes, 30.0);
        assert_eq!(comparison.gap_to_leader_minutes, 10.0);
        assert!((comparison.mean_minutes - 35.0).abs() < 1e-12);
    }

    #[test]
    fn rank_outside_the_field_leaves_participant_unranked() {
        let records = vec![
            finisher("Fast", Gender::Male, ClassSlot::Am6, 1800.0, 1),
            finisher("Stray", Gender::Male, ClassSlot::Am6, 2400.0, 7),
        ];
        let eval = evaluate_individual(&records, "Stray").unwrap();
        assert!(eval.ranking.is_none());
        assert!(eval.comparison.is_some());
        assert!(matches!(eval.assessment, Assessment::Completed(_)));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let records = pair();
        assert_eq!(
            evaluate_individual(&records, "Fast"),
            evaluate_individual(&records, "Fast")
        );
    }
}
