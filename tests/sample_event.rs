use std::path::PathBuf;

use hyrox_dashboard::analysis::roster::{category_leaders, roster};
use hyrox_dashboard::analysis::{
    completion_rate, evaluate_individual, group_by_class, histogram, Assessment, ClassFilter,
};
use hyrox_dashboard::config::ClassSlot;
use hyrox_dashboard::file::load_dataset;
use hyrox_dashboard::{EventDataset, Settings, StatsError};

fn sample() -> EventDataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_event.csv");
    load_dataset(&path).expect("sample dataset loads")
}

#[test]
fn sample_event_loads_with_consistent_ranks() {
    let dataset = sample();
    assert_eq!(dataset.name, "sample_event");
    assert_eq!(dataset.participants.len(), 16);

    let rate = completion_rate(dataset.records()).unwrap();
    assert!((rate - 13.0 / 16.0 * 100.0).abs() < 1e-9);

    let leaders = category_leaders(dataset.records());
    assert_eq!(leaders.male.map(|r| r.name.as_str()), Some("Carlos Mendoza"));
    assert_eq!(leaders.female.map(|r| r.name.as_str()), Some("Valeria Ruiz"));
}

#[test]
fn classes_come_out_in_chronological_order() {
    let dataset = sample();
    let slots: Vec<ClassSlot> = group_by_class(dataset.records())
        .iter()
        .map(|c| c.class_slot)
        .collect();
    assert_eq!(
        slots,
        vec![ClassSlot::Am5, ClassSlot::Am6, ClassSlot::Am7, ClassSlot::Pm5, ClassSlot::Pm6, ClassSlot::Pm7]
    );
}

#[test]
fn default_histogram_counts_every_finisher() {
    let dataset = sample();
    let buckets = histogram(dataset.records(), &Settings::default().histogram_buckets);
    let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();
    // 25.2, 27.4, 28.4, 29.8 | 30.6, 31.7, 32.75, 34.0 | 35.2, 36.6, 38.1 | 40.1, 42.7
    assert_eq!(counts, vec![0, 4, 4, 3, 2]);
    assert_eq!(counts.iter().sum::<usize>(), 13);
}

#[test]
fn evaluations_cover_finishers_and_non_finishers() {
    let dataset = sample();

    let winner = evaluate_individual(dataset.records(), "Carlos Mendoza").unwrap();
    let summary = winner.assessment.summary().copied().unwrap();
    assert!(summary.z_score < -1.0);
    assert!(summary.percentile > 84.0);
    let ranking = winner.ranking.unwrap();
    assert_eq!((ranking.rank, ranking.total, ranking.ahead, ranking.behind), (1, 13, 0, 12));
    assert_eq!(winner.curve.iter().filter(|p| p.is_highlighted).count(), 1);

    let quitter = evaluate_individual(dataset.records(), "Miguel Reyes").unwrap();
    assert_eq!(
        quitter.assessment,
        Assessment::NotCompleted { last_workout_reached: Some("Sandbag lunges".to_string()) }
    );
    assert!(quitter.ranking.is_none());

    assert_eq!(
        evaluate_individual(dataset.records(), "Nobody").unwrap_err(),
        StatsError::NotFound("Nobody".to_string())
    );
}

#[test]
fn class_roster_lists_finishers_before_non_finishers() {
    let dataset = sample();
    let names: Vec<&str> = roster(dataset.records(), ClassFilter::Slot(ClassSlot::Pm6))
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Jorge Salinas", "Sofía Jiménez", "Gabriela Flores"]);
}
