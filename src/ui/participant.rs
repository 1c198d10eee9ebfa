// src/ui/participant.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points, VLine};

use crate::analysis::roster::roster;
use crate::analysis::{
    Assessment, ClassFilter, CurvePoint, IndividualEvaluation, RankingPosition, TimeComparison,
};
use crate::state::AppState;
use crate::utils::{display_name, format_finish_time, format_minutes};
use super::{big_number, placeholder, ACCENT, CHART_HEIGHT, HIGHLIGHT, MUTED};

pub fn show_participant_view(ui: &mut egui::Ui, state: &mut AppState) {
    selector_row(ui, state);
    ui.separator();

    egui::ScrollArea::vertical()
        .id_source("participant_scroll")
        .show(ui, |ui| match &state.evaluation {
            None => placeholder(ui, "Select a participant to see their results"),
            Some(Err(e)) => {
                ui.colored_label(HIGHLIGHT, e.to_string());
            }
            Some(Ok(evaluation)) => show_evaluation(ui, evaluation),
        });
}

fn selector_row(ui: &mut egui::Ui, state: &mut AppState) {
    let mut filter = state.class_filter;
    let mut selected = state.selected_participant.clone();

    let options: Vec<(String, String)> = roster(state.dataset.records(), filter)
        .into_iter()
        .map(|r| (r.name.clone(), display_name(r)))
        .collect();

    ui.horizontal(|ui| {
        egui::ComboBox::from_label("Class")
            .selected_text(filter.label())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter, ClassFilter::All, ClassFilter::All.label());
                for slot in &state.class_slots {
                    let option = ClassFilter::Slot(*slot);
                    ui.selectable_value(&mut filter, option, option.label());
                }
            });

        let current = selected.as_deref()
            .and_then(|name| options.iter().find(|(n, _)| n == name))
            .map(|(_, label)| label.as_str())
            .unwrap_or("Choose a participant");
        egui::ComboBox::from_label("Participant")
            .selected_text(current)
            .width(260.0)
            .show_ui(ui, |ui| {
                for (name, label) in &options {
                    ui.selectable_value(&mut selected, Some(name.clone()), label);
                }
            });
    });

    if filter != state.class_filter {
        state.set_class_filter(filter);
    } else {
        state.select_participant(selected);
    }
}

fn show_evaluation(ui: &mut egui::Ui, evaluation: &IndividualEvaluation) {
    ui.horizontal(|ui| {
        summary_card(ui, evaluation);
        insight_card(ui, evaluation);
    });
    ui.add_space(8.0);

    egui::Grid::new("participant_charts")
        .num_columns(2)
        .spacing([16.0, 16.0])
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.heading("Time comparison");
                match &evaluation.comparison {
                    Some(comparison) => comparison_chart(ui, comparison),
                    None => placeholder(ui, "No finish time to compare"),
                }
            });
            ui.vertical(|ui| {
                ui.heading("Position in the field");
                match &evaluation.ranking {
                    Some(ranking) => ranking_chart(ui, ranking),
                    None => placeholder(ui, "Not ranked"),
                }
            });
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.heading("Finish time distribution");
    bell_curve(ui, evaluation);
}

fn summary_card(ui: &mut egui::Ui, evaluation: &IndividualEvaluation) {
    ui.group(|ui| {
        egui::Grid::new("participant_summary")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.strong(&evaluation.name);
                ui.label(evaluation.class_slot.label());
                ui.end_row();

                ui.label("Time");
                ui.label(
                    evaluation.time_minutes
                        .map(|m| format_finish_time(m * 60.0))
                        .unwrap_or_else(|| "DNF".to_string()),
                );
                ui.end_row();

                ui.label("Assessment");
                ui.label(evaluation.assessment.label());
                ui.end_row();

                if let Some(summary) = evaluation.assessment.summary() {
                    ui.label("Z-score");
                    ui.label(format!("{:.2}", summary.z_score));
                    ui.end_row();

                    ui.label("Percentile");
                    ui.label(big_number(format!("{:.1}", summary.percentile)));
                    ui.end_row();
                }

                if let Some(ranking) = &evaluation.ranking {
                    ui.label("Rank");
                    ui.label(format!("{} of {} (top {:.1}%)", ranking.rank, ranking.total, ranking.percentile));
                    ui.end_row();
                }
            });
    });
}

fn insight_card(ui: &mut egui::Ui, evaluation: &IndividualEvaluation) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label("Insight");
            match &evaluation.assessment {
                Assessment::Completed(summary) => {
                    ui.label(summary.tier.insight());
                    if summary.degenerate_variance {
                        ui.weak("All finishers share the same time, so the result is shown as average.");
                    }
                }
                Assessment::NotCompleted { last_workout_reached } => {
                    ui.label("Did not finish the event.");
                    if let Some(workout) = last_workout_reached {
                        ui.label(format!("Last workout reached: {}", workout));
                    }
                }
            }
        });
    });
}

fn comparison_chart(ui: &mut egui::Ui, comparison: &TimeComparison) {
    let bars = vec![
        Bar::new(0.0, comparison.participant_minutes).name("You").width(0.6).fill(ACCENT),
        Bar::new(1.0, comparison.mean_minutes).name("Mean").width(0.6).fill(MUTED),
        Bar::new(2.0, comparison.best_minutes).name("Best").width(0.6).fill(egui::Color32::from_rgb(100, 200, 100)),
    ];

    Plot::new("time_comparison")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Minutes"));
        });

    ui.horizontal_wrapped(|ui| {
        ui.small(format!("You: {}", format_minutes(comparison.participant_minutes)));
        ui.small(format!("Mean: {}", format_minutes(comparison.mean_minutes)));
        ui.small(format!("Best: {}", format_minutes(comparison.best_minutes)));
        ui.small(format!("Gap to leader: +{}", format_minutes(comparison.gap_to_leader_minutes)));
    });
}

fn ranking_chart(ui: &mut egui::Ui, ranking: &RankingPosition) {
    let bars = vec![
        Bar::new(0.0, ranking.ahead as f64).name("Ahead").width(0.6).fill(MUTED),
        Bar::new(1.0, 1.0).name("You").width(0.6).fill(ACCENT),
        Bar::new(2.0, ranking.behind as f64).name("Behind").width(0.6).fill(egui::Color32::from_rgb(100, 200, 100)),
    ];

    Plot::new("ranking_breakdown")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Athletes"));
        });

    ui.horizontal_wrapped(|ui| {
        ui.small(format!("{} ahead", ranking.ahead));
        ui.small(format!("{} behind", ranking.behind));
        ui.small(format!("Faster than {:.1}% of finishers", ranking.top_percentile));
    });
}

fn bell_curve(ui: &mut egui::Ui, evaluation: &IndividualEvaluation) {
    if evaluation.curve.is_empty() {
        let message = match &evaluation.population {
            None => "Nobody finished, so there is no distribution to show",
            Some(_) => "Finish times have no spread to plot",
        };
        placeholder(ui, message);
        return;
    }

    let curve: Vec<[f64; 2]> = evaluation.curve.iter().map(|p| [p.x, p.y]).collect();
    let marker: Option<&CurvePoint> = evaluation.curve.iter().find(|p| p.is_highlighted);

    Plot::new("bell_curve")
        .height(CHART_HEIGHT + 40.0)
        .allow_zoom(false)
        .allow_drag(false)
        .include_y(0.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(curve).name("Field").color(ACCENT).width(2.0));
            if let Some(moments) = &evaluation.population {
                plot_ui.vline(VLine::new(moments.mean).name("Mean").color(MUTED));
            }
            if let Some(time) = evaluation.time_minutes {
                plot_ui.vline(VLine::new(time).name("You").color(HIGHLIGHT));
            }
            if let Some(point) = marker {
                plot_ui.points(Points::new(vec![[point.x, point.y]]).radius(5.0).color(HIGHLIGHT));
            }
        });

    if let Some(moments) = &evaluation.population {
        ui.small(format!(
            "Mean {} with a standard deviation of {}",
            format_minutes(moments.mean),
            format_minutes(moments.std_dev)
        ));
    }
}
