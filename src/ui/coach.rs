// src/ui/coach.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points};

use crate::analysis::roster::{category_leaders, gap_to_leader_minutes, roster};
use crate::analysis::{ClassAggregate, ClassFilter, GenderAggregate, HistogramBucket};
use crate::config::{Gender, ParticipantRecord};
use crate::state::{AppState, CoachOverview};
use crate::utils::{format_finish_time, format_minutes};
use super::{
    bar_captions, big_number, placeholder, ACCENT, CHART_HEIGHT, FEMALE_COLOR, HIGHLIGHT,
    MALE_COLOR, MUTED,
};

pub fn show_coach_view(ui: &mut egui::Ui, state: &AppState) {
    let overview = &state.overview;
    let records = state.dataset.records();

    egui::ScrollArea::vertical()
        .id_source("coach_scroll")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                completion_card(ui, overview);
                gender_card(ui, overview);
                leaders_card(ui, records);
            });

            ui.add_space(8.0);
            ui.heading("Athletes");
            athletes_table(ui, records);

            ui.add_space(8.0);
            egui::Grid::new("coach_charts")
                .num_columns(2)
                .spacing([16.0, 16.0])
                .show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.heading("Completion by class");
                        class_completion_chart(ui, &overview.classes);
                    });
                    ui.vertical(|ui| {
                        ui.heading("Finish time distribution");
                        time_histogram(ui, &overview.histogram);
                    });
                    ui.end_row();

                    ui.vertical(|ui| {
                        ui.heading("Times by gender");
                        gender_chart(ui, &overview.genders);
                    });
                    ui.vertical(|ui| {
                        ui.heading("Class trend");
                        class_trend_chart(ui, &overview.classes);
                    });
                    ui.end_row();
                });
        });
}

fn completion_card(ui: &mut egui::Ui, overview: &CoachOverview) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label("Completion rate");
            match &overview.completion_rate {
                Ok(rate) => {
                    ui.label(big_number(format!("{:.1}%", rate)));
                    ui.label(format!("{} of {} athletes finished", overview.completed, overview.total));
                }
                Err(e) => {
                    ui.weak(e.to_string());
                }
            }
        });
    });
}

fn gender_card(ui: &mut egui::Ui, overview: &CoachOverview) {
    let counts = overview.gender_counts;
    let total = counts.male + counts.female;
    let share = |n: usize| if total == 0 { 0.0 } else { n as f64 / total as f64 * 100.0 };

    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label("Gender distribution");
            ui.horizontal(|ui| {
                ui.colored_label(MALE_COLOR, big_number(counts.male.to_string()));
                ui.label("/");
                ui.colored_label(FEMALE_COLOR, big_number(counts.female.to_string()));
            });
            ui.label(format!(
                "{:.0}% male, {:.0}% female",
                share(counts.male),
                share(counts.female)
            ));
        });
    });
}

fn leaders_card(ui: &mut egui::Ui, records: &[ParticipantRecord]) {
    let leaders = category_leaders(records);
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label("Category leaders");
            for (gender, leader) in [(Gender::Male, leaders.male), (Gender::Female, leaders.female)] {
                match leader {
                    Some(record) => {
                        let time = record.finish_time_seconds().map(format_finish_time).unwrap_or_default();
                        ui.label(format!("{}1  {}  {}", gender.code(), record.name, time));
                    }
                    None => {
                        ui.weak(format!("{}1  no finisher", gender.code()));
                    }
                }
            }
        });
    });
}

fn athletes_table(ui: &mut egui::Ui, records: &[ParticipantRecord]) {
    if records.is_empty() {
        placeholder(ui, "No athletes in this dataset");
        return;
    }

    egui::ScrollArea::vertical()
        .id_source("athletes_scroll")
        .max_height(260.0)
        .show(ui, |ui| {
            egui::Grid::new("athletes_grid")
                .num_columns(7)
                .striped(true)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for header in ["#", "Name", "Gender", "Class", "Time", "Category", "Gap"] {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for record in roster(records, ClassFilter::All) {
                        ui.label(record.overall_rank().map(|r| r.to_string()).unwrap_or_default());
                        ui.label(&record.name);
                        ui.label(record.gender.label());
                        ui.label(format!("{} ({})", record.class_slot, record.class_slot.period().label()));
                        match record.finish_time_seconds() {
                            Some(seconds) => {
                                ui.label(format_finish_time(seconds));
                            }
                            None => {
                                let reached = record.last_workout_reached().unwrap_or("unknown");
                                ui.colored_label(HIGHLIGHT, format!("DNF ({})", reached));
                            }
                        }
                        ui.label(record.gender_rank().map(|g| g.to_string()).unwrap_or_default());
                        ui.label(
                            gap_to_leader_minutes(record, records)
                                .map(|gap| format!("+{}", format_minutes(gap)))
                                .unwrap_or_default(),
                        );
                        ui.end_row();
                    }
                });
        });
}

fn class_completion_chart(ui: &mut egui::Ui, classes: &[ClassAggregate]) {
    if classes.is_empty() {
        placeholder(ui, "No classes to compare");
        return;
    }

    let bars: Vec<Bar> = classes.iter()
        .enumerate()
        .map(|(i, class)| {
            Bar::new(i as f64, class.completion_rate)
                .name(format!("{} ({} athletes)", class.class_slot, class.participant_count))
                .width(0.6)
                .fill(ACCENT)
        })
        .collect();

    Plot::new("class_completion")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .include_y(0.0)
        .include_y(100.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Completion %"));
        });
    bar_captions(ui, classes.iter().enumerate().map(|(i, c)| (i, c.class_slot.label())));
}

fn time_histogram(ui: &mut egui::Ui, buckets: &[HistogramBucket]) {
    if buckets.iter().all(|b| b.count == 0) {
        placeholder(ui, "No finish times recorded");
        return;
    }

    let bars: Vec<Bar> = buckets.iter()
        .enumerate()
        .map(|(i, bucket)| {
            Bar::new(i as f64, bucket.count as f64)
                .name(format!("{} min", bucket.range_label))
                .width(0.9)
                .fill(ACCENT)
        })
        .collect();

    Plot::new("time_histogram")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .show_axes([false, true])
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Athletes"));
        });
    bar_captions(ui, buckets.iter().enumerate().map(|(i, b)| (i, b.range_label.as_str())));
}

fn gender_chart(ui: &mut egui::Ui, genders: &[GenderAggregate]) {
    if genders.is_empty() {
        placeholder(ui, "No finishers yet");
        return;
    }

    let bars = |offset: f64, value: fn(&GenderAggregate) -> f64| -> Vec<Bar> {
        genders.iter()
            .enumerate()
            .map(|(i, g)| {
                let color = match g.gender {
                    Gender::Male => MALE_COLOR,
                    Gender::Female => FEMALE_COLOR,
                };
                Bar::new(i as f64 + offset, value(g))
                    .name(g.gender.label())
                    .width(0.35)
                    .fill(color)
            })
            .collect()
    };
    let mean_bars = bars(-0.2, |g| g.mean_time_minutes);
    let best_bars = bars(0.2, |g| g.best_time_minutes);

    Plot::new("gender_times")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .include_y(0.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(mean_bars).name("Mean (min)"));
            plot_ui.bar_chart(BarChart::new(best_bars).name("Best (min)").color(MUTED));
        });

    ui.horizontal_wrapped(|ui| {
        for g in genders {
            ui.small(format!(
                "{}: {} finishers, mean {}, best {}",
                g.gender.label(),
                g.completed_count,
                format_minutes(g.mean_time_minutes),
                format_minutes(g.best_time_minutes)
            ));
        }
    });
}

fn class_trend_chart(ui: &mut egui::Ui, classes: &[ClassAggregate]) {
    let series = |value: fn(&ClassAggregate) -> Option<f64>| -> Vec<[f64; 2]> {
        classes.iter()
            .enumerate()
            .filter_map(|(i, c)| value(c).map(|v| [i as f64, v]))
            .collect()
    };
    let mean = series(|c| c.mean_time_minutes);
    if mean.is_empty() {
        placeholder(ui, "No finish times by class");
        return;
    }
    let best = series(|c| c.best_time_minutes);
    let worst = series(|c| c.worst_time_minutes);

    Plot::new("class_trend")
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(best).name("Best").color(egui::Color32::from_rgb(100, 200, 100)));
            plot_ui.points(Points::new(mean.clone()).radius(3.0).color(ACCENT));
            plot_ui.line(Line::new(mean).name("Mean").color(ACCENT).width(2.0));
            plot_ui.line(Line::new(worst).name("Worst").color(HIGHLIGHT));
        });
    bar_captions(ui, classes.iter().enumerate().map(|(i, c)| (i, c.class_slot.label())));
}
