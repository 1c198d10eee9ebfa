// src/utils.rs
use crate::config::ParticipantRecord;

pub fn find_participant<'a>(records: &'a [ParticipantRecord], name: &str) -> Option<&'a ParticipantRecord> {
    records.iter().find(|r| r.name == name)
}

/// `H:MM:SS`, rounded to the nearest second.
pub fn format_finish_time(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

pub fn format_minutes(minutes: f64) -> String {
    format!("{:.1} min", minutes)
}

/// Selector label: `Ana (#3)` for finishers, `Luis (did not finish)` otherwise.
pub fn display_name(record: &ParticipantRecord) -> String {
    match record.overall_rank() {
        Some(rank) => format!("{} (#{})", record.name, rank),
        None => format!("{} (did not finish)", record.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{finisher, dnf};
    use crate::config::{ClassSlot, Gender};

    #[test]
    fn finish_time_formats_as_clock() {
        assert_eq!(format_finish_time(1830.0), "0:30:30");
        assert_eq!(format_finish_time(3725.4), "1:02:05");
        assert_eq!(format_finish_time(59.6), "0:01:00");
    }

    #[test]
    fn display_name_marks_non_finishers() {
        let ana = finisher("Ana", Gender::Female, ClassSlot::Am6, 1800.0, 3);
        let luis = dnf("Luis", Gender::Male, ClassSlot::Am6);
        assert_eq!(display_name(&ana), "Ana (#3)");
        assert_eq!(display_name(&luis), "Luis (did not finish)");

        let records = vec![ana, luis];
        assert_eq!(find_participant(&records, "Luis").map(|r| r.is_completed()), Some(false));
        assert!(find_participant(&records, "luis").is_none());
    }
}
