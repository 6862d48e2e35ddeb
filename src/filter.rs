// Record selection for history, stats and chart views

use crate::models::{MuscleGroup, WorkoutRecord};
use chrono::NaiveDate;

/// Condition a record must satisfy to be shown
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Exercise(String),
    Muscle(MuscleGroup),
    Since(NaiveDate), // date >= value
    Until(NaiveDate), // date <= value
}

impl Filter {
    pub fn matches(&self, record: &WorkoutRecord) -> bool {
        match self {
            Filter::Exercise(name) => record.exercise == *name,
            Filter::Muscle(group) => record.muscle_group == *group,
            Filter::Since(date) => record.date >= *date,
            Filter::Until(date) => record.date <= *date,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::Exercise(name) => write!(f, "exercise = {}", name),
            Filter::Muscle(group) => write!(f, "muscle = {}", group),
            Filter::Since(date) => write!(f, "date >= {}", date),
            Filter::Until(date) => write!(f, "date <= {}", date),
        }
    }
}

/// Records matching every filter, in input order
pub fn apply(records: &[WorkoutRecord], filters: &[Filter]) -> Vec<WorkoutRecord> {
    records
        .iter()
        .filter(|r| filters.iter().all(|f| f.matches(r)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeightUnit;
    use chrono::DateTime;

    fn record(id: i64, exercise: &str, group: MuscleGroup, date: &str) -> WorkoutRecord {
        WorkoutRecord {
            id,
            exercise: exercise.to_string(),
            muscle_group: group,
            sets: 3,
            reps: 10,
            weight: 20.0,
            unit: WeightUnit::Kg,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            volume: 600.0,
            is_progressive: false,
            created_at: DateTime::from_timestamp_millis(id).unwrap(),
        }
    }

    fn sample() -> Vec<WorkoutRecord> {
        vec![
            record(1, "Barbell Curl", MuscleGroup::Biceps, "2024-01-01"),
            record(2, "Deadlift", MuscleGroup::Back, "2024-01-05"),
            record(3, "Hammer Curl", MuscleGroup::Biceps, "2024-01-09"),
        ]
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        assert_eq!(apply(&sample(), &[]).len(), 3);
    }

    #[test]
    fn test_muscle_filter() {
        let ids: Vec<i64> = apply(&sample(), &[Filter::Muscle(MuscleGroup::Biceps)])
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_combined_filters() {
        let filters = vec![
            Filter::Since(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            Filter::Until(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()),
            Filter::Exercise("Hammer Curl".to_string()),
        ];
        let matched = apply(&sample(), &filters);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 3);
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::Muscle(MuscleGroup::Legs).to_string(), "muscle = LEGS");
        assert_eq!(
            Filter::Since(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).to_string(),
            "date >= 2024-01-02"
        );
    }
}
