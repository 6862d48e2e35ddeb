// Pure statistics over workout records

use crate::catalog;
use crate::models::{ValidationError, WorkoutForm, WorkoutRecord};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Number of records in the home screen's recent list
pub const RECENT_LIMIT: usize = 10;

/// Default trailing window for the home summary, in days
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Aggregate statistics for a single exercise
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExerciseStats {
    pub count: usize,
    pub max: f64,
    pub min: f64,
    pub avg: f64,
    pub total_volume: f64,
    pub progressive_count: usize,
}

/// Statistics for one exercise, as produced by [`aggregate_by_exercise`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSummary {
    pub exercise: String,
    #[serde(flatten)]
    pub stats: ExerciseStats,
}

/// One point of a weight-progression chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub weight: f64,
}

/// Counts shown on the home screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeSummary {
    pub today_count: usize,
    pub window_count: usize,
    pub total: usize,
    pub recent: Vec<WorkoutRecord>,
}

/// Most recent record of `exercise`
///
/// Among records sharing the latest date the one inserted last wins.
pub fn previous_best<'a>(exercise: &str, records: &'a [WorkoutRecord]) -> Option<&'a WorkoutRecord> {
    // max_by_key keeps the last of equal maxima
    records
        .iter()
        .filter(|w| w.exercise == exercise)
        .max_by_key(|w| w.date)
}

/// Whether logging `weight` for `exercise` on `date` counts as progressive overload
///
/// Compares against the most recent record of the exercise logged on a
/// different date. No such record means not progressive.
pub fn classify_progressive(exercise: &str, date: NaiveDate, weight: f64, records: &[WorkoutRecord]) -> bool {
    records
        .iter()
        .filter(|w| w.exercise == exercise && w.date != date)
        .max_by_key(|w| w.date)
        .is_some_and(|best| weight > best.weight)
}

/// Per-exercise statistics, grouped in first-seen order
pub fn aggregate_by_exercise(records: &[WorkoutRecord]) -> Vec<ExerciseSummary> {
    let mut order: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&WorkoutRecord>)> = Vec::new();

    for record in records {
        let index = *order.entry(record.exercise.as_str()).or_insert_with(|| {
            groups.push((record.exercise.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[index].1.push(record);
    }

    groups
        .into_iter()
        .map(|(exercise, group)| {
            let count = group.len();
            let max = group.iter().map(|w| w.weight).fold(f64::NEG_INFINITY, f64::max);
            let min = group.iter().map(|w| w.weight).fold(f64::INFINITY, f64::min);
            let sum: f64 = group.iter().map(|w| w.weight).sum();

            ExerciseSummary {
                exercise: exercise.to_string(),
                stats: ExerciseStats {
                    count,
                    max,
                    min,
                    avg: sum / count as f64,
                    total_volume: group.iter().map(|w| w.volume).sum(),
                    progressive_count: group.iter().filter(|w| w.is_progressive).count(),
                },
            }
        })
        .collect()
}

/// Points for the weight-progression chart, ascending by date
///
/// Without an exercise only the exercise of the earliest record is charted.
pub fn series_for_chart(records: &[WorkoutRecord], exercise: Option<&str>) -> Vec<ChartPoint> {
    let mut sorted: Vec<&WorkoutRecord> = records
        .iter()
        .filter(|w| exercise.is_none_or(|e| w.exercise == e))
        .collect();
    sorted.sort_by_key(|w| w.date);

    let Some(charted) = exercise.or_else(|| sorted.first().map(|w| w.exercise.as_str())) else {
        return Vec::new();
    };

    sorted
        .iter()
        .filter(|w| w.exercise == charted)
        .map(|w| ChartPoint {
            date: w.date,
            weight: w.weight,
        })
        .collect()
}

/// Today/window/total counts plus the most recent records
///
/// The window runs from `today - window_days` through `today` inclusive, so
/// the default of 7 spans 8 calendar days. A start before the earliest
/// representable date is clamped to it.
pub fn home_summary(records: &[WorkoutRecord], today: NaiveDate, window_days: i64) -> HomeSummary {
    let window_start = Duration::try_days(window_days)
        .and_then(|d| today.checked_sub_signed(d))
        .unwrap_or(NaiveDate::MIN);

    // Newest date first, later insertion first on equal dates
    let mut recent: Vec<&WorkoutRecord> = records.iter().rev().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));

    HomeSummary {
        today_count: records.iter().filter(|w| w.date == today).count(),
        window_count: records
            .iter()
            .filter(|w| w.date >= window_start && w.date <= today)
            .count(),
        total: records.len(),
        recent: recent.into_iter().take(RECENT_LIMIT).cloned().collect(),
    }
}

/// Validate a submission and freeze its derived fields against `records`
pub fn build_record(
    form: &WorkoutForm,
    records: &[WorkoutRecord],
    id: i64,
    created_at: DateTime<Utc>,
) -> Result<WorkoutRecord, ValidationError> {
    let exercise = form.exercise.trim();
    if exercise.is_empty() {
        return Err(ValidationError::MissingExercise);
    }
    let (muscle_group, entry) =
        catalog::lookup(exercise).ok_or_else(|| ValidationError::UnknownExercise(exercise.to_string()))?;

    let date = form.date.ok_or(ValidationError::MissingDate)?;

    if form.sets == 0 {
        return Err(ValidationError::InvalidSets);
    }
    if form.reps == 0 {
        return Err(ValidationError::InvalidReps);
    }
    if !form.weight.is_finite() || form.weight < 0.0 {
        return Err(ValidationError::InvalidWeight);
    }

    Ok(WorkoutRecord {
        id,
        exercise: entry.name.to_string(),
        muscle_group,
        sets: form.sets,
        reps: form.reps,
        weight: form.weight,
        unit: entry.unit,
        date,
        volume: f64::from(form.sets) * f64::from(form.reps) * form.weight,
        is_progressive: classify_progressive(entry.name, date, form.weight, records),
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MuscleGroup, WeightUnit};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(id: i64, exercise: &str, weight: f64, day: &str, is_progressive: bool) -> WorkoutRecord {
        WorkoutRecord {
            id,
            exercise: exercise.to_string(),
            muscle_group: MuscleGroup::Chest,
            sets: 3,
            reps: 5,
            weight,
            unit: WeightUnit::Kg,
            date: date(day),
            volume: 15.0 * weight,
            is_progressive,
            created_at: DateTime::from_timestamp_millis(id).unwrap(),
        }
    }

    fn form(exercise: &str, weight: f64, day: &str) -> WorkoutForm {
        WorkoutForm {
            exercise: exercise.to_string(),
            sets: 3,
            reps: 5,
            weight,
            date: Some(date(day)),
        }
    }

    const BENCH: &str = "Barbell Bench Press";

    #[test]
    fn test_bench_press_example() {
        let now = DateTime::from_timestamp_millis(0).unwrap();
        let mut records = Vec::new();

        let first = build_record(&form(BENCH, 80.0, "2024-01-01"), &records, 1, now).unwrap();
        assert!(!first.is_progressive);
        assert_eq!(first.volume, 1200.0);
        records.push(first);

        let second = build_record(&form(BENCH, 85.0, "2024-01-08"), &records, 2, now).unwrap();
        assert!(second.is_progressive);
        assert_eq!(second.volume, 1275.0);
        assert_eq!(second.muscle_group, MuscleGroup::Chest);
        assert_eq!(second.unit, WeightUnit::Kg);
        records.push(second);

        let stats = aggregate_by_exercise(&records);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].exercise, BENCH);
        assert_eq!(stats[0].stats.max, 85.0);
        assert_eq!(stats[0].stats.min, 80.0);
        assert_eq!(stats[0].stats.avg, 82.5);
        assert_eq!(stats[0].stats.total_volume, 2475.0);
        assert_eq!(stats[0].stats.progressive_count, 1);
        assert_eq!(stats[0].stats.count, 2);
    }

    #[test]
    fn test_previous_best_latest_date() {
        let records = vec![
            record(1, BENCH, 80.0, "2024-01-08", false),
            record(2, BENCH, 90.0, "2024-01-01", false),
            record(3, "Deadlift", 150.0, "2024-02-01", false),
        ];

        let best = previous_best(BENCH, &records).unwrap();
        assert_eq!(best.id, 1);
        assert!(previous_best("Lat Pulldown", &records).is_none());
    }

    #[test]
    fn test_previous_best_tie_latest_insertion_wins() {
        let records = vec![
            record(1, BENCH, 80.0, "2024-01-08", false),
            record(2, BENCH, 70.0, "2024-01-08", false),
        ];

        assert_eq!(previous_best(BENCH, &records).unwrap().id, 2);
    }

    #[test]
    fn test_classify_progressive() {
        let records = vec![record(1, BENCH, 80.0, "2024-01-01", false)];

        assert!(classify_progressive(BENCH, date("2024-01-08"), 80.5, &records));
        assert!(!classify_progressive(BENCH, date("2024-01-08"), 80.0, &records));
        assert!(!classify_progressive(BENCH, date("2024-01-08"), 60.0, &records));
    }

    #[test]
    fn test_classify_progressive_ignores_same_date_and_other_exercises() {
        let records = vec![
            record(1, BENCH, 80.0, "2024-01-08", false),
            record(2, "Deadlift", 50.0, "2024-01-01", false),
        ];

        // Only record of this exercise is on the same date
        assert!(!classify_progressive(BENCH, date("2024-01-08"), 100.0, &records));
        // No history at all
        assert!(!classify_progressive("Leg Press", date("2024-01-08"), 100.0, &records));
    }

    #[test]
    fn test_classify_progressive_compares_most_recent_prior() {
        let records = vec![
            record(1, BENCH, 100.0, "2024-01-01", false),
            record(2, BENCH, 70.0, "2024-01-05", false),
            record(3, BENCH, 200.0, "2024-01-10", false),
        ];

        // Same-date record on the 10th is excluded, so the 5th is the reference
        assert!(classify_progressive(BENCH, date("2024-01-10"), 75.0, &records));
    }

    #[test]
    fn test_aggregate_groups_in_first_seen_order() {
        let records = vec![
            record(1, "Deadlift", 100.0, "2024-01-01", false),
            record(2, BENCH, 60.0, "2024-01-01", false),
            record(3, "Deadlift", 120.0, "2024-01-08", true),
            record(4, BENCH, 40.0, "2024-01-08", false),
        ];

        let stats = aggregate_by_exercise(&records);
        let names: Vec<&str> = stats.iter().map(|s| s.exercise.as_str()).collect();
        assert_eq!(names, vec!["Deadlift", BENCH]);

        assert_eq!(stats[0].stats.total_volume, 15.0 * 100.0 + 15.0 * 120.0);
        assert_eq!(stats[0].stats.progressive_count, 1);
        assert_eq!(stats[1].stats.min, 40.0);
        assert_eq!(stats[1].stats.avg, 50.0);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_by_exercise(&[]).is_empty());
    }

    #[test]
    fn test_series_for_exercise_sorted_by_date() {
        let records = vec![
            record(1, BENCH, 85.0, "2024-01-08", false),
            record(2, "Deadlift", 150.0, "2023-12-01", false),
            record(3, BENCH, 80.0, "2024-01-01", false),
        ];

        let series = series_for_chart(&records, Some(BENCH));
        assert_eq!(
            series,
            vec![
                ChartPoint {
                    date: date("2024-01-01"),
                    weight: 80.0
                },
                ChartPoint {
                    date: date("2024-01-08"),
                    weight: 85.0
                },
            ]
        );
    }

    #[test]
    fn test_series_without_exercise_charts_earliest_exercise_only() {
        let records = vec![
            record(1, BENCH, 85.0, "2024-01-08", false),
            record(2, "Deadlift", 150.0, "2023-12-01", false),
            record(3, "Deadlift", 160.0, "2024-01-02", false),
        ];

        let series = series_for_chart(&records, None);
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|p| p.weight >= 150.0));
        assert_eq!(series[0].date, date("2023-12-01"));
    }

    #[test]
    fn test_series_empty() {
        assert!(series_for_chart(&[], None).is_empty());
        let records = vec![record(1, BENCH, 85.0, "2024-01-08", false)];
        assert!(series_for_chart(&records, Some("Deadlift")).is_empty());
    }

    #[test]
    fn test_home_summary() {
        let today = date("2024-03-10");
        let records = vec![
            record(1, BENCH, 80.0, "2024-03-10", false),
            record(2, BENCH, 80.0, "2024-03-03", false),
            record(3, BENCH, 80.0, "2024-03-02", false),
            record(4, BENCH, 80.0, "2024-03-10", false),
        ];

        let summary = home_summary(&records, today, DEFAULT_WINDOW_DAYS);
        assert_eq!(summary.today_count, 2);
        assert_eq!(summary.window_count, 3);
        assert_eq!(summary.total, 4);

        let ids: Vec<i64> = summary.recent.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_home_summary_limits_recent() {
        let records: Vec<WorkoutRecord> = (1..=15)
            .map(|day| record(day, BENCH, 80.0, &format!("2024-01-{:02}", day), false))
            .collect();

        let summary = home_summary(&records, date("2024-01-15"), DEFAULT_WINDOW_DAYS);
        assert_eq!(summary.recent.len(), RECENT_LIMIT);
        assert_eq!(summary.recent[0].id, 15);
        assert_eq!(summary.recent[9].id, 6);
        assert_eq!(summary.window_count, 8);
    }

    #[test]
    fn test_home_summary_empty() {
        let summary = home_summary(&[], date("2024-01-15"), DEFAULT_WINDOW_DAYS);
        assert_eq!(summary, HomeSummary::default());
    }

    #[test]
    fn test_build_record_validation() {
        let now = DateTime::from_timestamp_millis(0).unwrap();

        let mut f = form("", 80.0, "2024-01-01");
        assert_eq!(build_record(&f, &[], 1, now), Err(ValidationError::MissingExercise));

        f.exercise = "Bench".to_string();
        assert_eq!(
            build_record(&f, &[], 1, now),
            Err(ValidationError::UnknownExercise("Bench".to_string()))
        );

        f.exercise = BENCH.to_string();
        f.date = None;
        assert_eq!(build_record(&f, &[], 1, now), Err(ValidationError::MissingDate));

        let mut f = form(BENCH, 80.0, "2024-01-01");
        f.sets = 0;
        assert_eq!(build_record(&f, &[], 1, now), Err(ValidationError::InvalidSets));

        let mut f = form(BENCH, 80.0, "2024-01-01");
        f.reps = 0;
        assert_eq!(build_record(&f, &[], 1, now), Err(ValidationError::InvalidReps));

        let f = form(BENCH, -1.0, "2024-01-01");
        assert_eq!(build_record(&f, &[], 1, now), Err(ValidationError::InvalidWeight));

        let f = form(BENCH, f64::NAN, "2024-01-01");
        assert_eq!(build_record(&f, &[], 1, now), Err(ValidationError::InvalidWeight));

        // Zero weight is allowed
        let f = form(BENCH, 0.0, "2024-01-01");
        assert_eq!(build_record(&f, &[], 1, now).unwrap().volume, 0.0);
    }

    #[test]
    fn test_build_record_uses_catalog_unit() {
        let now = DateTime::from_timestamp_millis(0).unwrap();
        let record = build_record(&form("Cable Curl", 40.0, "2024-01-01"), &[], 7, now).unwrap();
        assert_eq!(record.muscle_group, MuscleGroup::Biceps);
        assert_eq!(record.unit, WeightUnit::Lbs);
        assert_eq!(record.id, 7);
    }

    #[test]
    fn test_home_summary_window_spans_eight_days() {
        let today = date("2024-03-10");
        let records = vec![
            record(1, BENCH, 80.0, "2024-03-02", false),
            record(2, BENCH, 80.0, "2024-03-03", false),
            record(3, BENCH, 80.0, "2024-03-11", false),
        ];

        let summary = home_summary(&records, today, DEFAULT_WINDOW_DAYS);
        // 03-03 is the first day inside; future dates are outside
        assert_eq!(summary.window_count, 1);
    }

    #[test]
    fn test_home_summary_near_min_date() {
        let records = vec![WorkoutRecord {
            date: NaiveDate::MIN,
            ..record(1, BENCH, 80.0, "2024-01-01", false)
        }];

        let summary = home_summary(&records, NaiveDate::MIN, DEFAULT_WINDOW_DAYS);
        assert_eq!(summary.today_count, 1);
        assert_eq!(summary.window_count, 1);

        let summary = home_summary(&records, NaiveDate::MIN, i64::MAX);
        assert_eq!(summary.window_count, 1);
    }

    #[test]
    fn test_stats_serialize_flat() {
        let records = vec![record(1, BENCH, 80.0, "2024-01-01", false)];
        let json = serde_json::to_value(aggregate_by_exercise(&records)).unwrap();

        assert_eq!(json[0]["exercise"], BENCH);
        assert_eq!(json[0]["total_volume"], 1200.0);
        assert_eq!(json[0]["progressive_count"], 0);
    }
}
