// Application state passed through each user action

use crate::analytics::{self, ChartPoint, ExerciseSummary, HomeSummary};
use crate::catalog::{self, ExerciseEntry};
use crate::filter::{self, Filter};
use crate::models::{MuscleGroup, ValidationError, WorkoutForm, WorkoutRecord};
use crate::store::WorkoutStore;
use chrono::{DateTime, NaiveDate, Utc};
use eyre::Result;
use std::path::Path;
use tracing::info;

/// Result of a workout submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Logged(WorkoutRecord),
    /// Nothing was stored; the form can be corrected and resubmitted
    Rejected(ValidationError),
}

/// Store plus the selections a front end tracks between actions
pub struct App {
    store: WorkoutStore,
    current_muscle: MuscleGroup,
    selected_workout: Option<i64>,
}

impl App {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(WorkoutStore::open(path)?))
    }

    pub fn new(store: WorkoutStore) -> Self {
        Self {
            store,
            current_muscle: MuscleGroup::Chest,
            selected_workout: None,
        }
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut WorkoutStore {
        &mut self.store
    }

    pub fn current_muscle(&self) -> MuscleGroup {
        self.current_muscle
    }

    pub fn select_muscle(&mut self, group: MuscleGroup) {
        self.current_muscle = group;
    }

    /// Catalog entries for the selected muscle group
    pub fn exercise_choices(&self) -> &'static [ExerciseEntry] {
        catalog::exercises_in(self.current_muscle)
    }

    pub fn previous_best(&self, exercise: &str) -> Option<&WorkoutRecord> {
        analytics::previous_best(exercise, self.store.workouts())
    }

    /// Validate, classify and store a new workout
    pub fn submit(&mut self, form: &WorkoutForm, now: DateTime<Utc>) -> Result<SubmitOutcome> {
        let id = self.store.next_id(now.timestamp_millis());

        let record = match analytics::build_record(form, self.store.workouts(), id, now) {
            Ok(r) => r,
            Err(e) => {
                info!(error = %e, "Rejected workout submission");
                return Ok(SubmitOutcome::Rejected(e));
            }
        };

        self.store.add(record.clone())?;
        Ok(SubmitOutcome::Logged(record))
    }

    /// Mark a workout as the target of follow-up actions
    pub fn select_workout(&mut self, id: i64) -> Option<&WorkoutRecord> {
        let found = self.store.get(id).is_some();
        self.selected_workout = found.then_some(id);
        self.store.get(id)
    }

    pub fn selected_workout(&self) -> Option<&WorkoutRecord> {
        self.selected_workout.and_then(|id| self.store.get(id))
    }

    /// Delete the selected workout, returning whether one was removed
    pub fn delete_selected(&mut self) -> Result<bool> {
        let Some(id) = self.selected_workout.take() else {
            return Ok(false);
        };
        self.store.delete_by_id(id)
    }

    /// Remove every workout once the user has confirmed
    pub fn clear_all(&mut self, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.selected_workout = None;
        self.store.clear()?;
        Ok(true)
    }

    pub fn home(&self, today: NaiveDate) -> HomeSummary {
        analytics::home_summary(self.store.workouts(), today, analytics::DEFAULT_WINDOW_DAYS)
    }

    pub fn stats(&self, filters: &[Filter]) -> Vec<ExerciseSummary> {
        analytics::aggregate_by_exercise(&filter::apply(self.store.workouts(), filters))
    }

    pub fn chart(&self, exercise: Option<&str>) -> Vec<ChartPoint> {
        analytics::series_for_chart(self.store.workouts(), exercise)
    }

    /// Exercises with at least one record, in first-logged order
    pub fn logged_exercises(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for w in self.store.workouts() {
            if !names.contains(&w.exercise.as_str()) {
                names.push(&w.exercise);
            }
        }
        names
    }
}
