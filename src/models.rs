// Data models for gymlog

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Muscle group used to organise the exercise catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MuscleGroup {
    Chest,
    Back,
    Biceps,
    Triceps,
    Legs,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 5] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Legs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "CHEST",
            MuscleGroup::Back => "BACK",
            MuscleGroup::Biceps => "BICEPS",
            MuscleGroup::Triceps => "TRICEPS",
            MuscleGroup::Legs => "LEGS",
        }
    }
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MuscleGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MuscleGroup::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown muscle group: {} (expected one of CHEST, BACK, BICEPS, TRICEPS, LEGS)", s))
    }
}

/// Unit a weight is recorded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lbs => write!(f, "lbs"),
        }
    }
}

/// One logged exercise performance
///
/// `volume` and `is_progressive` are snapshots taken when the record is built.
/// Nothing recomputes them after later inserts or deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: i64,
    pub exercise: String,
    #[serde(alias = "muscle")]
    pub muscle_group: MuscleGroup,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub unit: WeightUnit,
    pub date: NaiveDate,
    pub volume: f64,
    pub is_progressive: bool,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Candidate record as collected from the user, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub date: Option<NaiveDate>,
}

/// Rejected workout submission
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingExercise,
    UnknownExercise(String),
    MissingDate,
    InvalidSets,
    InvalidReps,
    InvalidWeight,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingExercise => write!(f, "Please select an exercise"),
            ValidationError::UnknownExercise(name) => write!(f, "Unknown exercise: {}", name),
            ValidationError::MissingDate => write!(f, "Please select a date"),
            ValidationError::InvalidSets => write!(f, "Sets must be greater than 0"),
            ValidationError::InvalidReps => write!(f, "Reps must be greater than 0"),
            ValidationError::InvalidWeight => write!(f, "Weight must be a number of at least 0"),
        }
    }
}

impl std::error::Error for ValidationError {}
