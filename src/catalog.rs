// Static exercise catalog

use crate::models::{MuscleGroup, WeightUnit};

/// A catalog entry: exercise name and the unit it is logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseEntry {
    pub name: &'static str,
    pub unit: WeightUnit,
}

const fn kg(name: &'static str) -> ExerciseEntry {
    ExerciseEntry {
        name,
        unit: WeightUnit::Kg,
    }
}

const fn lbs(name: &'static str) -> ExerciseEntry {
    ExerciseEntry {
        name,
        unit: WeightUnit::Lbs,
    }
}

const CHEST: &[ExerciseEntry] = &[
    kg("Barbell Bench Press"),
    kg("Dumbbell Bench Press"),
    kg("Incline Barbell Press"),
    kg("Incline Dumbbell Press"),
    kg("Decline Bench Press"),
    lbs("Chest Fly (Dumbbell)"),
    lbs("Cable Chest Fly"),
    lbs("Pec Deck Machine"),
    kg("Push-Ups"),
    kg("Chest Dips"),
];

const BACK: &[ExerciseEntry] = &[
    kg("Pull-Ups"),
    lbs("Lat Pulldown"),
    lbs("Seated Cable Row"),
    kg("Barbell Bent-Over Row"),
    kg("T-Bar Row"),
    kg("One-Arm Dumbbell Row"),
    kg("Deadlift"),
    lbs("Straight Arm Pulldown"),
    lbs("Face Pull"),
    lbs("Machine Row"),
];

const BICEPS: &[ExerciseEntry] = &[
    kg("Barbell Curl"),
    kg("EZ-Bar Curl"),
    kg("Dumbbell Curl"),
    kg("Alternating Dumbbell Curl"),
    kg("Hammer Curl"),
    kg("Concentration Curl"),
    lbs("Preacher Curl"),
    lbs("Cable Curl"),
    kg("Incline Dumbbell Curl"),
];

const TRICEPS: &[ExerciseEntry] = &[
    kg("Close-Grip Bench Press"),
    kg("Tricep Dips"),
    kg("Skull Crushers"),
    kg("Overhead Dumbbell Extension"),
    lbs("Cable Pushdown"),
    lbs("Rope Pushdown"),
    kg("Kickbacks"),
    kg("Smith Machine Close-Grip Press"),
];

const LEGS: &[ExerciseEntry] = &[
    kg("Barbell Squat"),
    kg("Leg Press"),
    kg("Hack Squat"),
    kg("Lunges"),
    kg("Walking Lunges"),
    kg("Romanian Deadlift"),
    lbs("Leg Extension"),
    lbs("Leg Curl"),
    kg("Standing Calf Raise"),
    lbs("Seated Calf Raise"),
];

/// Muscle groups in display order
pub fn groups() -> &'static [MuscleGroup] {
    &MuscleGroup::ALL
}

/// Exercises for a muscle group, in display order
pub fn exercises_in(group: MuscleGroup) -> &'static [ExerciseEntry] {
    match group {
        MuscleGroup::Chest => CHEST,
        MuscleGroup::Back => BACK,
        MuscleGroup::Biceps => BICEPS,
        MuscleGroup::Triceps => TRICEPS,
        MuscleGroup::Legs => LEGS,
    }
}

/// Find an exercise by exact name
///
/// Names are unique across groups, so the first match is the only match.
pub fn lookup(name: &str) -> Option<(MuscleGroup, ExerciseEntry)> {
    groups().iter().find_map(|&group| {
        exercises_in(group)
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| (group, *entry))
    })
}
