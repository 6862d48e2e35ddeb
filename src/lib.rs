// gymlog - Local workout log with progressive-overload tracking

pub mod analytics;
pub mod app;
pub mod blob;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod export;
pub mod filter;
pub mod models;
pub mod store;

// Re-export main types for convenience
pub use app::{App, SubmitOutcome};
pub use filter::Filter;
pub use models::{MuscleGroup, ValidationError, WeightUnit, WorkoutForm, WorkoutRecord};
pub use store::WorkoutStore;
