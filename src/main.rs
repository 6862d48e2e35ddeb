use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use gymlog::analytics::ExerciseSummary;
use gymlog::{App, Filter, MuscleGroup, SubmitOutcome, WorkoutForm, WorkoutRecord, catalog, chart, config, export};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gymlog")]
#[command(about = "Log weighted exercises and track progressive overload")]
#[command(version)]
struct Cli {
    /// Directory holding the store (default: $GYMLOG_HOME or the platform data dir)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog exercises
    Exercises {
        /// Only this muscle group (CHEST, BACK, BICEPS, TRICEPS, LEGS)
        #[arg(short, long)]
        muscle: Option<MuscleGroup>,
    },

    /// Log a workout
    Add {
        #[arg(short, long)]
        exercise: String,
        #[arg(long)]
        sets: u32,
        #[arg(short, long)]
        reps: u32,
        #[arg(short, long)]
        weight: f64,
        /// YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show the most recent record for an exercise
    Best { exercise: String },

    /// Show one workout in detail
    Show { id: i64 },

    /// Delete a workout by ID
    Delete { id: i64 },

    /// Delete all workouts
    Clear {
        /// Confirm deletion; this cannot be undone
        #[arg(long)]
        yes: bool,
    },

    /// Today/week/total counts and recent workouts
    Home {
        /// Override today's date
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// List workouts, optionally filtered
    History {
        #[arg(short, long)]
        exercise: Option<String>,
        #[arg(short, long)]
        muscle: Option<MuscleGroup>,
        #[arg(long)]
        since: Option<NaiveDate>,
        #[arg(long)]
        until: Option<NaiveDate>,
    },

    /// Per-exercise statistics
    Stats {
        #[arg(short, long)]
        exercise: Option<String>,
        #[arg(short, long)]
        muscle: Option<MuscleGroup>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Weight progression chart
    Chart {
        /// Exercise to chart (default: the earliest logged exercise)
        #[arg(short, long)]
        exercise: Option<String>,
        /// Width of the longest bar in columns
        #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(1..=chart::MAX_BAR_COLUMNS as i64))]
        width: u16,
        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export all workouts as CSV
    Export {
        /// Output path, `-` for stdout (default: gym-workouts-<date>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or change the theme
    Theme {
        #[arg(long, conflicts_with = "light")]
        dark: bool,
        #[arg(long)]
        light: bool,
    },
}

fn main() -> Result<()> {
    // Setup tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    let mut app = App::open(config::store_path_from_env(cli.store_path))?;

    match cli.command {
        Commands::Exercises { muscle } => {
            let groups = muscle.map_or_else(|| catalog::groups().to_vec(), |g| vec![g]);
            for group in groups {
                println!("{}", group.to_string().bold());
                for entry in catalog::exercises_in(group) {
                    println!("  {} ({})", entry.name, entry.unit);
                }
            }
        }
        Commands::Add {
            exercise,
            sets,
            reps,
            weight,
            date,
        } => {
            let form = WorkoutForm {
                exercise,
                sets,
                reps,
                weight,
                date: date.or(Some(today)),
            };
            match app.submit(&form, Utc::now())? {
                SubmitOutcome::Logged(record) => {
                    println!("Logged workout {}", record.id);
                    print_record_line(&record);
                    if record.is_progressive {
                        println!("{}", "✓ Progressive! You're getting stronger!".green().bold());
                    }
                }
                SubmitOutcome::Rejected(e) => return Err(eyre!("{}", e)),
            }
        }
        Commands::Best { exercise } => match app.previous_best(&exercise) {
            Some(best) => println!(
                "{}{} for {} reps on {}",
                best.weight,
                best.unit,
                best.reps,
                format_date(best.date)
            ),
            None => println!("No previous workouts for {}", exercise),
        },
        Commands::Show { id } => {
            let workout = app.select_workout(id).ok_or_else(|| eyre!("No workout with ID {}", id))?;
            print_detail(workout);
        }
        Commands::Delete { id } => {
            app.select_workout(id);
            if app.delete_selected()? {
                println!("Workout deleted!");
            } else {
                println!("No workout with ID {}", id);
            }
        }
        Commands::Clear { yes } => {
            if app.clear_all(yes)? {
                println!("All workouts deleted");
            } else {
                println!("Are you sure you want to delete all workouts? This cannot be undone.");
                println!("Re-run with --yes to confirm.");
            }
        }
        Commands::Home { today: override_today } => {
            let summary = app.home(override_today.unwrap_or(today));
            println!(
                "Today: {}  This week: {}  Total: {}",
                summary.today_count.to_string().bold(),
                summary.window_count.to_string().bold(),
                summary.total.to_string().bold()
            );
            println!();
            if summary.recent.is_empty() {
                println!("No workouts yet. Start by adding one!");
            }
            for record in &summary.recent {
                print_record_line(record);
            }
        }
        Commands::History {
            exercise,
            muscle,
            since,
            until,
        } => {
            let filters = build_filters(exercise, muscle, since, until);
            if !filters.is_empty() {
                let shown: Vec<String> = filters.iter().map(|f| f.to_string()).collect();
                println!("{}", format!("Filters: {}", shown.join(", ")).dimmed());
            }
            for record in gymlog::filter::apply(app.store().workouts(), &filters) {
                print_record_line(&record);
            }
        }
        Commands::Stats { exercise, muscle, json } => {
            let stats = app.stats(&build_filters(exercise, muscle, None, None));
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else if stats.is_empty() {
                println!("No data available");
            } else {
                for summary in &stats {
                    print_stats(summary);
                }
            }
        }
        Commands::Chart { exercise, width, json } => {
            let points = app.chart(exercise.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                match chart::render_text(&points, usize::from(width)) {
                    Some(text) => print!("{}", text),
                    None => {
                        println!("No workouts to chart");
                        let logged = app.logged_exercises();
                        if !logged.is_empty() {
                            println!("Logged exercises: {}", logged.join(", "));
                        }
                    }
                }
            }
        }
        Commands::Export { output } => {
            let records = app.store().workouts();
            match output {
                Some(path) if path.as_os_str() == "-" => export::write_csv(io::stdout().lock(), records)?,
                Some(path) => {
                    export::save_csv(&path, records)?;
                    println!("Exported {} workouts to {}", records.len(), path.display());
                }
                None => {
                    let path = PathBuf::from(export::default_file_name(today));
                    export::save_csv(&path, records)?;
                    println!("Exported {} workouts to {}", records.len(), path.display());
                }
            }
        }
        Commands::Theme { dark, light } => {
            let store = app.store_mut();
            let dark_mode = if dark || light {
                store.set_dark_mode(dark)?;
                dark
            } else {
                store.toggle_theme()?
            };
            println!("Theme: {}", if dark_mode { "dark" } else { "light" });
        }
    }

    Ok(())
}

fn build_filters(
    exercise: Option<String>,
    muscle: Option<MuscleGroup>,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Vec<Filter> {
    let mut filters = Vec::new();
    filters.extend(exercise.map(Filter::Exercise));
    filters.extend(muscle.map(Filter::Muscle));
    filters.extend(since.map(Filter::Since));
    filters.extend(until.map(Filter::Until));
    filters
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn print_record_line(record: &WorkoutRecord) {
    let marker = if record.is_progressive { " ↑".green().to_string() } else { String::new() };
    println!(
        "{:>14}  {:<13}  {}  {} × {} @ {}{}{}",
        record.id.to_string().dimmed(),
        format_date(record.date),
        record.exercise.bold(),
        record.sets,
        record.reps,
        record.weight,
        record.unit,
        marker
    );
}

fn print_detail(record: &WorkoutRecord) {
    println!("Exercise: {}", record.exercise);
    println!("Muscle Group: {}", record.muscle_group);
    println!();
    println!("Sets: {}", record.sets);
    println!("Reps: {}", record.reps);
    println!("Weight: {}{}", record.weight, record.unit);
    println!("Volume: {:.0}", record.volume);
    println!();
    println!("Date: {}", format_date(record.date));
    if record.is_progressive {
        println!();
        println!("{}", "✓ Progressive Overload!".green());
    }
}

fn print_stats(summary: &ExerciseSummary) {
    let s = &summary.stats;
    println!("{}", summary.exercise.bold());
    println!(
        "  Max Weight: {:.1}  Min Weight: {:.1}  Avg Weight: {:.1}",
        s.max, s.min, s.avg
    );
    println!(
        "  Volume: {:.0}  Progressive: {}  Sessions: {}",
        s.total_volume, s.progressive_count, s.count
    );
}
