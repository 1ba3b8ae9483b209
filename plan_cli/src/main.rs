use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use plan_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pillarplan")]
#[command(about = "Personal fitness program generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override content library file
    #[arg(long, global = true)]
    library: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a program from preferences (default)
    Generate {
        /// Program length in weeks
        #[arg(long)]
        weeks: Option<u32>,

        /// Training days per week
        #[arg(long)]
        days: Option<u32>,

        /// Session duration cap in minutes
        #[arg(long)]
        max_minutes: Option<u32>,

        /// Session mode (short, full)
        #[arg(long)]
        mode: Option<String>,

        /// Fitness level (beginner, easy, moderate)
        #[arg(long)]
        level: Option<String>,

        /// Comma-separated pillars (strength, cardio, running, tai_chi, mobility)
        #[arg(long)]
        pillars: Option<String>,

        /// Primary focus pillar
        #[arg(long)]
        focus: Option<String>,

        /// Program start date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Emit the full program as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Write output to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the week theme progression
    Themes {
        /// Number of weeks to show
        #[arg(long, default_value_t = 10)]
        weeks: u32,
    },

    /// Show the weekly schedule template for the configured preferences
    Schedule {
        /// Training days per week
        #[arg(long)]
        days: Option<u32>,
    },

    /// Validate a content library file
    ValidateLibrary {
        /// Library file to check (defaults to the configured one)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    plan_core::logging::init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let library_path = cli.library.or_else(|| config.library.path.clone());

    match cli.command {
        Some(Commands::Generate {
            weeks,
            days,
            max_minutes,
            mode,
            level,
            pillars,
            focus,
            start_date,
            json,
            out,
        }) => {
            let options = GenerateOptions {
                weeks,
                days,
                max_minutes,
                mode,
                level,
                pillars,
                focus,
                start_date,
                json,
                out,
            };
            cmd_generate(options, library_path, &config)
        }
        Some(Commands::Themes { weeks }) => cmd_themes(weeks),
        Some(Commands::Schedule { days }) => cmd_schedule(days, &config),
        Some(Commands::ValidateLibrary { path }) => cmd_validate_library(path.or(library_path)),
        None => cmd_generate(GenerateOptions::default(), library_path, &config),
    }
}

#[derive(Default)]
struct GenerateOptions {
    weeks: Option<u32>,
    days: Option<u32>,
    max_minutes: Option<u32>,
    mode: Option<String>,
    level: Option<String>,
    pillars: Option<String>,
    focus: Option<String>,
    start_date: Option<NaiveDate>,
    json: bool,
    out: Option<PathBuf>,
}

fn cmd_generate(
    options: GenerateOptions,
    library_path: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let mut preferences = config.preferences.clone();

    if options.weeks.is_some() {
        preferences.week_length = options.weeks;
    }
    if options.days.is_some() {
        preferences.days_per_week = options.days;
    }
    if options.max_minutes.is_some() {
        preferences.max_duration_min = options.max_minutes;
    }
    if let Some(mode) = &options.mode {
        preferences.default_mode = Some(parse_mode(mode)?);
    }
    if let Some(level) = &options.level {
        preferences.fitness_level = Some(parse_difficulty(level)?);
    }
    if let Some(pillars) = &options.pillars {
        preferences.pillars = Some(parse_pillar_list(pillars)?);
    }
    if let Some(focus) = &options.focus {
        preferences.primary_focus = Some(parse_pillar(focus)?);
    }

    let library = resolve_library(library_path.as_deref())?;
    let errors = library.validate();
    if !errors.is_empty() {
        eprintln!("Library validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::LibraryValidation("Invalid library".into()));
    }

    let program = match options.start_date {
        Some(date) => generate_program(&preferences, &library, date),
        None => generate_program_now(&preferences, &library),
    };

    let output = if options.json {
        serde_json::to_string_pretty(&program)?
    } else {
        render_summary(&program, &preferences)
    };

    match options.out {
        Some(path) => {
            std::fs::write(&path, output)?;
            println!("✓ Program written to {}", path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn cmd_themes(weeks: u32) -> Result<()> {
    println!("Week theme progression:");
    println!();
    for week in 1..=weeks {
        let theme = plan_core::themes::theme_for_week(week);
        println!(
            "  Week {:>2}  {:<22} intensity {:.2}  rest ×{:.1}",
            week,
            plan_core::themes::week_label(week),
            theme.intensity,
            theme.rest_multiplier
        );
    }
    Ok(())
}

fn cmd_schedule(days: Option<u32>, config: &Config) -> Result<()> {
    let mut preferences = config.preferences.clone();
    if days.is_some() {
        preferences.days_per_week = days;
    }
    let settings = preferences.resolve();

    let schedule = plan_core::schedule::schedule_for(
        settings.days_per_week,
        &settings.pillars,
        settings.primary_focus,
    );

    println!("Weekly schedule ({} days):", settings.days_per_week);
    println!();
    for (index, day) in schedule.iter().enumerate() {
        let names: Vec<&str> = day.iter().map(|p| p.label()).collect();
        let line = if names.is_empty() {
            "Rest".to_string()
        } else {
            names.join(" + ")
        };
        println!("  Day {}  {}", index + 1, line);
    }
    Ok(())
}

fn cmd_validate_library(path: Option<PathBuf>) -> Result<()> {
    let library = match &path {
        Some(path) => match load_library(path)? {
            Some(library) => library,
            None => {
                eprintln!("Could not load library from {}", path.display());
                return Err(Error::LibraryValidation("Unreadable library".into()));
            }
        },
        None => starter_library(),
    };

    let errors = library.validate();
    if errors.is_empty() {
        println!(
            "✓ Library OK: {} exercises, {} templates, {} interval sets",
            library.exercises.len(),
            library.templates.len(),
            library.intervals.len()
        );
        Ok(())
    } else {
        eprintln!("Library validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        Err(Error::LibraryValidation(format!(
            "{} validation errors",
            errors.len()
        )))
    }
}

fn render_summary(program: &GeneratedProgram, preferences: &Preferences) -> String {
    use std::fmt::Write;

    let settings = preferences.resolve();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Program: {} weeks starting {}",
        program.program.length_weeks, program.program.start_date
    );
    let _ = writeln!(
        out,
        "Budget: {} per session, {} days/week",
        format_duration(settings.max_duration_min),
        settings.days_per_week
    );
    let _ = writeln!(out);

    for week in &program.weeks {
        let _ = writeln!(out, "Week {}: {}", week.week_number, week.theme);
        for day in program
            .days
            .iter()
            .filter(|d| d.week_number == week.week_number)
        {
            let blocks: Vec<String> = day
                .blocks
                .iter()
                .map(|b| {
                    let rpe = estimate_rpe(b.pillar, None, settings.fitness_level);
                    format!(
                        "{} {}m RPE {}",
                        b.pillar.label(),
                        b.estimated_duration_min,
                        rpe
                    )
                })
                .collect();
            let line = if blocks.is_empty() {
                "Rest".to_string()
            } else {
                blocks.join(", ")
            };
            let check = validate_time_budget(&day.blocks, settings.max_duration_min);
            let overage = if check.valid {
                String::new()
            } else {
                format!("  (over budget by {})", format_duration(check.overage_min))
            };
            let _ = writeln!(
                out,
                "  Day {}  [{}]  {}{}",
                day.day_of_week,
                format_duration(day.est_total_min),
                line,
                overage
            );
        }
        let _ = writeln!(out);
    }

    out
}

fn parse_mode(s: &str) -> Result<Mode> {
    match s.to_lowercase().as_str() {
        "short" => Ok(Mode::Short),
        "full" => Ok(Mode::Full),
        other => Err(Error::Config(format!("Unknown mode: {}", other))),
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty> {
    match s.to_lowercase().as_str() {
        "beginner" => Ok(Difficulty::Beginner),
        "easy" => Ok(Difficulty::Easy),
        "moderate" => Ok(Difficulty::Moderate),
        other => Err(Error::Config(format!("Unknown fitness level: {}", other))),
    }
}

fn parse_pillar(s: &str) -> Result<Pillar> {
    match s.to_lowercase().as_str() {
        "strength" => Ok(Pillar::Strength),
        "cardio" => Ok(Pillar::Cardio),
        "running" => Ok(Pillar::Running),
        "tai_chi" | "taichi" | "tai-chi" => Ok(Pillar::TaiChi),
        "mobility" => Ok(Pillar::Mobility),
        other => Err(Error::Config(format!("Unknown pillar: {}", other))),
    }
}

fn parse_pillar_list(s: &str) -> Result<Vec<Pillar>> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(parse_pillar)
        .collect()
}
