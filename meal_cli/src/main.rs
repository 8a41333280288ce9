use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use meal_core::metrics::HEIGHT_RANGE_CM;
use meal_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mealplan")]
#[command(about = "Personalized meal plan and progress tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute BMI, daily calories and a meal plan (default)
    Plan {
        /// Weight in kg (30-200)
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm (120-220)
        #[arg(long)]
        height: Option<f64>,

        /// Age in years (10-100)
        #[arg(long)]
        age: Option<u32>,

        /// female or male
        #[arg(long)]
        gender: Option<String>,

        /// lose, gain or maintain
        #[arg(long)]
        goal: Option<String>,

        /// Health condition or intolerance (repeatable)
        #[arg(long = "condition")]
        conditions: Vec<String>,

        /// Print machine-readable JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Don't remember these inputs for later weigh-ins
        #[arg(long)]
        no_save: bool,
    },

    /// Log a weigh-in to the progress tracker
    Log {
        /// Weight in kg (30-200)
        #[arg(long)]
        weight: f64,

        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Height in cm for the BMI (defaults to the saved profile)
        #[arg(long)]
        height: Option<f64>,
    },

    /// Show logged progress
    History {
        /// Print machine-readable JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Export logged progress to CSV
    Export {
        /// Destination CSV file
        #[arg(long)]
        out: PathBuf,
    },
}

/// Values supplied on the command line for a plan
#[derive(Default)]
struct PlanArgs {
    weight: Option<f64>,
    height: Option<f64>,
    age: Option<u32>,
    gender: Option<String>,
    goal: Option<String>,
    conditions: Vec<String>,
}

fn main() -> Result<()> {
    meal_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Plan {
            weight,
            height,
            age,
            gender,
            goal,
            conditions,
            json,
            no_save,
        }) => {
            let args = PlanArgs {
                weight,
                height,
                age,
                gender,
                goal,
                conditions,
            };
            cmd_plan(&data_dir, &config, args, json, no_save)
        }
        Some(Commands::Log {
            weight,
            date,
            height,
        }) => cmd_log(&data_dir, &config, weight, date, height),
        Some(Commands::History { json }) => cmd_history(&data_dir, json),
        Some(Commands::Export { out }) => cmd_export(&data_dir, &out),
        None => cmd_plan(&data_dir, &config, PlanArgs::default(), false, true),
    }
}

fn profile_path(data_dir: &Path) -> PathBuf {
    data_dir.join("profile.json")
}

fn ledger_path(data_dir: &Path) -> PathBuf {
    data_dir.join("progress.wal")
}

/// Layer command-line values over the saved profile, or the config defaults
fn resolve_input(data_dir: &Path, config: &Config, args: PlanArgs) -> Result<BiometricInput> {
    let mut input = match BiometricInput::load(&profile_path(data_dir))? {
        Some(profile) => profile,
        None => config.defaults.to_input(),
    };

    if let Some(weight) = args.weight {
        input.weight_kg = weight;
    }
    if let Some(height) = args.height {
        input.height_cm = height;
    }
    if let Some(age) = args.age {
        input.age_years = age;
    }
    if let Some(gender) = args.gender {
        input.gender = gender.parse()?;
    }
    if let Some(goal) = args.goal {
        input.goal = goal.parse()?;
    }

    if !args.conditions.is_empty() {
        input.conditions = args
            .conditions
            .iter()
            .filter_map(|c| match c.parse::<HealthCondition>() {
                Ok(condition) => Some(condition),
                Err(_) => {
                    eprintln!("Unknown condition: {}. Ignoring it.", c);
                    None
                }
            })
            .collect();
    }

    Ok(input)
}

fn cmd_plan(
    data_dir: &Path,
    config: &Config,
    args: PlanArgs,
    json: bool,
    no_save: bool,
) -> Result<()> {
    let catalog = config.meal_catalog()?;
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Meal catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid meal catalog".into()));
    }

    let input = resolve_input(data_dir, config, args)?;
    let metrics = DerivedMetrics::compute(&input)?;
    let plan = build_meal_plan(&catalog, metrics.calorie_target, &input.conditions);

    if !no_save {
        input.save(&profile_path(data_dir))?;
    }

    if json {
        let out = serde_json::json!({
            "input": input,
            "metrics": metrics,
            "meal_plan": plan,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    display_metrics(&input, &metrics);
    display_meal_plan(&plan);
    Ok(())
}

fn cmd_log(
    data_dir: &Path,
    config: &Config,
    weight: f64,
    date: Option<String>,
    height: Option<f64>,
) -> Result<()> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
            Error::InvalidInput(format!("date '{}' is not YYYY-MM-DD: {}", raw, e))
        })?,
        None => chrono::Local::now().date_naive(),
    };

    let height_cm = match height {
        Some(h) => {
            if !HEIGHT_RANGE_CM.contains(&h) {
                return Err(Error::InvalidInput(format!(
                    "height {} cm is outside {}..={} cm",
                    h,
                    HEIGHT_RANGE_CM.start(),
                    HEIGHT_RANGE_CM.end()
                )));
            }
            h
        }
        None => match BiometricInput::load(&profile_path(data_dir))? {
            Some(profile) => profile.height_cm,
            None => {
                tracing::info!("No saved profile; using default height");
                config.defaults.height_cm
            }
        },
    };

    let mut ledger = ProgressLedger::open(&ledger_path(data_dir))?;
    let entry = ledger.append(date, weight, height_cm)?;

    println!("✓ Entry added successfully!");
    println!(
        "  {}  {:.1} kg  BMI {:.1}",
        entry.date, entry.weight_kg, entry.bmi
    );
    Ok(())
}

fn cmd_history(data_dir: &Path, json: bool) -> Result<()> {
    let ledger = ProgressLedger::open(&ledger_path(data_dir))?;

    if json {
        let out = serde_json::json!({
            "entries": ledger.snapshot(),
            "series": ledger.as_time_series(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if ledger.is_empty() {
        println!("No progress entries yet. Add one with `mealplan log --weight <kg>`.");
        return Ok(());
    }

    println!("Your Progress History");
    println!();
    println!("  {:<12} {:>11} {:>6}", "Date", "Weight (kg)", "BMI");
    for entry in ledger.snapshot() {
        println!(
            "  {:<12} {:>11.1} {:>6.1}",
            entry.date.to_string(),
            entry.weight_kg,
            entry.bmi
        );
    }

    let series = ledger.as_time_series();
    println!();
    display_series("Weight (kg)", &series.weight);
    println!();
    display_series("BMI", &series.bmi);
    Ok(())
}

fn cmd_export(data_dir: &Path, out: &Path) -> Result<()> {
    let ledger = ProgressLedger::open(&ledger_path(data_dir))?;
    let count = export_csv(ledger.snapshot(), out)?;

    println!("✓ Exported {} entries to CSV", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn display_metrics(input: &BiometricInput, metrics: &DerivedMetrics) {
    println!();
    println!("  Goal: {}", input.goal);
    if !input.conditions.is_empty() {
        let labels: Vec<_> = input.conditions.iter().map(|c| c.to_string()).collect();
        println!("  Conditions: {}", labels.join(", "));
    }
    println!();
    println!("  BMI: {:.1} ({})", metrics.bmi, metrics.bmi_category);
    println!(
        "  Estimated Daily Calorie Requirement: {:.0} kcal/day",
        metrics.calorie_target
    );
    println!();
}

fn display_meal_plan(plan: &MealPlan) {
    println!("  {:<10} {:>17}  {}", "Meal", "Calories (approx)", "Suggestions");
    println!("  {}", "─".repeat(72));
    for row in &plan.rows {
        println!(
            "  {:<10} {:>17}  {}",
            row.slot.to_string(),
            row.calories,
            row.suggestions
        );
    }
    println!();
}

/// Horizontal bar chart, one bar per point, scaled between the series min and max
fn display_series(label: &str, points: &[(NaiveDate, f64)]) {
    const WIDTH: f64 = 30.0;

    let min = points.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    println!("  {}", label);
    for (date, value) in points {
        let bar = if span > 0.0 {
            1 + ((value - min) / span * WIDTH).round() as usize
        } else {
            1
        };
        println!("  {}  {:<31} {:.1}", date, "█".repeat(bar), value);
    }
}
