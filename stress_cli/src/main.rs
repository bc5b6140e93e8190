//! # Flexura CLI Application
//!
//! Terminal front end for bending stress tables. Run without a subcommand
//! for an interactive prompt, or use `table`, `export`, `add` and `show`.
//!
//! Logging goes to stderr; `-v` shows info, `-vv` debug, and `RUST_LOG`
//! overrides both.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use stress_core::calculations::{BeamSectionParameters, StressTable, StressTableGenerator};
use stress_core::export::{export_csv, format_report, format_table};
use stress_core::file_io::{load_project, save_project};
use stress_core::project::{AnalysisItem, ReportSettings, StressProject};
use stress_core::units::{
    CentimetersToFourth, KilonewtonMeters, MillimetersToFourth, NewtonMillimeters,
};

#[derive(Parser)]
#[command(name = "stress")]
#[command(about = "Bending stress distribution across a beam section", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stress table for a section
    Table {
        #[command(flatten)]
        section: SectionArgs,
        /// Print JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
    /// Write the stress table to a CSV file
    Export {
        #[command(flatten)]
        section: SectionArgs,
        /// Output .csv file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Add a labelled analysis to a project file (created if missing)
    Add {
        /// Project file (.sbx)
        #[arg(short, long)]
        project: PathBuf,
        /// Label for the analysis
        #[arg(short, long)]
        label: String,
        /// Responsible engineer, used when creating the project
        #[arg(long, default_value = "")]
        engineer: String,
        /// Project title, used when creating the project
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        section: SectionArgs,
    },
    /// Print a report for every analysis in a project file
    Show {
        /// Project file (.sbx)
        #[arg(short, long)]
        project: PathBuf,
        /// Only show the analysis with this label
        #[arg(short, long)]
        label: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
struct SectionArgs {
    /// Bending moment
    #[arg(long, allow_negative_numbers = true)]
    moment: f64,
    /// Unit of --moment
    #[arg(long, value_enum, default_value = "n-mm")]
    moment_unit: MomentUnit,
    /// Second moment of area
    #[arg(long)]
    inertia: f64,
    /// Unit of --inertia
    #[arg(long, value_enum, default_value = "mm4")]
    inertia_unit: InertiaUnit,
    /// Lower section bound (mm)
    #[arg(long, allow_negative_numbers = true)]
    min_y: f64,
    /// Upper section bound (mm)
    #[arg(long, allow_negative_numbers = true)]
    max_y: f64,
    /// Sampling step (mm)
    #[arg(long)]
    step: f64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MomentUnit {
    #[value(name = "n-mm")]
    NMm,
    #[value(name = "kn-m")]
    KnM,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum InertiaUnit {
    #[value(name = "mm4")]
    Mm4,
    #[value(name = "cm4")]
    Cm4,
}

impl SectionArgs {
    fn to_parameters(&self) -> BeamSectionParameters {
        let moment = match self.moment_unit {
            MomentUnit::NMm => NewtonMillimeters(self.moment),
            MomentUnit::KnM => KilonewtonMeters(self.moment).into(),
        };
        let inertia = match self.inertia_unit {
            InertiaUnit::Mm4 => MillimetersToFourth(self.inertia),
            InertiaUnit::Cm4 => CentimetersToFourth(self.inertia).into(),
        };
        BeamSectionParameters::new(
            moment.0,
            inertia.0,
            self.min_y,
            self.max_y,
            self.step,
        )
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Table { section, json }) => print_table(&section, json),
        Some(Commands::Export { section, output }) => export_table(&section, &output),
        Some(Commands::Add {
            project,
            label,
            engineer,
            title,
            section,
        }) => add_analysis(&project, label, engineer, title, &section),
        Some(Commands::Show { project, label }) => show_project(&project, label.as_deref()),
        None => {
            run_interactive();
            Ok(())
        }
    }
}

fn generate(section: &SectionArgs) -> Result<StressTableGenerator> {
    let mut generator = StressTableGenerator::new();
    generator
        .configure(section.to_parameters())
        .context("invalid section parameters")?;
    Ok(generator)
}

fn print_table(section: &SectionArgs, json: bool) -> Result<()> {
    let generator = generate(section)?;
    let table = generator.stress_table()?;

    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
    } else {
        print_results(table, &ReportSettings::default());
    }
    Ok(())
}

fn export_table(section: &SectionArgs, output: &Path) -> Result<()> {
    let generator = generate(section)?;
    let table = generator.stress_table()?;
    export_csv(table, output)
        .with_context(|| format!("failed to export {}", output.display()))?;
    println!("Exported {} samples to {}", table.len(), output.display());
    Ok(())
}

fn add_analysis(
    path: &Path,
    label: String,
    engineer: String,
    title: Option<String>,
    section: &SectionArgs,
) -> Result<()> {
    let parameters = section.to_parameters();
    parameters.validate().context("invalid section parameters")?;

    let mut project = if path.exists() {
        load_project(path)?
    } else {
        StressProject::new(engineer, title.unwrap_or_else(|| label.clone()))
    };

    if project.find_by_label(&label).is_some() {
        anyhow::bail!("analysis '{}' already exists in {}", label, path.display());
    }

    let id = project.add_item(AnalysisItem::new(label.clone(), parameters));
    save_project(&project, path)?;

    println!("Added '{}' ({}) to {}", label, id, path.display());
    Ok(())
}

fn show_project(path: &Path, label: Option<&str>) -> Result<()> {
    let project = load_project(path)?;
    print!("{}", render_project(&project, label)?);
    Ok(())
}

/// Header plus one report per analysis, optionally narrowed to one label.
fn render_project(project: &StressProject, label: Option<&str>) -> Result<String> {
    let mut out = format!(
        "Project:  {}\nEngineer: {}\n\n",
        project.meta.title, project.meta.engineer
    );

    let mut shown = 0;
    for (_, item) in project.items_sorted() {
        if label.is_some_and(|l| l != item.label) {
            continue;
        }
        let table = item
            .table()
            .with_context(|| format!("analysis '{}' has invalid parameters", item.label))?;
        out.push_str(&format_report(
            &item.label,
            &item.parameters,
            &table,
            &project.settings,
        ));
        out.push('\n');
        shown += 1;
    }

    if shown == 0 {
        match label {
            Some(l) => anyhow::bail!("no analysis labelled '{}' in '{}'", l, project.meta.title),
            None => out.push_str("(no analyses)\n"),
        }
    }
    Ok(out)
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn run_interactive() {
    println!("Flexura - Bending Stress Calculator");
    println!("===================================");
    println!();

    let moment = prompt_f64("Bending moment M (N·mm) [1000.0]: ", 1000.0);
    let inertia = prompt_f64("Moment of inertia I (mm⁴) [500.0]: ", 500.0);
    let min_y = prompt_f64("Lower bound y_min (mm) [-50.0]: ", -50.0);
    let max_y = prompt_f64("Upper bound y_max (mm) [50.0]: ", 50.0);
    let step = prompt_f64("Step (mm) [10.0]: ", 10.0);
    println!();

    let mut generator = StressTableGenerator::new();
    if let Err(e) = generator.set_parameters(moment, inertia, min_y, max_y, step) {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        return;
    }

    match generator.stress_table() {
        Ok(table) => print_results(table, &ReportSettings::default()),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn print_results(table: &StressTable, settings: &ReportSettings) {
    print!("{}", results_text(table, settings));
}

fn results_text(table: &StressTable, settings: &ReportSettings) -> String {
    let rule = "═".repeat(39);
    let mut out = format!("{rule}\n  BENDING STRESS TABLE\n{rule}\n");
    out.push_str(&format_table(table, settings));

    if let Some(extremes) = table.extremes() {
        for (name, sample) in [("σ_max", extremes.max), ("σ_min", extremes.min)] {
            out.push_str(&format!(
                "\n  {} = {:.sp$} N/mm² at y = {:.yp$} mm",
                name,
                sample.stress_n_per_mm2,
                sample.y_mm,
                sp = settings.stress_precision,
                yp = settings.y_precision
            ));
        }
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out
}
